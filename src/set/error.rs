//! Capability error types.

use thiserror::Error;

/// Result type for [`IntegerSet`](super::IntegerSet) operations.
pub type SetResult<T> = Result<T, SetError>;

/// Errors surfaced by a set implementation under test.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetError {
    /// The set could not allocate its initial state.
    #[error("allocation failed: {0}")]
    Allocation(String),

    /// A key was rejected.
    #[error("insert of key {key} rejected: {reason}")]
    InsertRejected {
        /// The rejected key.
        key: u32,
        /// Implementation-provided reason.
        reason: String,
    },

    /// The post-build hook failed.
    #[error("finalize failed: {0}")]
    Finalize(String),

    /// No iterator could be produced.
    #[error("iteration failed: {0}")]
    Iteration(String),

    /// The footprint query failed.
    #[error("footprint query failed: {0}")]
    Footprint(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SetError::InsertRejected {
            key: 400,
            reason: "quota exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "insert of key 400 rejected: quota exceeded");
        assert_eq!(
            SetError::Footprint("unsupported".to_string()).to_string(),
            "footprint query failed: unsupported"
        );
    }
}
