//! # Integer Set Capability
//!
//! The harness never looks inside the bitmap libraries it measures. Every
//! candidate is reached through the [`IntegerSet`] trait, which exposes only
//! what a benchmark case needs: insertion, ascending iteration, a footprint
//! query and an optional post-build hook.
//!
//! ## Adapters
//!
//! - [`RoaringSet`]: `roaring::RoaringBitmap` (pure Rust)
//! - [`CRoaringSet`]: `croaring::Bitmap` (CRoaring), run-optimized on finalize
//! - [`OzbcSet`]: `bitrush_index::OZBCBitmap`, word-aligned run-length
//!   encoding; append-only
//! - [`BTreeIntegerSet`]: uncompressed `BTreeSet<u32>` baseline

mod btree_set;
mod croaring_set;
mod error;
mod ozbc_set;
mod roaring_set;

pub use btree_set::BTreeIntegerSet;
pub use croaring_set::CRoaringSet;
pub use error::{SetError, SetResult};
pub use ozbc_set::OzbcSet;
pub use roaring_set::RoaringSet;

/// The capability every benchmarked set implementation must provide.
///
/// Iteration goes through an associated iterator type rather than a boxed
/// trait object so the timed traversal is monomorphized per candidate.
pub trait IntegerSet: Sized {
    /// Iterator over the stored keys, in strictly ascending order.
    type Iter<'a>: Iterator<Item = u32>
    where
        Self: 'a;

    /// Creates an empty set.
    ///
    /// # Errors
    ///
    /// Returns an error if the implementation cannot allocate its initial state.
    fn create() -> SetResult<Self>;

    /// Inserts a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the implementation rejects or cannot store the key.
    fn insert(&mut self, key: u32) -> SetResult<()>;

    /// Returns a fresh forward iterator over the stored keys.
    ///
    /// Each call restarts from the smallest key.
    ///
    /// # Errors
    ///
    /// Returns an error if the implementation cannot produce an iterator.
    fn iter(&self) -> SetResult<Self::Iter<'_>>;

    /// Returns the current memory footprint in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the footprint cannot be determined.
    fn footprint_bytes(&self) -> SetResult<u64>;

    /// Whether [`footprint_bytes`](Self::footprint_bytes) is an estimate
    /// rather than a size reported by the implementation.
    const FOOTPRINT_ESTIMATED: bool = false;

    /// Post-build hook, invoked once after all insertions and before the
    /// footprint query. Never timed.
    ///
    /// # Errors
    ///
    /// Returns an error if the implementation fails to compact itself.
    fn finalize(&mut self) -> SetResult<()> {
        Ok(())
    }
}

/// Converts a library-reported `usize` size into the footprint type.
pub(crate) fn footprint_from(bytes: usize) -> SetResult<u64> {
    u64::try_from(bytes).map_err(|_| SetError::Footprint(format!("size {bytes} exceeds u64")))
}
