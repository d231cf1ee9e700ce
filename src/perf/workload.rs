//! Workload generation.
//!
//! A workload is every multiple of the density in `[0, universe]`, in
//! ascending order. It is computed on demand and never stored.

use crate::config::{ConfigError, ConfigResult};
use std::fmt;
use std::iter::StepBy;
use std::num::NonZeroU32;
use std::ops::RangeInclusive;

/// Density parameter: a key belongs to the workload iff `key % d == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Density(NonZeroU32);

impl Density {
    /// Create a density.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDensity`] for zero.
    pub fn new(value: u32) -> ConfigResult<Self> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or(ConfigError::InvalidDensity(value))
    }

    /// The modulus.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ascending key sequence of a workload.
pub type Keys = StepBy<RangeInclusive<u32>>;

/// Deterministic key set for one `(universe, density)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Workload {
    universe: u32,
    density: Density,
}

impl Workload {
    /// Create a workload over `[0, universe]`.
    #[must_use]
    pub fn new(universe: u32, density: Density) -> Self {
        Self { universe, density }
    }

    /// Create a workload from a raw density value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDensity`] when `density` is zero.
    pub fn with_density(universe: u32, density: u32) -> ConfigResult<Self> {
        Ok(Self::new(universe, Density::new(density)?))
    }

    /// Inclusive upper bound of the key domain.
    #[must_use]
    pub fn universe(&self) -> u32 {
        self.universe
    }

    /// The density parameter.
    #[must_use]
    pub fn density(&self) -> Density {
        self.density
    }

    /// A fresh iterator over the keys, starting at 0.
    #[must_use]
    pub fn keys(&self) -> Keys {
        // usize is at least 32 bits on every supported target.
        (0..=self.universe).step_by(self.density.get() as usize)
    }

    /// Number of keys: `floor(universe / d) + 1`.
    #[must_use]
    pub fn expected_entries(&self) -> u64 {
        u64::from(self.universe / self.density.get()) + 1
    }

    /// Sum of all keys, wrapped to 64 bits like the iteration checksum.
    #[must_use]
    pub fn expected_checksum(&self) -> u64 {
        let n = u128::from(self.expected_entries());
        let sum = u128::from(self.density.get()) * (n * (n - 1) / 2);
        // Truncation is reduction modulo 2^64, the checksum's wrapping rule.
        sum as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_density_rejected() {
        assert!(matches!(Density::new(0), Err(ConfigError::InvalidDensity(0))));
        assert!(Workload::with_density(1000, 0).is_err());
    }

    #[test]
    fn test_hundredth_of_thousand() {
        let workload = Workload::with_density(1000, 100).unwrap();
        let keys: Vec<u32> = workload.keys().collect();

        assert_eq!(keys, vec![0, 100, 200, 300, 400, 500, 600, 700, 800, 900, 1000]);
        assert_eq!(workload.expected_entries(), 11);
        assert_eq!(workload.expected_checksum(), 5500);
    }

    #[test]
    fn test_empty_universe() {
        let workload = Workload::with_density(0, 1).unwrap();
        assert_eq!(workload.keys().collect::<Vec<_>>(), vec![0]);
        assert_eq!(workload.expected_entries(), 1);
        assert_eq!(workload.expected_checksum(), 0);
    }

    #[test]
    fn test_density_one_covers_universe() {
        let workload = Workload::with_density(9, 1).unwrap();
        assert_eq!(workload.keys().count(), 10);
        assert_eq!(workload.expected_checksum(), 45);
    }

    #[test]
    fn test_density_above_universe_yields_zero_only() {
        let workload = Workload::with_density(99, 100).unwrap();
        assert_eq!(workload.keys().collect::<Vec<_>>(), vec![0]);
        assert_eq!(workload.expected_entries(), 1);
    }

    #[test]
    fn test_full_key_range_does_not_overflow() {
        let workload = Workload::with_density(u32::MAX, 1 << 16).unwrap();
        let last = workload.keys().last().unwrap();

        assert_eq!(last, u32::MAX - u32::from(u16::MAX));
        assert_eq!(workload.expected_entries(), 1 << 16);
        let sum: u64 = workload.keys().map(u64::from).sum();
        assert_eq!(workload.expected_checksum(), sum);
    }

    #[test]
    fn test_keys_restart() {
        let workload = Workload::with_density(50, 7).unwrap();
        assert_eq!(
            workload.keys().collect::<Vec<_>>(),
            workload.keys().collect::<Vec<_>>()
        );
    }
}
