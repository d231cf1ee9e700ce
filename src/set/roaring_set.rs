//! Adapter for the pure-Rust `roaring` crate.

use super::{footprint_from, IntegerSet, SetResult};
use ::roaring::RoaringBitmap;

/// [`IntegerSet`] backed by `roaring::RoaringBitmap`.
///
/// The footprint is the portable serialized size, matching what the
/// CRoaring adapter reports. There is no post-build step.
#[derive(Debug, Default, Clone)]
pub struct RoaringSet {
    bitmap: RoaringBitmap,
}

impl RoaringSet {
    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.bitmap.len()
    }

    /// Returns `true` if no key is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bitmap.is_empty()
    }
}

impl IntegerSet for RoaringSet {
    type Iter<'a> = ::roaring::bitmap::Iter<'a>;

    fn create() -> SetResult<Self> {
        Ok(Self {
            bitmap: RoaringBitmap::new(),
        })
    }

    #[inline]
    fn insert(&mut self, key: u32) -> SetResult<()> {
        // `false` only signals a duplicate, which is not an error here.
        self.bitmap.insert(key);
        Ok(())
    }

    fn iter(&self) -> SetResult<Self::Iter<'_>> {
        Ok(self.bitmap.iter())
    }

    fn footprint_bytes(&self) -> SetResult<u64> {
        footprint_from(self.bitmap.serialized_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_insert_is_not_an_error() {
        let mut set = RoaringSet::create().unwrap();
        set.insert(5).unwrap();
        set.insert(5).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_footprint_grows_with_content() {
        let mut set = RoaringSet::create().unwrap();
        let empty = set.footprint_bytes().unwrap();
        for key in (0..100_000).step_by(3) {
            set.insert(key).unwrap();
        }
        assert!(set.footprint_bytes().unwrap() > empty);
        assert!(!set.is_empty());
    }
}
