//! Uncompressed baseline.

use super::{IntegerSet, SetResult};
use std::collections::{btree_set, BTreeSet};
use std::iter::Copied;
use std::mem::size_of;

/// [`IntegerSet`] backed by a plain `BTreeSet<u32>`.
///
/// Serves as the reference point the compressed candidates are compared
/// against. The footprint is an estimate of the payload only
/// (`len * size_of::<u32>()`), since the node overhead of the standard
/// B-tree is not observable; reports label it as an estimate.
#[derive(Debug, Default, Clone)]
pub struct BTreeIntegerSet {
    keys: BTreeSet<u32>,
}

impl IntegerSet for BTreeIntegerSet {
    type Iter<'a> = Copied<btree_set::Iter<'a, u32>>;

    const FOOTPRINT_ESTIMATED: bool = true;

    fn create() -> SetResult<Self> {
        Ok(Self::default())
    }

    fn insert(&mut self, key: u32) -> SetResult<()> {
        self.keys.insert(key);
        Ok(())
    }

    fn iter(&self) -> SetResult<Self::Iter<'_>> {
        Ok(self.keys.iter().copied())
    }

    fn footprint_bytes(&self) -> SetResult<u64> {
        let bytes = self.keys.len().saturating_mul(size_of::<u32>());
        super::footprint_from(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprint_estimate() {
        let mut set = BTreeIntegerSet::create().unwrap();
        for key in [1, 2, 3, 3] {
            set.insert(key).unwrap();
        }
        assert_eq!(set.footprint_bytes().unwrap(), 12);
    }
}
