//! Adapter for `croaring`, the binding to the CRoaring C library.

use super::{footprint_from, IntegerSet, SetResult};
use ::croaring::{Bitmap, Portable};
use tracing::trace;

/// [`IntegerSet`] backed by `croaring::Bitmap`.
///
/// [`finalize`](IntegerSet::finalize) runs CRoaring's run-length
/// optimization, so the reported footprint reflects the compacted bitmap.
#[derive(Debug, Clone)]
pub struct CRoaringSet {
    bitmap: Bitmap,
}

impl CRoaringSet {
    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.bitmap.cardinality()
    }

    /// Returns `true` if no key is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bitmap.is_empty()
    }
}

impl IntegerSet for CRoaringSet {
    type Iter<'a> = ::croaring::bitmap::BitmapIterator<'a>;

    fn create() -> SetResult<Self> {
        Ok(Self {
            bitmap: Bitmap::new(),
        })
    }

    #[inline]
    fn insert(&mut self, key: u32) -> SetResult<()> {
        self.bitmap.add(key);
        Ok(())
    }

    fn iter(&self) -> SetResult<Self::Iter<'_>> {
        Ok(self.bitmap.iter())
    }

    fn footprint_bytes(&self) -> SetResult<u64> {
        footprint_from(self.bitmap.get_serialized_size_in_bytes::<Portable>())
    }

    fn finalize(&mut self) -> SetResult<()> {
        let changed = self.bitmap.run_optimize();
        trace!(changed, "croaring run optimization");
        Ok(())
    }
}
