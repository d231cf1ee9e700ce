//! Adapter for the word-aligned run-length bitmap of `bitrush-index`.

use super::{footprint_from, IntegerSet, SetError, SetResult};
use bitrush_index::{Bitmap, OZBCBitmap};

/// Largest key the bitmap can decode.
const OZBC_MAX_KEY: u32 = u32::MAX - 8;

/// [`IntegerSet`] backed by `bitrush_index::OZBCBitmap`.
///
/// OZBC encodes runs of zero bytes in 16-bit words, the same family as
/// EWAH. The bitmap is append-only: the library silently ignores a key that
/// is not above the last one set, so the adapter rejects such keys instead.
///
/// There is no iterator over the encoded words; iteration decodes the whole
/// bitmap into a vector, and that decode is part of the timed traversal.
/// The footprint is the serialized size (words plus the byte counter).
///
/// Keys in the last byte of the `u32` range are rejected: the decoder's
/// position counter would run past `u32::MAX`.
#[derive(Debug, Clone)]
pub struct OzbcSet {
    bitmap: OZBCBitmap,
    last: Option<u32>,
}

impl OzbcSet {
    /// Largest key stored so far.
    #[must_use]
    pub fn last(&self) -> Option<u32> {
        self.last
    }
}

impl IntegerSet for OzbcSet {
    type Iter<'a> = std::vec::IntoIter<u32>;

    fn create() -> SetResult<Self> {
        Ok(Self {
            bitmap: OZBCBitmap::new(),
            last: None,
        })
    }

    #[inline]
    fn insert(&mut self, key: u32) -> SetResult<()> {
        if key > OZBC_MAX_KEY {
            return Err(SetError::InsertRejected {
                key,
                reason: format!("above the largest decodable key {OZBC_MAX_KEY}"),
            });
        }
        if let Some(last) = self.last {
            if key <= last {
                return Err(SetError::InsertRejected {
                    key,
                    reason: format!("keys must ascend, last key was {last}"),
                });
            }
        }
        self.bitmap.set(key);
        self.last = Some(key);
        Ok(())
    }

    fn iter(&self) -> SetResult<Self::Iter<'_>> {
        Ok(self.bitmap.unroll_bitmap().into_iter())
    }

    fn footprint_bytes(&self) -> SetResult<u64> {
        footprint_from(self.bitmap.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descending_insert_rejected() {
        let mut set = OzbcSet::create().unwrap();
        set.insert(100).unwrap();

        let err = set.insert(100).unwrap_err();
        assert!(matches!(err, SetError::InsertRejected { key: 100, .. }));
        assert!(set.insert(7).is_err());
        assert_eq!(set.last(), Some(100));
        assert_eq!(set.iter().unwrap().collect::<Vec<_>>(), vec![100]);
    }

    #[test]
    fn test_long_zero_runs() {
        let keys = [0, 7, 8, 1_000, 100_000_000, OZBC_MAX_KEY];
        let mut set = OzbcSet::create().unwrap();
        for key in keys {
            set.insert(key).unwrap();
        }
        assert_eq!(set.iter().unwrap().collect::<Vec<_>>(), keys.to_vec());
    }

    #[test]
    fn test_last_byte_of_range_rejected() {
        let mut set = OzbcSet::create().unwrap();
        let err = set.insert(u32::MAX).unwrap_err();
        assert!(matches!(err, SetError::InsertRejected { key: u32::MAX, .. }));
        assert_eq!(set.last(), None);
    }

    #[test]
    fn test_footprint_counts_words() {
        let mut set = OzbcSet::create().unwrap();
        assert_eq!(set.footprint_bytes().unwrap(), 4);

        // Keys 0 and 3 share one dirty byte, so one word.
        set.insert(0).unwrap();
        set.insert(3).unwrap();
        assert_eq!(set.footprint_bytes().unwrap(), 6);

        // Key 16 is two bytes on: a second word.
        set.insert(16).unwrap();
        assert_eq!(set.footprint_bytes().unwrap(), 8);
    }
}
