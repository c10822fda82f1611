// SPDX-License-Identifier: MIT

use std::ops::Range;

/// A contiguous, half-open index range `[start, end)` owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    /// Position of this partition among its siblings, ascending with `start`.
    pub index: usize,
    /// First index covered.
    pub start: usize,
    /// One past the last index covered.
    pub end: usize,
}

impl Partition {
    /// The covered indices as a range.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of indices covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the partition covers no index.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Splits an index range into contiguous partitions.
///
/// At most `num_chunks` partitions are produced, and never more than there
/// are indices, so no partition is empty. Every partition gets
/// `len / chunks` indices and the last one also absorbs the remainder.
/// An empty range yields no partition at all.
#[derive(Debug, Clone)]
pub struct ChunkSplitter {
    /// One past the last index of the whole range.
    range_end: usize,
    /// The current position in the range.
    current_position: usize,
    /// The index of the next partition to produce.
    current_chunk_index: usize,
    /// Number of partitions this splitter produces in total.
    chunk_count: usize,
    /// Size of every partition except possibly the last.
    base_chunk_size: usize,
}

impl ChunkSplitter {
    /// Creates a splitter dividing `range` into up to `num_chunks` partitions.
    ///
    /// A `num_chunks` of zero is treated as one.
    pub fn new(range: Range<usize>, num_chunks: usize) -> Self {
        let total_items = range.end.saturating_sub(range.start);
        let chunk_count = num_chunks.max(1).min(total_items);

        ChunkSplitter {
            range_end: range.start + total_items,
            current_position: range.start,
            current_chunk_index: 0,
            chunk_count,
            base_chunk_size: if chunk_count == 0 {
                0
            } else {
                total_items / chunk_count
            },
        }
    }

    /// Number of partitions the splitter produces in total.
    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }
}

impl Iterator for ChunkSplitter {
    type Item = Partition;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_chunk_index == self.chunk_count {
            return None;
        }

        let start = self.current_position;
        // The last partition runs to the end of the range.
        let end = if self.current_chunk_index + 1 == self.chunk_count {
            self.range_end
        } else {
            start + self.base_chunk_size
        };

        let partition = Partition {
            index: self.current_chunk_index,
            start,
            end,
        };
        self.current_chunk_index += 1;
        self.current_position = end;

        Some(partition)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.chunk_count - self.current_chunk_index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChunkSplitter {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_last_chunk_absorbs_remainder() {
        let chunks: Vec<_> =
            ChunkSplitter::new(0..10, 4).map(|p| p.range()).collect();
        assert_eq!(chunks, vec![0..2, 2..4, 4..6, 6..10]);
    }

    #[test]
    fn test_fewer_items_than_chunks() {
        let chunks: Vec<_> =
            ChunkSplitter::new(0..3, 8).map(|p| p.range()).collect();
        assert_eq!(chunks, vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn test_empty_range_yields_nothing() {
        assert_eq!(ChunkSplitter::new(0..0, 4).count(), 0);
        assert_eq!(ChunkSplitter::new(7..7, 4).count(), 0);
    }

    #[test]
    fn test_zero_chunks_treated_as_one() {
        let chunks: Vec<_> = ChunkSplitter::new(5..9, 0).collect();
        assert_eq!(
            chunks,
            vec![Partition {
                index: 0,
                start: 5,
                end: 9
            }]
        );
    }

    #[test]
    fn test_offset_range() {
        let chunks: Vec<_> =
            ChunkSplitter::new(10..17, 2).map(|p| p.range()).collect();
        assert_eq!(chunks, vec![10..13, 13..17]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn proptest_partitions_cover_range_exactly_once(
            n in 0usize..5000,
            k in 1usize..64,
            offset in 0usize..100,
        ) {
            let splitter = ChunkSplitter::new(offset..offset + n, k);
            let expected_chunks = k.min(n);
            prop_assert_eq!(splitter.len(), expected_chunks);

            let mut next_start = offset;
            for (position, partition) in splitter.enumerate() {
                // Contiguous, ordered, non-empty: no gap and no overlap.
                prop_assert_eq!(partition.index, position);
                prop_assert_eq!(partition.start, next_start);
                prop_assert!(!partition.is_empty());
                next_start = partition.end;
            }
            prop_assert_eq!(next_start, offset + n);
        }
    }
}
