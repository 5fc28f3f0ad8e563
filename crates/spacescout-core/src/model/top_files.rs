/// Bounded tracker for the largest files seen during a scan.
///
/// A min-heap of at most `limit` records: the smallest retained record sits
/// at the top so it can be compared against and evicted in O(log limit).
/// Offering n files costs O(n log limit), so the largest K files under a
/// huge tree are found without sorting every file.
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::path::{Path, PathBuf};

/// A regular file and its size, as read by a single `lstat`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileRecord {
    /// File size in bytes. Field order matters: records order by size first.
    pub size: u64,
    /// Absolute path of the file.
    pub path: PathBuf,
}

impl FileRecord {
    pub fn new(size: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            size,
            path: path.into(),
        }
    }
}

/// The K largest files offered so far.
#[derive(Debug, Clone)]
pub struct TopFiles {
    limit: usize,
    heap: BinaryHeap<Reverse<FileRecord>>,
}

impl TopFiles {
    /// Create an empty tracker retaining at most `limit` records.
    ///
    /// A `limit` of 0 disables tracking: every offer is a no-op.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            // Cap the up-front allocation.
            heap: BinaryHeap::with_capacity(limit.min(4_096)),
        }
    }

    /// Offer a file to the tracker. Returns `true` if it was retained.
    ///
    /// Zero-byte files are never tracked. When the tracker is full, the new
    /// file replaces the current minimum only if it is strictly larger, so
    /// among equal sizes the earlier arrival is kept.
    ///
    /// The path is only copied when the record is admitted.
    pub fn offer(&mut self, size: u64, path: &Path) -> bool {
        if self.limit == 0 || size == 0 {
            return false;
        }

        if self.heap.len() < self.limit {
            self.heap.push(Reverse(FileRecord::new(size, path)));
            return true;
        }

        match self.heap.peek_mut() {
            Some(mut min) if size > min.0.size => {
                // Assigning through PeekMut re-sifts the heap on drop.
                *min = Reverse(FileRecord::new(size, path));
                true
            }
            _ => false,
        }
    }

    /// Smallest retained size, if any.
    pub fn min_size(&self) -> Option<u64> {
        self.heap.peek().map(|r| r.0.size)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Consume the tracker, returning records sorted descending by size.
    pub fn into_sorted_vec(self) -> Vec<FileRecord> {
        // `Reverse` makes the ascending sort of the heap descending by size.
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(record)| record)
            .collect()
    }
}
