/*!
 * Fragment
 * Contiguous byte range of the simulated address space
 */

use crate::core::types::{Address, Size};
use serde::{Deserialize, Serialize};

/// Half-open range `[start, end)` tagged free or occupied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub start: Address,
    pub end: Address,
    pub free: bool,
    /// Position in the free-fragment heap, meaningful only while `free`
    #[serde(skip)]
    pub(crate) heap_index: usize,
}

impl Fragment {
    pub fn new(start: Address, end: Address, free: bool) -> Self {
        debug_assert!(start <= end, "fragment [{start}, {end}) is inverted");
        Self {
            start,
            end,
            free,
            heap_index: 0,
        }
    }

    pub fn free(start: Address, end: Address) -> Self {
        Self::new(start, end, true)
    }

    pub fn occupied(start: Address, end: Address) -> Self {
        Self::new(start, end, false)
    }

    pub fn size(&self) -> Size {
        self.end - self.start
    }

    pub fn heap_index(&self) -> usize {
        self.heap_index
    }

    /// Heap order: larger size first, lower start on ties
    pub fn outranks(&self, other: &Fragment) -> bool {
        if self.size() == other.size() {
            self.start < other.start
        } else {
            self.size() > other.size()
        }
    }

    /// True when `next` begins exactly where this fragment ends
    pub fn precedes(&self, next: &Fragment) -> bool {
        self.end == next.start
    }

    pub fn mergeable_with(&self, next: &Fragment) -> bool {
        self.free && next.free && self.precedes(next)
    }
}
