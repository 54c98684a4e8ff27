/*!
 * Address Space
 * Worst-fit allocation with immediate coalescing
 *
 * The space `[0, capacity)` is partitioned into fragments kept in address
 * order. Free fragments also live in an indexed max-heap, so allocation
 * always carves from the single largest free fragment. Requests are
 * remembered by ordinal in a history table; `free` resolves its target
 * through that table instead of by address.
 */

use super::arena::{FragmentArena, FragmentId};
use super::fragment::Fragment;
use super::heap::IndexedMaxHeap;
use super::traits::{Allocator, MemoryInfo};
use super::types::{MemoryError, MemoryResponse, MemoryResult, MemoryStats};
use crate::core::types::{Address, Handle, Ordinal, Size};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct AddressSpace {
    capacity: Size,
    fragments: FragmentArena,
    free_fragments: IndexedMaxHeap,
    /// `None` marks a request that holds no live allocation
    history: Vec<Option<FragmentId>>,
    used_memory: Size,
    failed_allocations: usize,
}

impl AddressSpace {
    pub fn new(capacity: Size) -> Self {
        let mut fragments = FragmentArena::new();
        let mut free_fragments = IndexedMaxHeap::new();
        if capacity > 0 {
            let root = fragments.push_back(Fragment::free(0, capacity));
            free_fragments.push(&mut fragments, root);
        }
        debug!(capacity, "address space initialized");
        Self {
            capacity,
            fragments,
            free_fragments,
            history: Vec::new(),
            used_memory: 0,
            failed_allocations: 0,
        }
    }

    /// Allocate from the largest free fragment, returning its zero-based start
    pub fn try_allocate(&mut self, size: Size) -> MemoryResult<Address> {
        let chosen = match self.free_fragments.top() {
            Some(id) if size > 0 && self.fragments[id].size() >= size => id,
            _ => {
                let largest_free = self.largest_free();
                self.history.push(None);
                self.failed_allocations += 1;
                debug!(size, largest_free, "allocation failed");
                return Err(if size == 0 {
                    MemoryError::ZeroSize
                } else {
                    MemoryError::OutOfMemory {
                        requested: size,
                        largest_free,
                    }
                });
            }
        };
        self.free_fragments.pop(&mut self.fragments);

        let Fragment { start, end, .. } = self.fragments[chosen];
        let split_at = start + size;
        if split_at < end {
            let remainder = self
                .fragments
                .insert_after(chosen, Fragment::free(split_at, end));
            self.free_fragments.push(&mut self.fragments, remainder);
            debug!(start = split_at, end, "split remainder returned to free set");
        }

        let fragment = &mut self.fragments[chosen];
        fragment.end = split_at;
        fragment.free = false;
        self.history.push(Some(chosen));
        self.used_memory += size;

        debug!(
            ordinal = self.history.len() - 1,
            start, size, "allocated"
        );
        Ok(start)
    }

    /// Release the fragment allocated by the request at `ordinal`
    pub fn free(&mut self, ordinal: Ordinal) {
        self.history.push(None);

        let Some(id) = self.history.get_mut(ordinal).and_then(Option::take) else {
            debug!(ordinal, "free ignored: no live allocation at ordinal");
            return;
        };

        let released = self.fragments[id].size();
        self.used_memory -= released;
        self.fragments[id].free = true;

        if let Some(prev) = self.fragments.prev(id) {
            if self.fragments[prev].free {
                self.absorb(id, prev);
            }
        }
        if let Some(next) = self.fragments.next(id) {
            if self.fragments[next].free {
                self.absorb(id, next);
            }
        }
        self.free_fragments.push(&mut self.fragments, id);

        let merged = self.fragments[id];
        debug!(
            ordinal,
            released,
            start = merged.start,
            end = merged.end,
            "freed"
        );
    }

    /// Pull a free neighbour out of the heap and the sequence, widening `id`
    fn absorb(&mut self, id: FragmentId, neighbour: FragmentId) {
        let position = self.fragments[neighbour].heap_index;
        self.free_fragments.delete(&mut self.fragments, position);
        let absorbed = self.fragments.remove(neighbour);

        let fragment = &mut self.fragments[id];
        fragment.start = fragment.start.min(absorbed.start);
        fragment.end = fragment.end.max(absorbed.end);
    }

    pub fn largest_free(&self) -> Size {
        self.free_fragments
            .top()
            .map_or(0, |id| self.fragments[id].size())
    }

    pub fn used_memory(&self) -> Size {
        self.used_memory
    }

    /// Number of requests processed so far
    pub fn requests(&self) -> usize {
        self.history.len()
    }

    /// Address-ordered snapshot of the partition
    pub fn fragments(&self) -> Vec<Fragment> {
        self.fragments.iter().map(|(_, fragment)| *fragment).collect()
    }

    /// Whether the request at `ordinal` still owns an allocation
    pub fn is_live(&self, ordinal: Ordinal) -> bool {
        matches!(self.history.get(ordinal), Some(Some(_)))
    }

    fn check_partition(&self) -> MemoryResult<()> {
        let corrupt = |msg: String| Err(MemoryError::CorruptionDetected(msg));

        let mut expected_start = 0;
        let mut previous_free = false;
        let mut free_count = 0;
        let mut occupied_bytes = 0;

        for (id, fragment) in self.fragments.iter() {
            if fragment.start != expected_start {
                return corrupt(format!(
                    "gap or overlap: fragment starts at {} but previous ended at {}",
                    fragment.start, expected_start
                ));
            }
            if fragment.end <= fragment.start {
                return corrupt(format!(
                    "empty fragment [{}, {})",
                    fragment.start, fragment.end
                ));
            }
            if fragment.free {
                if previous_free {
                    return corrupt(format!(
                        "uncoalesced free fragments meet at {}",
                        fragment.start
                    ));
                }
                if self.free_fragments.get(fragment.heap_index) != Some(id) {
                    return corrupt(format!(
                        "free fragment [{}, {}) not found at heap index {}",
                        fragment.start, fragment.end, fragment.heap_index
                    ));
                }
                free_count += 1;
            } else {
                occupied_bytes += fragment.size();
            }
            previous_free = fragment.free;
            expected_start = fragment.end;
        }

        if expected_start != self.capacity {
            return corrupt(format!(
                "fragments cover {} bytes of {}",
                expected_start, self.capacity
            ));
        }
        if free_count != self.free_fragments.len() {
            return corrupt(format!(
                "{} free fragments but {} heap entries",
                free_count,
                self.free_fragments.len()
            ));
        }
        if occupied_bytes != self.used_memory {
            return corrupt(format!(
                "occupied fragments hold {} bytes, accounting says {}",
                occupied_bytes, self.used_memory
            ));
        }
        Ok(())
    }

    fn check_history(&self) -> MemoryResult<()> {
        for (ordinal, entry) in self.history.iter().enumerate() {
            if let Some(id) = entry {
                match self.fragments.get(*id) {
                    Some(fragment) if !fragment.free => {}
                    _ => {
                        return Err(MemoryError::CorruptionDetected(format!(
                            "history entry {ordinal} does not reference an occupied fragment"
                        )))
                    }
                }
            }
        }
        Ok(())
    }
}

impl Allocator for AddressSpace {
    fn allocate(&mut self, size: Size) -> Handle {
        MemoryResponse::from(self.try_allocate(size)).data
    }

    fn free(&mut self, ordinal: Ordinal) {
        AddressSpace::free(self, ordinal)
    }
}

impl MemoryInfo for AddressSpace {
    fn capacity(&self) -> Size {
        self.capacity
    }

    fn stats(&self) -> MemoryStats {
        MemoryStats {
            capacity: self.capacity,
            used_memory: self.used_memory,
            available_memory: self.capacity - self.used_memory,
            fragments: self.fragments.len(),
            free_fragments: self.free_fragments.len(),
            largest_free: self.largest_free(),
            requests: self.history.len(),
            failed_allocations: self.failed_allocations,
        }
    }

    fn validate(&self) -> MemoryResult<()> {
        self.check_partition()?;
        self.free_fragments
            .validate(&self.fragments)
            .map_err(MemoryError::CorruptionDetected)?;
        self.check_history()
    }
}
