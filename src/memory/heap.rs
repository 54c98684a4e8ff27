/*!
 * Indexed Max-Heap
 * Free fragments ordered by (size desc, start asc) with arbitrary-position delete
 *
 * The heap stores handles only; fragment storage stays in the arena. Every
 * move of a handle writes its new position back into the fragment's
 * `heap_index`, which is what makes `delete` O(log n) without a scan.
 */

use super::arena::{FragmentArena, FragmentId};

#[derive(Debug, Clone, Default)]
pub struct IndexedMaxHeap {
    data: Vec<FragmentId>,
}

impl IndexedMaxHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Largest free fragment, lowest start on ties
    pub fn top(&self) -> Option<FragmentId> {
        self.data.first().copied()
    }

    pub fn get(&self, position: usize) -> Option<FragmentId> {
        self.data.get(position).copied()
    }

    pub fn push(&mut self, arena: &mut FragmentArena, id: FragmentId) {
        self.data.push(id);
        let position = self.data.len() - 1;
        arena[id].heap_index = position;
        self.sift_up(arena, position);
    }

    pub fn pop(&mut self, arena: &mut FragmentArena) -> Option<FragmentId> {
        self.delete(arena, 0)
    }

    /// Remove the handle currently at `position`; no-op when out of range
    pub fn delete(&mut self, arena: &mut FragmentArena, position: usize) -> Option<FragmentId> {
        let last = self.data.len().checked_sub(1)?;
        if position > last {
            return None;
        }
        if position != last {
            self.swap(arena, position, last);
        }
        let removed = self.data.pop();

        if position < self.data.len() {
            if position > 0 && self.outranks(arena, position, Self::parent(position)) {
                self.sift_up(arena, position);
            } else {
                self.sift_down(arena, position);
            }
        }
        removed
    }

    /// Check heap order and back-pointers against the arena
    pub fn validate(&self, arena: &FragmentArena) -> Result<(), String> {
        for (position, &id) in self.data.iter().enumerate() {
            let fragment = arena
                .get(id)
                .ok_or_else(|| format!("heap position {position} holds stale handle {}", id.index()))?;
            if fragment.heap_index != position {
                return Err(format!(
                    "fragment [{}, {}) records heap index {} but sits at {}",
                    fragment.start, fragment.end, fragment.heap_index, position
                ));
            }
            if position > 0 && self.outranks(arena, position, Self::parent(position)) {
                return Err(format!(
                    "heap order broken between positions {} and {}",
                    Self::parent(position),
                    position
                ));
            }
        }
        Ok(())
    }

    fn parent(position: usize) -> usize {
        (position - 1) / 2
    }

    fn outranks(&self, arena: &FragmentArena, lhs: usize, rhs: usize) -> bool {
        arena[self.data[lhs]].outranks(&arena[self.data[rhs]])
    }

    fn swap(&mut self, arena: &mut FragmentArena, lhs: usize, rhs: usize) {
        self.data.swap(lhs, rhs);
        arena[self.data[lhs]].heap_index = lhs;
        arena[self.data[rhs]].heap_index = rhs;
    }

    fn sift_up(&mut self, arena: &mut FragmentArena, mut current: usize) {
        while current > 0 {
            let parent = Self::parent(current);
            if !self.outranks(arena, current, parent) {
                break;
            }
            self.swap(arena, current, parent);
            current = parent;
        }
    }

    fn sift_down(&mut self, arena: &mut FragmentArena, mut current: usize) {
        loop {
            let left = 2 * current + 1;
            if left >= self.data.len() {
                break;
            }
            let right = left + 1;
            let mut biggest = left;
            if right < self.data.len() && self.outranks(arena, right, left) {
                biggest = right;
            }
            if !self.outranks(arena, biggest, current) {
                break;
            }
            self.swap(arena, current, biggest);
            current = biggest;
        }
    }
}
