/*!
 * Fragment Arena
 * Address-ordered fragment sequence stored in a slot table
 *
 * Fragments are addressed by stable `FragmentId` handles. The sequence is a
 * doubly linked list threaded through the slots; vacated slots are chained
 * into a free-list and reused by the next insertion, so the table only grows
 * when every slot is in use.
 */

use super::fragment::Fragment;
use std::ops::{Index, IndexMut};

/// Stable handle to a fragment slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentId(usize);

impl FragmentId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Node {
    fragment: Fragment,
    prev: Option<FragmentId>,
    next: Option<FragmentId>,
}

#[derive(Debug, Clone)]
enum Slot {
    Occupied(Node),
    Vacant { next_vacant: Option<usize> },
}

#[derive(Debug, Clone, Default)]
pub struct FragmentArena {
    slots: Vec<Slot>,
    vacant_head: Option<usize>,
    head: Option<FragmentId>,
    tail: Option<FragmentId>,
    len: usize,
}

impl FragmentArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots ever created, live or vacant
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn head(&self) -> Option<FragmentId> {
        self.head
    }

    pub fn get(&self, id: FragmentId) -> Option<&Fragment> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(node)) => Some(&node.fragment),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: FragmentId) -> Option<&mut Fragment> {
        match self.slots.get_mut(id.0) {
            Some(Slot::Occupied(node)) => Some(&mut node.fragment),
            _ => None,
        }
    }

    pub fn contains(&self, id: FragmentId) -> bool {
        self.get(id).is_some()
    }

    pub fn prev(&self, id: FragmentId) -> Option<FragmentId> {
        self.node(id).prev
    }

    pub fn next(&self, id: FragmentId) -> Option<FragmentId> {
        self.node(id).next
    }

    /// Append a fragment at the end of the sequence
    pub fn push_back(&mut self, fragment: Fragment) -> FragmentId {
        let id = self.alloc_slot(Node {
            fragment,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Insert a fragment immediately after `id`
    pub fn insert_after(&mut self, id: FragmentId, fragment: Fragment) -> FragmentId {
        let next = self.node(id).next;
        let new_id = self.alloc_slot(Node {
            fragment,
            prev: Some(id),
            next,
        });
        self.node_mut(id).next = Some(new_id);
        match next {
            Some(next) => self.node_mut(next).prev = Some(new_id),
            None => self.tail = Some(new_id),
        }
        new_id
    }

    /// Unlink `id` from the sequence and release its slot
    pub fn remove(&mut self, id: FragmentId) -> Fragment {
        let vacant = Slot::Vacant {
            next_vacant: self.vacant_head,
        };
        let node = match std::mem::replace(&mut self.slots[id.0], vacant) {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("removing vacant fragment slot {}", id.0),
        };
        self.vacant_head = Some(id.0);
        self.len -= 1;

        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => self.tail = node.prev,
        }
        node.fragment
    }

    /// Walk the sequence in address order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            arena: self,
            cursor: self.head,
        }
    }

    fn alloc_slot(&mut self, node: Node) -> FragmentId {
        self.len += 1;
        match self.vacant_head {
            Some(index) => {
                if let Slot::Vacant { next_vacant } = self.slots[index] {
                    self.vacant_head = next_vacant;
                }
                self.slots[index] = Slot::Occupied(node);
                FragmentId(index)
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                FragmentId(self.slots.len() - 1)
            }
        }
    }

    fn node(&self, id: FragmentId) -> &Node {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("stale fragment handle {}", id.0),
        }
    }

    fn node_mut(&mut self, id: FragmentId) -> &mut Node {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("stale fragment handle {}", id.0),
        }
    }
}

impl Index<FragmentId> for FragmentArena {
    type Output = Fragment;

    fn index(&self, id: FragmentId) -> &Fragment {
        &self.node(id).fragment
    }
}

impl IndexMut<FragmentId> for FragmentArena {
    fn index_mut(&mut self, id: FragmentId) -> &mut Fragment {
        &mut self.node_mut(id).fragment
    }
}

pub struct Iter<'a> {
    arena: &'a FragmentArena,
    cursor: Option<FragmentId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (FragmentId, &'a Fragment);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.arena.node(id);
        self.cursor = node.next;
        Some((id, &node.fragment))
    }
}
