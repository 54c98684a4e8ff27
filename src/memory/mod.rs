/*!
 * Memory Module
 * Worst-fit address space simulation
 */

pub mod address_space;
pub mod arena;
pub mod fragment;
pub mod heap;
pub mod manager;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use address_space::AddressSpace;
pub use arena::{FragmentArena, FragmentId};
pub use fragment::Fragment;
pub use heap::IndexedMaxHeap;
pub use manager::MemoryManager;
pub use traits::*;
pub use types::*;
