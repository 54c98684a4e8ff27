/*!
 * Memory Traits
 * Allocator abstractions driven by the request processor
 */

use super::types::*;
use crate::core::types::{Handle, Ordinal, Size};

/// Ordinal-addressed allocator interface
///
/// Every call consumes exactly one history slot, so the ordinal passed to
/// `free` is the position of the referenced call among all calls made.
pub trait Allocator {
    /// Reserve `size` bytes; returns a one-based address or -1
    fn allocate(&mut self, size: Size) -> Handle;

    /// Release the block created by the request at `ordinal`
    ///
    /// Freeing a failed, already freed or non-allocating request is a no-op.
    fn free(&mut self, ordinal: Ordinal);
}

/// Memory statistics provider
pub trait MemoryInfo {
    /// Total size of the address space
    fn capacity(&self) -> Size;

    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Check every structural invariant, reporting the first violation
    fn validate(&self) -> MemoryResult<()> {
        Ok(())
    }
}
