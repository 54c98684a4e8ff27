/*!
 * Core Types
 * Common types used across the simulator
 */

/// Offset into the simulated address space (zero-based)
pub type Address = usize;

/// Size type for memory operations
pub type Size = usize;

/// Position of a request within the served request sequence
pub type Ordinal = usize;

/// Value reported back for an allocation request: one-based address, or -1
pub type Handle = i64;
