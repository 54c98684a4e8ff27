/*!
 * Memory Types
 * Common types for the allocator simulator
 */

use crate::core::limits::{ALLOCATION_FAILED, HANDLE_BASE};
use crate::core::types::{Address, Handle, Ordinal, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Out of memory: requested {requested} bytes, largest free fragment is {largest_free} bytes")]
    OutOfMemory { requested: Size, largest_free: Size },

    #[error("Zero-sized allocation request")]
    ZeroSize,

    #[error("Memory corruption detected: {0}")]
    CorruptionDetected(String),
}

/// A single request of the input stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryRequest {
    /// Reserve `size` bytes
    Allocate(Size),
    /// Release whatever the request at this ordinal allocated
    Free(Ordinal),
}

/// Outcome of an allocation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryResponse {
    pub data: Handle,
}

impl MemoryResponse {
    pub fn new(data: Handle) -> Self {
        Self { data }
    }

    pub fn failed() -> Self {
        Self::new(ALLOCATION_FAILED)
    }

    pub fn is_failure(&self) -> bool {
        self.data == ALLOCATION_FAILED
    }

    /// Zero-based start of the allocated fragment, if the request succeeded
    pub fn address(&self) -> Option<Address> {
        if self.data >= HANDLE_BASE {
            Some((self.data - HANDLE_BASE) as Address)
        } else {
            None
        }
    }
}

impl From<MemoryResult<Address>> for MemoryResponse {
    fn from(result: MemoryResult<Address>) -> Self {
        match result {
            Ok(address) => Self::new(address as Handle + HANDLE_BASE),
            Err(_) => Self::failed(),
        }
    }
}

/// Memory statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub capacity: Size,
    pub used_memory: Size,
    pub available_memory: Size,
    pub fragments: usize,
    pub free_fragments: usize,
    pub largest_free: Size,
    pub requests: usize,
    pub failed_allocations: usize,
}

impl MemoryStats {
    /// Share of free bytes that sit outside the largest free fragment, in percent
    pub fn fragmentation_percentage(&self) -> f64 {
        if self.available_memory == 0 {
            return 0.0;
        }
        let scattered = self.available_memory - self.largest_free;
        scattered as f64 / self.available_memory as f64 * 100.0
    }
}
