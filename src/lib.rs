/*!
 * memsim
 * Worst-fit storage allocator simulator exposed as a library
 */

pub mod config;
pub mod core;
pub mod io;
pub mod memory;
pub mod monitoring;

// Re-exports
pub use config::{ConfigError, SimulatorConfig};
pub use io::{parse_requests, read_requests, write_responses, InputError, RequestStream};
pub use memory::{
    AddressSpace, Allocator, MemoryError, MemoryInfo, MemoryManager, MemoryRequest,
    MemoryResponse, MemoryResult, MemoryStats,
};
pub use monitoring::{init_tracing, RunSpan};
