/*!
 * System Limits and Constants
 *
 * Centralized location for simulator-wide limits and magic numbers.
 */

use super::types::{Handle, Size};

// =============================================================================
// ADDRESS SPACE
// =============================================================================

/// Largest capacity accepted from a request stream (1 TiB)
/// Keeps every one-based handle representable as a positive `i64`
pub const MAX_CAPACITY: Size = 1 << 40;

/// Handle reported when no free fragment can satisfy a request
pub const ALLOCATION_FAILED: Handle = -1;

/// Offset added to a fragment start to form the reported handle
/// 0 is reserved by the request encoding, so handles start at 1
pub const HANDLE_BASE: Handle = 1;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Emit logs as JSON instead of the compact human format
pub const ENV_TRACE_JSON: &str = "MEMSIM_TRACE_JSON";

/// Validate every structural invariant after each request
pub const ENV_VERIFY: &str = "MEMSIM_VERIFY";

/// Print the final allocator statistics as JSON on stderr
pub const ENV_STATS_JSON: &str = "MEMSIM_STATS_JSON";

/// Log filter used when RUST_LOG is unset
/// stdout carries responses, so only warnings and errors reach stderr by default
pub const DEFAULT_LOG_FILTER: &str = "warn";
