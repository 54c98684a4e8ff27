/*!
 * Core
 * Shared type aliases and limits
 */

pub mod limits;
pub mod types;

pub use types::{Address, Handle, Ordinal, Size};
