//! Utility modules for file operations, path handling, and subprocesses.
//!
//! # Modules
//!
//! - [`files`]: Async file probing, reading, and JSON round-tripping
//! - [`paths`]: Project root discovery
//! - [`process`]: Awaitable subprocess execution with captured output

pub mod files;
pub mod paths;
pub mod process;
