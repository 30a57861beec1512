//! buildcheck core — checks, result log, orchestrator, and reporter.
//!
//! Verifies a server project without credentials or network access: its
//! files are in place, its dependencies are declared, it builds, a config
//! survives a disk round-trip, and its source mentions what it must
//! implement.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`result`]: Check outcomes and the append-only result log
//! - [`check`]: The `Check` trait and the project under test
//! - [`checks`]: The five built-in checks
//! - [`harness`]: Sequential orchestrator
//! - [`report`]: Console rendering and exit-code decision
//! - [`util`]: File, path, and subprocess utilities

#![doc = include_str!("../README.md")]

pub mod check;
pub mod checks;
pub mod error;
pub mod harness;
pub mod report;
pub mod result;
pub mod util;

// Re-export key types at crate root for convenience
pub use check::{Check, Project};
pub use error::{Error, Result};
pub use harness::{Harness, HarnessSettings};
pub use report::Summary;
pub use result::{CheckResult, ResultLog};
