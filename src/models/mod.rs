//! Shared types used across all modules.
//!
//! Core data structures for findings, per-file scan results, and the
//! resolved input mode. Other modules import from here rather than
//! reaching into each other's internals.

pub mod finding;

use std::path::PathBuf;

pub use finding::{Finding, ScanResult};

/// The resolved input mode for a scan.
#[derive(Debug, Clone)]
pub enum InputMode {
    /// Scan the files currently staged for commit (git index query).
    Staged,
    /// Read one candidate path per line from stdin.
    Stdin,
    /// Scan explicitly given files or directories.
    Paths(Vec<PathBuf>),
}
