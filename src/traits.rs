//! Core traits for dependency injection and testability
//!
//! The dispatcher never touches processes or the filesystem directly. It
//! goes through these traits so tests can substitute recording or failing
//! doubles for the real implementations in `backends::command_exec` and
//! `system`.

use crate::core::types::{CommandOutput, ResolvedOperation};
use crate::error::Result;
use std::io;
use std::path::Path;

/// Runs a resolved command and captures what it printed.
///
/// Implementations must pass every argument as a discrete token, never
/// through a shell, and must not change the working directory.
pub trait CommandRunner: Send + Sync {
    /// Run to completion. An `Err` means the command could not be
    /// launched or did not finish; a non-zero exit is still `Ok`.
    fn run(&self, operation: &ResolvedOperation) -> Result<CommandOutput>;
}

/// Filesystem primitives used by detection and cleanup
pub trait ProjectFs: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Whole file as text; empty when missing or unreadable
    fn read_text(&self, path: &Path) -> String;

    /// Delete a file or a directory tree
    fn remove_recursive(&self, path: &Path) -> io::Result<()>;
}
