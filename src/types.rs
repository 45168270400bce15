// src/types.rs

//! Shared types used across the CLI, interpolator and engine.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::status::WatchedField;

/// One watched (path, field-set) configuration unit.
///
/// The path is kept exactly as supplied on the command line; it is only
/// canonicalized when rendered through the `path` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    pub path: PathBuf,
    pub fields: BTreeSet<WatchedField>,
}

/// How the watch loop ended. Maps directly to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopOutcome {
    /// The run limit was reached.
    Completed,
    /// The hard `--timeout` deadline elapsed.
    HardTimeout,
    /// The `--softtimeout` deadline elapsed with no successful run.
    SoftTimeout,
    /// Shutdown signal received while waiting for the next tick.
    Interrupted,
    /// The command exited unsuccessfully and `--force` was not given.
    CommandFailed,
}

impl LoopOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            LoopOutcome::Completed | LoopOutcome::HardTimeout | LoopOutcome::Interrupted => 0,
            LoopOutcome::SoftTimeout => 3,
            LoopOutcome::CommandFailed => 1,
        }
    }
}
