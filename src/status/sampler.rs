// src/status/sampler.rs

//! The stat call behind a trait, so the loop can be driven by a scripted
//! source in tests.

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::Path;

use super::fields::WatchedField;
use super::snapshot::StatusSnapshot;

/// Outcome of one stat attempt.
///
/// `Missing` (the path does not exist) is distinct from `Error` (permission
/// denied or any other OS-level failure); retry semantics treat both the
/// same way, but diagnostics and startup errors report them differently.
#[derive(Debug)]
pub enum SampleOutcome {
    Status(StatusSnapshot),
    Missing,
    Error(io::Error),
}

/// Abstract status source.
///
/// Production code uses [`RealStatusSource`]; tests use
/// [`super::mock::MockStatusSource`] with scripted per-path outcomes.
pub trait StatusSource: Send + Debug {
    /// Sample the watched fields of `path`. Never panics; all failure
    /// modes are folded into the outcome.
    fn sample(&self, path: &Path, fields: &BTreeSet<WatchedField>) -> SampleOutcome;
}

/// Implementation that uses `std::fs::metadata` (follows symlinks).
#[derive(Debug, Clone, Default)]
pub struct RealStatusSource;

impl StatusSource for RealStatusSource {
    fn sample(&self, path: &Path, fields: &BTreeSet<WatchedField>) -> SampleOutcome {
        match fs::metadata(path) {
            Ok(meta) => SampleOutcome::Status(StatusSnapshot::capture(&meta, fields)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => SampleOutcome::Missing,
            Err(err) => SampleOutcome::Error(err),
        }
    }
}
