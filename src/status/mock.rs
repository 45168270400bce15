// src/status/mock.rs

//! Scripted status source for tests.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::fields::WatchedField;
use super::sampler::{SampleOutcome, StatusSource};
use super::snapshot::StatusSnapshot;

/// One scripted sample. `Error` manufactures a permission-denied IO error
/// on delivery so the script itself stays cloneable.
#[derive(Debug, Clone)]
pub enum ScriptedSample {
    Status(StatusSnapshot),
    Missing,
    Error,
}

/// Status source that replays a per-path script, one entry per sample.
///
/// The final entry of a script repeats forever once the rest is consumed;
/// paths with no script at all report `Missing`.
#[derive(Debug, Default)]
pub struct MockStatusSource {
    scripts: Mutex<HashMap<PathBuf, VecDeque<ScriptedSample>>>,
}

impl MockStatusSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script<P: Into<PathBuf>>(self, path: P, samples: Vec<ScriptedSample>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(path.into(), samples.into());
        self
    }
}

impl StatusSource for MockStatusSource {
    fn sample(&self, path: &Path, _fields: &BTreeSet<WatchedField>) -> SampleOutcome {
        let mut scripts = self.scripts.lock().unwrap();
        let Some(queue) = scripts.get_mut(path) else {
            return SampleOutcome::Missing;
        };

        let sample = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };

        match sample {
            Some(ScriptedSample::Status(snapshot)) => SampleOutcome::Status(snapshot),
            Some(ScriptedSample::Missing) | None => SampleOutcome::Missing,
            Some(ScriptedSample::Error) => SampleOutcome::Error(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "scripted status error",
            )),
        }
    }
}
