// src/exec/mock.rs

//! Recording runner for tests.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use crate::errors::Result;

use super::CommandRunner;

/// Records every argv it is asked to run and replies from a scripted
/// result queue; once the queue is exhausted, every run succeeds.
///
/// Clones share state, so a test can hand one clone to the loop and keep
/// another to inspect what was executed.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    executed: Arc<Mutex<Vec<Vec<String>>>>,
    results: Arc<Mutex<VecDeque<bool>>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue explicit results for the next runs (true = success).
    pub fn with_results<I: IntoIterator<Item = bool>>(self, results: I) -> Self {
        self.results.lock().unwrap().extend(results);
        self
    }

    pub fn executed(&self) -> Vec<Vec<String>> {
        self.executed.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, argv: Vec<String>) -> Pin<Box<dyn Future<Output = Result<bool>> + Send + '_>> {
        let executed = Arc::clone(&self.executed);
        let results = Arc::clone(&self.results);
        Box::pin(async move {
            executed.lock().unwrap().push(argv);
            Ok(results.lock().unwrap().pop_front().unwrap_or(true))
        })
    }
}
