// src/engine/policy.rs

//! Run-count and failure policy.

use tracing::debug;

/// What the loop should do after recording a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Continue,
    HaltSuccess,
    HaltFailure,
}

/// Tracks completed trigger runs against the configured limit.
///
/// `--force` normalizes the policy once at construction: failures are
/// tolerated and the limit becomes unlimited regardless of the literal
/// `-l` value supplied.
#[derive(Debug, Clone)]
pub struct RunPolicy {
    limit: u64,
    force: bool,
    runs_completed: u64,
}

impl RunPolicy {
    pub fn new(limit: u64, force: bool) -> Self {
        Self {
            limit: if force { 0 } else { limit },
            force,
            runs_completed: 0,
        }
    }

    pub fn force(&self) -> bool {
        self.force
    }

    pub fn runs_completed(&self) -> u64 {
        self.runs_completed
    }

    /// True while the run limit has not been reached (0 = unlimited).
    pub fn should_run(&self) -> bool {
        self.limit == 0 || self.runs_completed < self.limit
    }

    /// Record an attempted run and decide whether the loop continues.
    ///
    /// Only triggered runs are recorded here; `-0` initial runs do not
    /// count towards the limit. A failed run halts with failure unless
    /// forced; a reached limit halts with success.
    pub fn record_run(&mut self, success: bool) -> Decision {
        self.runs_completed += 1;

        if !success && !self.force {
            return Decision::HaltFailure;
        }
        if self.limit != 0 && self.runs_completed >= self.limit {
            debug!(
                runs = self.runs_completed,
                limit = self.limit,
                "run limit reached"
            );
            return Decision::HaltSuccess;
        }
        Decision::Continue
    }
}
