// src/engine/watch_loop.rs

//! The poll/compare/trigger orchestrator.
//!
//! Single logical thread of control: sampling, comparison, interpolation
//! and command execution are sequential within one tick, so there is at
//! most one child process in flight and trigger side effects are
//! reproducible in configuration order. The only suspension point is the
//! tick wait, which is raced against the shutdown signal.

use std::fs;
use std::path::Path;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::errors::{Result, StatwatchError};
use crate::exec::CommandRunner;
use crate::interp::{self, CommandTemplate};
use crate::status::{SampleOutcome, StatusSnapshot, StatusSource, changed_fields};
use crate::types::{LoopOutcome, WatchTarget};

use super::policy::{Decision, RunPolicy};
use super::timeout::{Expiry, TimeoutGovernor};

/// Loop-level knobs that do not belong to any one component.
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Time between polls of the same target.
    pub interval: Duration,
    /// Run the command once per target after the first sample (`-0`).
    pub initial_run: bool,
    /// Tolerate missing/unreadable paths instead of treating them as
    /// fatal (`-r`).
    pub retry: bool,
}

/// Per-target poll state: the configuration unit plus its comparison
/// baseline. The baseline is absent only before the first successful
/// sample (possible past startup only under `--retry`).
#[derive(Debug)]
struct TargetState {
    target: WatchTarget,
    baseline: Option<StatusSnapshot>,
}

/// Why the tick wait returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WaitOutcome {
    TickElapsed,
    Interrupted,
}

/// Drives the whole watch: owns the per-target state table, the run
/// policy and the timeout governor, and decides the loop outcome that
/// becomes the process exit code.
pub struct WatchLoop<S, R> {
    source: S,
    runner: R,
    targets: Vec<TargetState>,
    template: CommandTemplate,
    delim: Option<String>,
    policy: RunPolicy,
    governor: TimeoutGovernor,
    options: WatchOptions,
}

impl<S: StatusSource, R: CommandRunner> WatchLoop<S, R> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: S,
        runner: R,
        targets: Vec<WatchTarget>,
        template: CommandTemplate,
        delim: Option<String>,
        policy: RunPolicy,
        governor: TimeoutGovernor,
        options: WatchOptions,
    ) -> Self {
        let targets = targets
            .into_iter()
            .map(|target| TargetState {
                target,
                baseline: None,
            })
            .collect();
        Self {
            source,
            runner,
            targets,
            template,
            delim,
            policy,
            governor,
            options,
        }
    }

    pub async fn run(mut self) -> Result<LoopOutcome> {
        if let Some(outcome) = self.initialize().await? {
            return Ok(outcome);
        }
        self.poll().await
    }

    /// Establish baselines and fire `-0` initial runs.
    ///
    /// A failed sample is fatal here unless `--retry` is set; with retry
    /// the target simply starts without a baseline. Initial runs happen
    /// once per target whose first sample succeeded and are excluded from
    /// the run limit, but a failed initial run still halts the process
    /// unless forced.
    async fn initialize(&mut self) -> Result<Option<LoopOutcome>> {
        for idx in 0..self.targets.len() {
            let path = self.targets[idx].target.path.clone();
            match self.source.sample(&path, &self.targets[idx].target.fields) {
                SampleOutcome::Status(snapshot) => {
                    debug!(path = %path.display(), "baseline established");
                    self.targets[idx].baseline = Some(snapshot);
                }
                SampleOutcome::Missing => {
                    if !self.options.retry {
                        return Err(StatwatchError::PathMissing { path });
                    }
                    debug!(path = %path.display(), "missing at startup, will retry");
                }
                SampleOutcome::Error(source) => {
                    if !self.options.retry {
                        return Err(StatwatchError::StatusRead { path, source });
                    }
                    warn!(path = %path.display(), error = %source, "status read failed at startup, will retry");
                }
            }
        }

        if self.options.initial_run {
            for idx in 0..self.targets.len() {
                let Some(snapshot) = self.targets[idx].baseline.clone() else {
                    continue;
                };
                let path = self.targets[idx].target.path.clone();
                info!(path = %path.display(), "initial run");
                let success = self.execute(&path, &snapshot).await?;
                if !success && !self.policy.force() {
                    return Ok(Some(LoopOutcome::CommandFailed));
                }
            }
        }

        Ok(None)
    }

    /// Tick loop: wait, re-check deadlines, poll every target once.
    async fn poll(&mut self) -> Result<LoopOutcome> {
        loop {
            let now = Instant::now();
            if let Some(expiry) = self.governor.check(now) {
                return Ok(expiry_outcome(expiry));
            }

            let wait = self.governor.clamp_wait(now, self.options.interval);
            if let WaitOutcome::Interrupted = self.wait(wait).await {
                info!("interrupted, shutting down");
                return Ok(LoopOutcome::Interrupted);
            }

            if let Some(expiry) = self.governor.check(Instant::now()) {
                return Ok(expiry_outcome(expiry));
            }

            if let Some(outcome) = self.poll_targets_once().await? {
                return Ok(outcome);
            }
        }
    }

    /// One pass over all targets, in configuration order.
    ///
    /// Returns a halting outcome as soon as one is decided; the first
    /// halting target wins and the remaining targets in the tick are not
    /// processed.
    async fn poll_targets_once(&mut self) -> Result<Option<LoopOutcome>> {
        for idx in 0..self.targets.len() {
            let path = self.targets[idx].target.path.clone();
            let fields = self.targets[idx].target.fields.clone();

            let current = match self.source.sample(&path, &fields) {
                SampleOutcome::Status(snapshot) => snapshot,
                SampleOutcome::Missing => {
                    if self.options.retry {
                        debug!(path = %path.display(), "missing, skipped this tick");
                        continue;
                    }
                    return Err(StatwatchError::PathMissing { path });
                }
                SampleOutcome::Error(source) => {
                    if self.options.retry {
                        warn!(path = %path.display(), error = %source, "status read failed, skipped this tick");
                        continue;
                    }
                    return Err(StatwatchError::StatusRead { path, source });
                }
            };

            // The baseline advances on every successful sample, triggered
            // or not; a previously failed target establishes its baseline
            // here without triggering.
            let previous = self.targets[idx].baseline.replace(current.clone());
            let diff = changed_fields(previous.as_ref(), &current, &fields);
            if diff.is_empty() || !self.policy.should_run() {
                continue;
            }

            info!(path = %path.display(), fields = ?diff, "change detected, running command");
            if let Some(previous) = &previous {
                for field in &diff {
                    if let (Some(old), Some(new)) = (previous.value(*field), current.value(*field))
                    {
                        debug!(field = %field, old, new, "field changed");
                    }
                }
            }

            let success = self.execute(&path, &current).await?;
            let now = Instant::now();
            if success {
                self.governor.note_success(now);
            }

            match self.policy.record_run(success) {
                Decision::Continue => {}
                Decision::HaltSuccess => return Ok(Some(LoopOutcome::Completed)),
                Decision::HaltFailure => {
                    warn!(path = %path.display(), "command failed, halting");
                    return Ok(Some(LoopOutcome::CommandFailed));
                }
            }

            // Commands may take long; don't let a slow run mask a
            // deadline until the next tick.
            if let Some(expiry) = self.governor.check(now) {
                return Ok(Some(expiry_outcome(expiry)));
            }
        }

        Ok(None)
    }

    /// Render and execute the command for one triggering target.
    async fn execute(&mut self, path: &Path, snapshot: &StatusSnapshot) -> Result<bool> {
        // The `path` placeholder substitutes the real filesystem path,
        // which may differ from the configured string under symlinks.
        let real_path = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let argv = interp::render(&self.template, self.delim.as_deref(), snapshot, &real_path)?;

        debug!(argv = ?argv, "executing");
        let success = self.runner.run(argv).await?;
        if !success {
            warn!(path = %path.display(), "command exited unsuccessfully");
        }
        Ok(success)
    }

    /// Single cancellable wait primitive: the tick sleep raced against
    /// the shutdown signal.
    async fn wait(&self, wait: Duration) -> WaitOutcome {
        tokio::select! {
            _ = tokio::time::sleep(wait) => WaitOutcome::TickElapsed,
            _ = tokio::signal::ctrl_c() => WaitOutcome::Interrupted,
        }
    }
}

fn expiry_outcome(expiry: Expiry) -> LoopOutcome {
    match expiry {
        Expiry::Hard => LoopOutcome::HardTimeout,
        Expiry::Soft => LoopOutcome::SoftTimeout,
    }
}
