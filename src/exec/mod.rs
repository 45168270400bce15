// src/exec/mod.rs

//! Child-process execution behind a pluggable trait.
//!
//! The loop talks to a [`CommandRunner`] instead of spawning directly.
//! Production code uses [`ProcessRunner`]; tests use
//! [`mock::RecordingRunner`], which records argv vectors without spawning
//! anything.

pub mod mock;

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, error};

use crate::errors::Result;

/// Trait abstracting how the triggered command is executed.
///
/// Returns whether the child exited successfully. The implementation is
/// expected to block the loop until the child is done; overlapping
/// executions are never requested.
pub trait CommandRunner: Send {
    fn run(&mut self, argv: Vec<String>) -> Pin<Box<dyn Future<Output = Result<bool>> + Send + '_>>;
}

/// Real runner: spawns the command with inherited standard streams and
/// waits for it to exit. Output is not captured.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&mut self, argv: Vec<String>) -> Pin<Box<dyn Future<Output = Result<bool>> + Send + '_>> {
        Box::pin(async move {
            let (program, args) = argv.split_first().context("empty argv")?;
            debug!(program = %program, ?args, "spawning command");

            let mut command = Command::new(program);
            command
                .args(args)
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());

            // A spawn failure (e.g. command not found) counts as an
            // unsuccessful run; --force decides whether the loop
            // survives it, same as a non-zero exit.
            let mut child = match command.spawn() {
                Ok(child) => child,
                Err(err) => {
                    error!(program = %program, error = %err, "failed to spawn command");
                    return Ok(false);
                }
            };

            let status = child
                .wait()
                .await
                .with_context(|| format!("waiting for '{program}'"))?;
            Ok(status.success())
        })
    }
}
