// src/lib.rs

pub mod cli;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod interp;
pub mod logging;
pub mod status;
pub mod types;

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::engine::{RunPolicy, TimeoutGovernor, WatchLoop, WatchOptions};
use crate::errors::Result;
use crate::exec::ProcessRunner;
use crate::interp::CommandTemplate;
use crate::status::RealStatusSource;
use crate::types::{LoopOutcome, WatchTarget};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the command template and its startup validation
/// - run policy and timeout deadlines
/// - the poll loop over the real status source and process runner
pub async fn run(args: CliArgs, targets: Vec<WatchTarget>) -> Result<LoopOutcome> {
    let template = CommandTemplate::new(args.command.clone(), args.args.clone());
    let delim = args.interp.clone().filter(|d| !d.is_empty());

    // Surface bad placeholders before any polling begins.
    interp::validate(&template, delim.as_deref(), &targets)?;

    info!(
        targets = targets.len(),
        interval_ms = args.interval,
        "starting watch"
    );
    for target in &targets {
        debug!(path = %target.path.display(), fields = ?target.fields, "watching");
    }

    let policy = RunPolicy::new(args.limit, args.force);
    // A zero timeout means "no deadline", same as leaving the flag off.
    let governor = TimeoutGovernor::new(
        Instant::now(),
        args.timeout.filter(|n| *n > 0).map(Duration::from_secs),
        args.softtimeout.filter(|n| *n > 0).map(Duration::from_secs),
    );
    let options = WatchOptions {
        interval: Duration::from_millis(args.interval),
        initial_run: args.initial_run,
        retry: args.effective_retry(),
    };

    let watch_loop = WatchLoop::new(
        RealStatusSource,
        ProcessRunner,
        targets,
        template,
        delim,
        policy,
        governor,
        options,
    );
    watch_loop.run().await
}
