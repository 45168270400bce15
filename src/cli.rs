// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.
//!
//! The ten status-field options are repeatable and their command-line
//! order is significant (targets trigger in configuration order), so the
//! watch targets are rebuilt from the raw `ArgMatches` indices rather
//! than from the derived per-option vectors.

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser};

use crate::status::WatchedField;
use crate::types::WatchTarget;

/// Command-line arguments for `statwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "statwatch",
    version,
    about = "Execute a command whenever a file's status changes.",
    long_about = None
)]
pub struct CliArgs {
    /// Watch PATH for modification time changes.
    #[arg(short = 'm', long = "mtime", value_name = "PATH", action = ArgAction::Append, help_heading = "Status fields")]
    pub mtime: Vec<PathBuf>,

    /// Watch PATH for access time changes.
    #[arg(short = 'a', long = "atime", value_name = "PATH", action = ArgAction::Append, help_heading = "Status fields")]
    pub atime: Vec<PathBuf>,

    /// Watch PATH for status time changes.
    #[arg(short = 'c', long = "ctime", value_name = "PATH", action = ArgAction::Append, help_heading = "Status fields")]
    pub ctime: Vec<PathBuf>,

    /// Watch PATH for device ID changes.
    #[arg(short = 'd', long = "dev", value_name = "PATH", action = ArgAction::Append, help_heading = "Status fields")]
    pub dev: Vec<PathBuf>,

    /// Watch PATH for inode number changes.
    #[arg(short = 'i', long = "ino", value_name = "PATH", action = ArgAction::Append, help_heading = "Status fields")]
    pub ino: Vec<PathBuf>,

    /// Watch PATH for protection mode changes.
    #[arg(short = 'M', long = "mode", value_name = "PATH", action = ArgAction::Append, help_heading = "Status fields")]
    pub mode: Vec<PathBuf>,

    /// Watch PATH for hard link count changes.
    #[arg(short = 'n', long = "nlink", value_name = "PATH", action = ArgAction::Append, help_heading = "Status fields")]
    pub nlink: Vec<PathBuf>,

    /// Watch PATH for owner user ID changes.
    #[arg(short = 'u', long = "uid", value_name = "PATH", action = ArgAction::Append, help_heading = "Status fields")]
    pub uid: Vec<PathBuf>,

    /// Watch PATH for owner group ID changes.
    #[arg(short = 'g', long = "gid", value_name = "PATH", action = ArgAction::Append, help_heading = "Status fields")]
    pub gid: Vec<PathBuf>,

    /// Watch PATH for total size changes.
    #[arg(short = 's', long = "size", value_name = "PATH", action = ArgAction::Append, help_heading = "Status fields")]
    pub size: Vec<PathBuf>,

    /// Run the command once after the first status poll. Does not count
    /// towards the -l run limit; runs once for each watched path.
    #[arg(short = '0', long = "initial-run", help_heading = "General options")]
    pub initial_run: bool,

    /// Limit to N runs of the command. 0 means no limit.
    #[arg(
        short = 'l',
        long = "limit",
        value_name = "N",
        default_value_t = 1,
        help_heading = "General options"
    )]
    pub limit: u64,

    /// Poll the status every N milliseconds.
    #[arg(
        short = 't',
        long = "interval",
        value_name = "N",
        default_value_t = 1000,
        help_heading = "General options"
    )]
    pub interval: u64,

    /// Exit (code 0) after N seconds.
    #[arg(long = "timeout", value_name = "N", help_heading = "General options")]
    pub timeout: Option<u64>,

    /// Exit (code 3) after N seconds if the command has not been run.
    #[arg(long = "softtimeout", value_name = "N", help_heading = "General options")]
    pub softtimeout: Option<u64>,

    /// Keep watching even if the command fails. Implies -r and -l 0.
    #[arg(short = 'f', long = "force", help_heading = "General options")]
    pub force: bool,

    /// Keep watching even if the file does not exist yet.
    #[arg(short = 'r', long = "retry", help_heading = "General options")]
    pub retry: bool,

    /// Interpolate command args by replacing DELIM|X|DELIM with values
    /// from the file's status. X is a short or long option name from
    /// 'Status fields', or the keyword 'path' to substitute the (real)
    /// path of the triggering file.
    #[arg(short = 'I', long = "interp", value_name = "DELIM", help_heading = "General options")]
    pub interp: Option<String>,

    /// Echo a diagnostic to stderr whenever the trigger is hit. Repeatable.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, help_heading = "General options")]
    pub verbose: u8,

    /// Command to run when status changes.
    pub command: String,

    /// Args passed to the command. Interpreted specially with -I.
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

impl CliArgs {
    /// `--force` implies retry, regardless of the literal `-r` flag.
    /// (The matching limit normalization lives in `RunPolicy::new`.)
    pub fn effective_retry(&self) -> bool {
        self.retry || self.force
    }
}

/// Parse the process arguments into flags plus the ordered watch targets.
///
/// Exits the process with a usage error when no status-field option named
/// a path.
pub fn parse() -> (CliArgs, Vec<WatchTarget>) {
    let matches = CliArgs::command().get_matches();
    let args = match CliArgs::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(err) => err.exit(),
    };

    let targets = watch_targets(&matches);
    if targets.is_empty() {
        CliArgs::command()
            .error(ErrorKind::MissingRequiredArgument, "no paths to watch")
            .exit();
    }

    (args, targets)
}

/// Rebuild (path, field-set) targets in command-line order.
///
/// Occurrences naming the same literal path merge into one target at the
/// position of the path's first occurrence; distinct strings stay
/// distinct targets even when they resolve to the same file.
pub fn watch_targets(matches: &ArgMatches) -> Vec<WatchTarget> {
    let mut occurrences: Vec<(usize, WatchedField, PathBuf)> = Vec::new();

    for field in WatchedField::ALL {
        let Some(indices) = matches.indices_of(field.long()) else {
            continue;
        };
        let Some(paths) = matches.get_many::<PathBuf>(field.long()) else {
            continue;
        };
        for (index, path) in indices.zip(paths) {
            occurrences.push((index, field, path.clone()));
        }
    }

    occurrences.sort_by_key(|(index, _, _)| *index);

    let mut targets: Vec<WatchTarget> = Vec::new();
    for (_, field, path) in occurrences {
        match targets.iter_mut().find(|t| t.path == path) {
            Some(target) => {
                target.fields.insert(field);
            }
            None => targets.push(WatchTarget {
                path,
                fields: BTreeSet::from([field]),
            }),
        }
    }
    targets
}
