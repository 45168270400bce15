// src/errors.rs

//! Crate-wide error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatwatchError {
    #[error("path does not exist: {}", path.display())]
    PathMissing { path: PathBuf },

    #[error("failed to read status of {}: {source}", path.display())]
    StatusRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown interpolation token '{token}'")]
    UnknownPlaceholder { token: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, StatwatchError>;
