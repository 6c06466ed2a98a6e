//! Error taxonomy for a generation run
//!
//! `Conflict` and `Resolution` abort a run before anything touches the disk.
//! `Write` aborts a run that has already started writing; files written so far
//! are left in place. `VcsError` is kept separate because it never fails a run.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Fatal errors raised while preparing or emitting a project
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The project name cannot be used as a directory or package name
    #[error("invalid project name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// The target directory already exists
    #[error("directory {} already exists", path.display())]
    Conflict { path: PathBuf },

    /// A dependency version could not be resolved from the registry
    #[error("could not resolve latest version of '{package}': {reason}")]
    Resolution { package: String, reason: String },

    /// A directory or file could not be written
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GenerateError {
    pub(crate) fn resolution(package: &str, reason: impl ToString) -> Self {
        Self::Resolution {
            package: package.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

/// Repository initialization failures, reported as warnings only
#[derive(Debug, Error)]
pub enum VcsError {
    #[error("failed to run `{program} {args}`")]
    Spawn {
        program: String,
        args: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program} {args}` exited with code {code}: {stderr}")]
    Failed {
        program: String,
        args: String,
        code: i32,
        stderr: String,
    },

    #[error("`{program} {args}` did not finish within {} seconds", timeout.as_secs())]
    TimedOut {
        program: String,
        args: String,
        timeout: Duration,
    },
}
