//! Error types for bftree
//!
//! Errors fall into two groups. Recoverable errors concern a single entry or
//! directory: they are reported on stderr and the traversal moves on. Fatal
//! errors end the run with a non-zero exit status.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Program name used as the prefix of every diagnostic line.
pub const PROGRAM_NAME: &str = "bftree";

#[derive(Error, Debug)]
pub enum Error {
    /// Metadata for an entry could not be obtained (dangling link, EACCES, ...)
    #[error("cannot access '{}': {source}", .path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory could not be opened for listing
    #[error("cannot open directory '{}': {source}", .path.display())]
    OpenDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the next entry out of an open directory failed
    #[error("cannot read entry in '{}': {source}", .path.display())]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}': Not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot determine current directory: {0}")]
    CurrentDir(#[source] io::Error),

    #[error("no user name for uid {0}")]
    UnknownUser(u32),

    #[error("no group name for gid {0}")]
    UnknownGroup(u32),

    #[error("error writing output: {0}")]
    Output(#[from] io::Error),

    #[error("error encoding JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error must stop the whole run.
    ///
    /// Resolution failures are recoverable while walking; the root is
    /// validated separately and any failure there is fatal regardless.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::Resolve { .. } | Error::OpenDir { .. } | Error::ReadEntry { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Write a diagnostic line for `error` to stderr.
pub fn report(error: &Error) {
    eprintln!("{}: Error: {}", PROGRAM_NAME, error);
}
