// src/error.rs

//! Error type [`TailError`] shared by the readers and the driver program.
//!
//! Every variant is fatal; the driver program prints it and exits after the
//! store connection is closed. A poll that returns zero rows is not an error.

use std::io::ErrorKind;

use ::thiserror::Error;

use crate::common::{ENV_VAR_FWDB, FPath};

/// Errors of the event tailing engine.
#[derive(Debug, Error)]
pub enum TailError {
    /// The override environment variable is set but the file it names
    /// cannot be read.
    #[error("Environment variable {var} points to a location that isn't readable: {value}")]
    StoreOverrideUnreadable { var: &'static str, value: String },

    /// No override was given and the conventional path is not readable.
    #[error("Failed to find cislogs.sdb at {path:?}, set the {env} environment variable to the location of the file", env = ENV_VAR_FWDB)]
    StoreNotFound { path: FPath },

    #[error("Failed to open SQLite3 database {path:?}: {source}")]
    StoreOpen {
        path: FPath,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to prepare statement: {sql}: {source}")]
    StorePrepare {
        sql: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to sql-bind value: {value} for sql: {sql}: {source}")]
    StoreBind {
        value: i64,
        sql: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// Stepping the statement or reading a column failed.
    #[error("Failed to read rows for sql: {sql}: {source}")]
    StoreQuery {
        sql: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to close SQLite3 database: {0}")]
    StoreClose(#[source] rusqlite::Error),

    /// Writing a row to the output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// A state that should never be reached. A defect, not a user error.
    #[error("Bug found! {0}. Please notify the author about this.")]
    Internal(String),
}

impl TailError {
    /// Is this a problem with user-supplied configuration (as opposed to
    /// store access or output)?
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            TailError::StoreOverrideUnreadable { .. } | TailError::StoreNotFound { .. }
        )
    }

    /// The output was closed by the reader, e.g. `tail-comodo -a | head`.
    pub fn is_broken_pipe(&self) -> bool {
        match self {
            TailError::Output(err) => err.kind() == ErrorKind::BrokenPipe,
            _ => false,
        }
    }
}

/// [`Result`] of tailing engine operations.
///
/// [`Result`]: std::result::Result
pub type TailResult<T> = std::result::Result<T, TailError>;
