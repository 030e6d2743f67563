//! Error types for lockgraph.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors. Anything that only degrades the graph is a
/// [`Warning`](crate::graph::Warning) instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The lockfile could not be read from disk.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The lockfile was read but is not a valid lockfile.
    #[error("failed to parse lockfile {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// `package.json` exists but is not valid JSON of the expected shape.
    #[error("failed to parse manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file is invalid.
    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Serialize(String),
}

pub type Result<T> = std::result::Result<T, Error>;
