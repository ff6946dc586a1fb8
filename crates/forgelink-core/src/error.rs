//! Error types for forgelink.

use thiserror::Error;

/// Main error type for forgelink operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No configured endpoint matched any remote
    #[error("no configured host matches the repository remotes (tried: {})", candidates.join(", "))]
    NoMatchingHost { candidates: Vec<String> },

    /// Repository path without a project segment
    #[error("malformed repository path '{path}': expected '<project>/<repo>'")]
    MalformedRepoPath { path: String },

    /// The executable could not be started
    #[error("failed to start '{command}': {source}")]
    ProcessSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A command exited non-zero
    #[error("command '{command}' failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for forgelink operations.
pub type Result<T> = std::result::Result<T, Error>;
