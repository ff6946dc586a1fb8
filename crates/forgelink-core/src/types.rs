//! Common types shared across forgelink crates.

use serde::{Deserialize, Serialize};

/// Family of a hosting provider, deciding its URL construction rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderFamily {
    /// Multi-tenant cloud hosting; owner/repo paths are used verbatim.
    Cloud,
    /// Self-hosted server; paths split into an uppercase project key and a repo.
    Server,
}

impl ProviderFamily {
    /// Short label used in logs and resolved host names.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderFamily::Cloud => "cloud",
            ProviderFamily::Server => "server",
        }
    }
}

/// A configured hosting endpoint.
///
/// Endpoints are handed to the resolver in configuration order; earlier
/// endpoints win over later ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteEndpoint {
    /// Provider family
    pub family: ProviderFamily,
    /// Host matched (as a literal) against remote URLs
    pub match_host: String,
    /// Host used when building web URLs
    pub display_host: String,
}

/// Captured outcome of one external command run to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code reported by the process (-1 when killed by a signal)
    pub exit_code: i32,
    /// Accumulated standard output
    pub stdout: String,
    /// Accumulated standard error
    pub stderr: String,
}

impl CommandResult {
    /// Whether the process exited with code zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
