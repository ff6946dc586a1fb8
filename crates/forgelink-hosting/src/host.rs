use forgelink_core::{Error, ProviderFamily, Result};

use crate::{cloud, server};

/// Family-specific data carried by a resolved host.
///
/// The server variant stores the project/repo split performed once at
/// construction, so every URL method below stays an infallible pure function
/// of the host's own fields.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HostKind {
    Cloud,
    Server { project: String, repo: String },
}

/// A remote successfully classified against a configured endpoint.
///
/// Immutable and owned by the caller that requested resolution; no state is
/// shared between instances.
#[derive(Debug, Clone)]
pub struct ResolvedHost {
    name: &'static str,
    match_host: String,
    display_host: String,
    repo_path: String,
    kind: HostKind,
}

impl ResolvedHost {
    /// Build a host for a matched endpoint and repository path.
    ///
    /// Fails with `MalformedRepoPath` when a server path carries no project
    /// segment.
    pub fn new(
        family: ProviderFamily,
        match_host: impl Into<String>,
        display_host: impl Into<String>,
        repo_path: impl Into<String>,
    ) -> Result<Self> {
        let repo_path = repo_path.into();

        let kind = match family {
            ProviderFamily::Cloud => HostKind::Cloud,
            ProviderFamily::Server => {
                let (project, repo) = repo_path
                    .split_once('/')
                    .filter(|(project, repo)| !project.is_empty() && !repo.is_empty())
                    .ok_or_else(|| Error::MalformedRepoPath {
                        path: repo_path.clone(),
                    })?;
                HostKind::Server {
                    project: project.to_string(),
                    repo: repo.to_string(),
                }
            }
        };

        Ok(Self {
            name: family.label(),
            match_host: match_host.into(),
            display_host: display_host.into(),
            repo_path,
            kind,
        })
    }

    /// Provider name (`"cloud"` or `"server"`).
    pub fn name(&self) -> &str {
        self.name
    }

    /// Host the remote was matched against.
    pub fn match_host(&self) -> &str {
        &self.match_host
    }

    /// Host used in web URLs.
    pub fn display_host(&self) -> &str {
        &self.display_host
    }

    /// Repository path as captured from the remote.
    pub fn repo_path(&self) -> &str {
        &self.repo_path
    }

    fn web_root(&self) -> String {
        match &self.kind {
            HostKind::Cloud => cloud::web_root(&self.display_host, &self.repo_path),
            HostKind::Server { project, repo } => {
                server::web_root(&self.display_host, project, repo)
            }
        }
    }

    /// Web URL of one file's change within a commit.
    pub fn changeset_url(&self, revision: &str, file_path: &str) -> String {
        let root = self.web_root();
        match &self.kind {
            HostKind::Cloud => cloud::changeset_url(&root, revision, file_path),
            HostKind::Server { .. } => server::changeset_url(&root, revision, file_path),
        }
    }

    /// Web URL of a source file at a revision, optionally highlighting line
    /// ranges (`"start:end"` form).
    pub fn source_url(&self, revision: &str, file_path: &str, ranges: &[String]) -> String {
        let root = self.web_root();
        match &self.kind {
            HostKind::Cloud => cloud::source_url(&root, revision, file_path, ranges),
            HostKind::Server { .. } => server::source_url(&root, revision, file_path, ranges),
        }
    }

    /// Web URL of one file's diff within a review request.
    pub fn review_request_url(&self, id: u64, file_path: &str) -> String {
        let root = self.web_root();
        match &self.kind {
            HostKind::Cloud => cloud::review_request_url(&root, id, file_path),
            HostKind::Server { .. } => server::review_request_url(&root, id, file_path),
        }
    }
}
