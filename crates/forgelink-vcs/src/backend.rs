use std::path::{Path, PathBuf};

use tracing::debug;

use forgelink_core::Result;

/// Version-control backend for one working directory.
#[derive(Debug, Clone)]
pub enum Backend {
    Git(GitBackend),
}

impl Backend {
    /// Git backend rooted at `workdir`.
    pub fn git(workdir: impl Into<PathBuf>) -> Self {
        Backend::Git(GitBackend {
            workdir: workdir.into(),
        })
    }

    /// The working directory this backend operates in.
    pub fn workdir(&self) -> &Path {
        match self {
            Backend::Git(git) => &git.workdir,
        }
    }

    /// Raw remote listing, one line per remote/direction pair.
    pub async fn remotes(&self) -> Result<Vec<String>> {
        match self {
            Backend::Git(git) => git.remotes().await,
        }
    }

    /// Revision currently checked out in the working directory.
    pub async fn head_revision(&self) -> Result<String> {
        match self {
            Backend::Git(git) => git.head_revision().await,
        }
    }
}

/// Git implementation of the backend capability.
#[derive(Debug, Clone)]
pub struct GitBackend {
    workdir: PathBuf,
}

impl GitBackend {
    async fn remotes(&self) -> Result<Vec<String>> {
        let lines = forgelink_exec::lines("git", &["remote", "-v"], &self.workdir).await?;
        debug!(workdir = ?self.workdir, count = lines.len(), "listed git remotes");
        Ok(lines)
    }

    async fn head_revision(&self) -> Result<String> {
        let out = forgelink_exec::output("git", &["rev-parse", "HEAD"], &self.workdir).await?;
        Ok(out.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forgelink_core::Error;
    use tempfile::TempDir;

    async fn init_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        forgelink_exec::output("git", &["init", "-q"], dir.path())
            .await
            .unwrap();
        dir
    }

    #[tokio::test]
    async fn test_remotes_lists_configured_remote() {
        let dir = init_repo().await;
        forgelink_exec::output(
            "git",
            &["remote", "add", "origin", "https://bithub.org/acme/widgets.git"],
            dir.path(),
        )
        .await
        .unwrap();

        let backend = Backend::git(dir.path());
        let remotes = backend.remotes().await.unwrap();

        // git prints one line per direction: "origin <url> (fetch)" / "(push)"
        assert_eq!(remotes.len(), 2);
        assert!(remotes[0].starts_with("origin"));
        assert!(remotes[0].contains("https://bithub.org/acme/widgets.git"));
    }

    #[tokio::test]
    async fn test_remotes_empty_repo() {
        let dir = init_repo().await;
        let backend = Backend::git(dir.path());
        let remotes = backend.remotes().await.unwrap();
        assert!(remotes.is_empty());
    }

    #[tokio::test]
    async fn test_remotes_outside_repo_fails() {
        let dir = TempDir::new().unwrap();
        let backend = Backend::git(dir.path());
        let err = backend.remotes().await.unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }

    #[tokio::test]
    async fn test_head_revision_without_commits_fails() {
        let dir = init_repo().await;
        let backend = Backend::git(dir.path());
        assert!(backend.head_revision().await.is_err());
    }

    #[test]
    fn test_workdir_accessor() {
        let backend = Backend::git("/some/dir");
        assert_eq!(backend.workdir(), Path::new("/some/dir"));
    }
}
