use regex::Regex;
use tracing::debug;

use forgelink_core::{Error, RemoteEndpoint, Result};

use crate::ResolvedHost;

/// Classify `remotes` against `endpoints` and build the matching host.
///
/// Endpoints are scanned in configuration order and remotes in listing order;
/// the first match wins. Resolution is a single pure computation: a non-match
/// is a legitimate "not configured" outcome surfaced as `NoMatchingHost`,
/// never retried.
pub fn resolve(remotes: &[String], endpoints: &[RemoteEndpoint]) -> Result<ResolvedHost> {
    for endpoint in endpoints {
        let pattern = remote_pattern(&endpoint.match_host);
        for remote in remotes {
            if let Some(captures) = pattern.captures(remote) {
                let repo_path = captures["path"].to_string();
                debug!(
                    host = %endpoint.match_host,
                    family = endpoint.family.label(),
                    path = %repo_path,
                    "remote matched endpoint"
                );
                return ResolvedHost::new(
                    endpoint.family,
                    &endpoint.match_host,
                    &endpoint.display_host,
                    repo_path,
                );
            }
        }
    }

    Err(Error::NoMatchingHost {
        candidates: endpoints.iter().map(|e| e.match_host.clone()).collect(),
    })
}

/// Remote-listing line pattern for one endpoint: a leading remote name token,
/// anything, the literal match host (plus an optional port), a path
/// separator, the repository path (at least two segments), and an optional
/// `.git` suffix.
fn remote_pattern(match_host: &str) -> Regex {
    let pattern = format!(
        r"^\S+\s+.*?{}(?::\d+)?[:/](?P<path>[^/\s]+/[^\s]+?)(?:\.git)?(?:\s|$)",
        regex::escape(match_host)
    );
    Regex::new(&pattern).expect("escaped host pattern is valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use forgelink_core::ProviderFamily;

    fn endpoint(family: ProviderFamily, host: &str) -> RemoteEndpoint {
        RemoteEndpoint {
            family,
            match_host: host.to_string(),
            display_host: host.to_string(),
        }
    }

    fn remotes(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_https_remote() {
        let host = resolve(
            &remotes(&["origin\thttps://bithub.org/acme/widgets.git (fetch)"]),
            &[endpoint(ProviderFamily::Cloud, "bithub.org")],
        )
        .unwrap();
        assert_eq!(host.display_host(), "bithub.org");
        assert_eq!(host.repo_path(), "acme/widgets");
    }

    #[test]
    fn test_resolve_ssh_remote() {
        let host = resolve(
            &remotes(&["origin\tgit@bithub.org:acme/widgets.git (push)"]),
            &[endpoint(ProviderFamily::Cloud, "bithub.org")],
        )
        .unwrap();
        assert_eq!(host.repo_path(), "acme/widgets");
    }

    #[test]
    fn test_resolve_ssh_remote_with_port() {
        let host = resolve(
            &remotes(&[
                "origin\tssh://git@code.corp.example:7999/proj/widgets.git (fetch)",
            ]),
            &[endpoint(ProviderFamily::Server, "code.corp.example")],
        )
        .unwrap();
        assert_eq!(host.repo_path(), "proj/widgets");
    }

    #[test]
    fn test_resolve_remote_without_vcs_suffix() {
        let host = resolve(
            &remotes(&["origin\thttps://bithub.org/acme/widgets (fetch)"]),
            &[endpoint(ProviderFamily::Cloud, "bithub.org")],
        )
        .unwrap();
        assert_eq!(host.repo_path(), "acme/widgets");
    }

    #[test]
    fn test_resolve_display_host_from_endpoint() {
        let endpoints = vec![RemoteEndpoint {
            family: ProviderFamily::Cloud,
            match_host: "bithub.org".to_string(),
            display_host: "mirror.example".to_string(),
        }];
        let host = resolve(
            &remotes(&["origin\thttps://bithub.org/a/b.git (fetch)"]),
            &endpoints,
        )
        .unwrap();
        assert_eq!(host.display_host(), "mirror.example");
        assert_eq!(host.match_host(), "bithub.org");
    }

    #[test]
    fn test_first_configured_endpoint_wins() {
        let endpoints = vec![
            endpoint(ProviderFamily::Server, "code.corp.example"),
            endpoint(ProviderFamily::Cloud, "bithub.org"),
        ];
        // Both endpoints could match one of the remotes; the server endpoint
        // is configured first and must win.
        let host = resolve(
            &remotes(&[
                "cloud\thttps://bithub.org/acme/widgets.git (fetch)",
                "corp\thttps://code.corp.example/proj/widgets.git (fetch)",
            ]),
            &endpoints,
        )
        .unwrap();
        assert_eq!(host.name(), "server");
        assert_eq!(host.match_host(), "code.corp.example");
    }

    #[test]
    fn test_first_matching_remote_wins_within_endpoint() {
        let host = resolve(
            &remotes(&[
                "upstream\thttps://bithub.org/acme/widgets.git (fetch)",
                "fork\thttps://bithub.org/me/widgets.git (fetch)",
            ]),
            &[endpoint(ProviderFamily::Cloud, "bithub.org")],
        )
        .unwrap();
        assert_eq!(host.repo_path(), "acme/widgets");
    }

    #[test]
    fn test_no_match_lists_candidates() {
        let err = resolve(
            &remotes(&["origin\thttps://elsewhere.example/a/b.git (fetch)"]),
            &[
                endpoint(ProviderFamily::Cloud, "bithub.org"),
                endpoint(ProviderFamily::Server, "code.corp.example"),
            ],
        )
        .unwrap_err();
        match err {
            Error::NoMatchingHost { candidates } => {
                assert_eq!(candidates, vec!["bithub.org", "code.corp.example"]);
            }
            other => panic!("expected NoMatchingHost, got {other:?}"),
        }
    }

    #[test]
    fn test_no_match_on_empty_remote_list() {
        let err = resolve(&[], &[endpoint(ProviderFamily::Cloud, "bithub.org")]).unwrap_err();
        assert!(matches!(err, Error::NoMatchingHost { .. }));
    }

    #[test]
    fn test_host_is_matched_literally() {
        // The dot in the configured host must not match arbitrary characters.
        let err = resolve(
            &remotes(&["origin\thttps://bithubXorg/a/b.git (fetch)"]),
            &[endpoint(ProviderFamily::Cloud, "bithub.org")],
        )
        .unwrap_err();
        assert!(matches!(err, Error::NoMatchingHost { .. }));
    }

    #[test]
    fn test_repo_path_case_preserved() {
        let host = resolve(
            &remotes(&["origin\thttps://bithub.org/Acme/Widgets.git (fetch)"]),
            &[endpoint(ProviderFamily::Cloud, "bithub.org")],
        )
        .unwrap();
        assert_eq!(host.repo_path(), "Acme/Widgets");
    }
}
