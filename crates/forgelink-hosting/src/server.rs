//! URL construction for the server provider family.
//!
//! Server repo paths split into an uppercase project key and a repo slug;
//! every web URL is rooted at `/projects/<PROJECT>/repos/<repo>`.

use urlencoding::encode;

pub(crate) fn web_root(display_host: &str, project: &str, repo: &str) -> String {
    let project_key = project.to_uppercase();
    format!(
        "https://{display_host}/projects/{}/repos/{}",
        encode(&project_key),
        encode_path(repo)
    )
}

/// `<root>/commits/<rev>#<urlencoded file>`
pub(crate) fn changeset_url(root: &str, revision: &str, file_path: &str) -> String {
    format!("{root}/commits/{revision}#{}", encode(file_path))
}

/// `<root>/browse/<file>?until=<rev>#<ranges>`; range separators become
/// dashes, multiple ranges are comma-joined.
pub(crate) fn source_url(root: &str, revision: &str, file_path: &str, ranges: &[String]) -> String {
    let mut url = format!("{root}/browse/{}?until={revision}", encode_path(file_path));
    if !ranges.is_empty() {
        let lines: Vec<String> = ranges.iter().map(|r| r.replace(':', "-")).collect();
        url.push_str(&format!("#{}", lines.join(",")));
    }
    url
}

/// `<root>/pull-requests/<id>/diff#<urlencoded file>`
pub(crate) fn review_request_url(root: &str, id: u64, file_path: &str) -> String {
    format!("{root}/pull-requests/{id}/diff#{}", encode(file_path))
}

/// Percent-encode each path segment while keeping the separators.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
