//! URL construction for the cloud provider family.
//!
//! Cloud web URLs use the owner/repo path verbatim, case preserved.

use urlencoding::encode;

pub(crate) fn web_root(display_host: &str, repo_path: &str) -> String {
    format!("https://{display_host}/{repo_path}")
}

/// `<root>/commits/<rev>#chg-<urlencoded file>`
pub(crate) fn changeset_url(root: &str, revision: &str, file_path: &str) -> String {
    format!("{root}/commits/{revision}#chg-{}", encode(file_path))
}

/// `<root>/src/<rev>/<urlencoded file>#<basename>-<ranges joined ",">`
pub(crate) fn source_url(root: &str, revision: &str, file_path: &str, ranges: &[String]) -> String {
    let mut url = format!("{root}/src/{revision}/{}", encode(file_path));
    if !ranges.is_empty() {
        let base_name = file_path.rsplit('/').next().unwrap_or(file_path);
        url.push_str(&format!("#{base_name}-{}", ranges.join(",")));
    }
    url
}

/// `<root>/pull-requests/<id>/diff#chg-<file>`
pub(crate) fn review_request_url(root: &str, id: u64, file_path: &str) -> String {
    format!("{root}/pull-requests/{id}/diff#chg-{file_path}")
}
