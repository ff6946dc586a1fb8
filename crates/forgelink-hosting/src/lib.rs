//! Hosting-provider resolution for forgelink.
//!
//! Classifies a repository's version-control remotes against configured
//! hosting endpoints and produces a [`ResolvedHost`] capable of building web
//! URLs for changesets, source files, and review requests.

mod cloud;
mod host;
mod resolver;
mod server;

pub use host::ResolvedHost;
pub use resolver::resolve;
