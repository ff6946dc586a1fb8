//! Version-control backends for forgelink.
//!
//! A backend is constructed once per working directory and passed explicitly
//! to whoever needs remote listings or revision lookups. The closed union
//! keeps matching exhaustive when further VCS kinds are added.

mod backend;

pub use backend::{Backend, GitBackend};
