//! Subprocess execution for forgelink.
//!
//! Runs one external command to completion and captures its exit code,
//! stdout, and stderr as a single immutable result. Non-zero exit codes are
//! not errors at the `exec` layer; the `output`/`lines` conveniences turn
//! them into failures carrying the captured stderr.

mod runner;

pub use runner::{exec, lines, output};
