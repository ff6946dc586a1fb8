//! Build-log segmentation for forgelink.
//!
//! Reorganizes the append-only text stream of a remote pipeline run into
//! discrete per-command segments, resolving only once the stream is known to
//! be finished.

mod segmenter;

pub use segmenter::LogSegmenter;
