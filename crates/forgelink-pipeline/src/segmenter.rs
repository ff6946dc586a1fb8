use std::sync::Arc;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use tokio::sync::{watch, Mutex};
use tracing::{debug, warn};

/// Marker prefix the remote build system emits when echoing a command.
const COMMAND_MARKER: &str = "+ ";

/// Internal accumulator for one attached stream.
#[derive(Debug, Default)]
struct LogBuffer {
    raw: String,
    segments: Vec<String>,
    finished: bool,
}

impl LogBuffer {
    /// One-time segmentation, run after all text has been appended.
    fn finalize(&mut self) {
        self.segments = segment(&self.raw);
        self.finished = true;
    }
}

/// Split a finished log into per-command segments.
///
/// A line starting with the marker opens a segment; everything before the
/// first marker is preamble and dropped. Inclusive splitting keeps the
/// original line breaks, so the concatenated segments reproduce the
/// post-preamble text exactly.
fn segment(raw: &str) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    for line in raw.split_inclusive('\n') {
        if line.starts_with(COMMAND_MARKER) {
            segments.push(line.to_string());
        } else if let Some(current) = segments.last_mut() {
            current.push_str(line);
        }
    }
    segments
}

/// Segments a remote build log into per-command sections.
///
/// Attach it to a chunked byte stream (an HTTP response body, a file
/// reader); a background task buffers chunks as they arrive and segments the
/// full text exactly once when the stream ends. Chunk boundaries are
/// irrelevant since no parsing happens before the end. Clones share the
/// underlying buffer, so any number of consumers may await [`logs`].
///
/// [`logs`]: LogSegmenter::logs
#[derive(Debug, Clone)]
pub struct LogSegmenter {
    state: Arc<Mutex<LogBuffer>>,
    finished: watch::Receiver<bool>,
}

impl LogSegmenter {
    /// Subscribe to `stream` and start buffering.
    ///
    /// A stream error finalizes the buffer with whatever has arrived;
    /// segmentation itself never fails.
    pub fn attach<S, E>(stream: S) -> Self
    where
        S: Stream<Item = std::result::Result<Bytes, E>> + Send + 'static,
        E: std::fmt::Display + Send + 'static,
    {
        let state = Arc::new(Mutex::new(LogBuffer::default()));
        let (tx, rx) = watch::channel(false);

        let task_state = Arc::clone(&state);
        tokio::spawn(async move {
            futures_util::pin_mut!(stream);
            while let Some(chunk) = stream.next().await {
                let text = match chunk {
                    Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                    Err(e) => {
                        warn!("log stream error, finalizing early: {e}");
                        break;
                    }
                };
                task_state.lock().await.raw.push_str(&text);
            }

            let mut buffer = task_state.lock().await;
            buffer.finalize();
            debug!(
                bytes = buffer.raw.len(),
                segments = buffer.segments.len(),
                "log stream finished"
            );
            drop(buffer);

            let _ = tx.send(true);
        });

        Self {
            state,
            finished: rx,
        }
    }

    /// The per-command segments, available once the stream has ended.
    ///
    /// Suspends until finalization and never returns a partial result. The
    /// completion flag is a one-shot signal, not a timed re-check, and it is
    /// retained after the reader task exits, so late callers resolve
    /// immediately.
    pub async fn logs(&self) -> Vec<String> {
        let mut finished = self.finished.clone();
        let _ = finished.wait_for(|done| *done).await;
        self.state.lock().await.segments.clone()
    }

    /// Whether the stream has already ended and segments are available.
    pub fn is_finished(&self) -> bool {
        *self.finished.borrow()
    }
}
