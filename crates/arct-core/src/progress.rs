//! Transfer progress reporting.
//!
//! The transport calls [`ProgressSink::report`] once per received chunk. Sinks
//! decide what to do with it: nothing, a log line, or a percentage on a console.

use std::io::Write;

/// Progress after one received chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Bytes received so far, including this chunk.
    pub transferred: u64,
    /// Size of the chunk that triggered this report.
    pub chunk_size: u64,
    /// Expected total size (`Content-Length`), if the server sent one.
    pub total: Option<u64>,
}

impl Progress {
    /// Fraction complete in [0.0, 1.0], or `None` when the total is unknown or zero.
    pub fn ratio(&self) -> Option<f64> {
        match self.total {
            Some(total) if total > 0 => {
                Some((self.transferred as f64 / total as f64).clamp(0.0, 1.0))
            }
            _ => None,
        }
    }
}

/// Receives transfer progress.
pub trait ProgressSink {
    fn report(&mut self, progress: Progress);
}

impl<F: FnMut(Progress)> ProgressSink for F {
    fn report(&mut self, progress: Progress) {
        self(progress)
    }
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl ProgressSink for SilentSink {
    fn report(&mut self, _progress: Progress) {}
}

/// Emits progress as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn report(&mut self, progress: Progress) {
        match progress.ratio() {
            Some(ratio) => tracing::trace!(
                transferred = progress.transferred,
                total = ?progress.total,
                "retrieved {:.0}%",
                ratio * 100.0
            ),
            None => tracing::trace!(transferred = progress.transferred, "retrieved (size unknown)"),
        }
    }
}

/// Writes `\r<pct>%` (or `\r<n> bytes` when the size is unknown) to a console writer.
///
/// Only rewrites the line when the rendered text changes.
pub struct ConsoleSink<W: Write> {
    out: W,
    last: String,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last: String::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProgressSink for ConsoleSink<W> {
    fn report(&mut self, progress: Progress) {
        let text = match progress.ratio() {
            Some(ratio) => format!("{:.0}%", ratio * 100.0),
            None => format!("{} bytes", progress.transferred),
        };
        if text == self.last {
            return;
        }
        // Console output is best effort; a closed stdout must not abort the transfer.
        let _ = write!(self.out, "\r{}", text);
        let _ = self.out.flush();
        self.last = text;
    }
}
