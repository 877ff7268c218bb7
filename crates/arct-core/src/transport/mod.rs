//! Transports move bytes from a source URI into a local file.

mod curl_easy;

pub use curl_easy::CurlTransport;

use crate::error::TransferError;
use crate::progress::ProgressSink;
use crate::source::Source;
use std::path::Path;

/// "Retrieve URI to local path with progress callback."
///
/// Implementations create (or truncate) `destination`, call `sink` once per
/// received chunk, and return the number of bytes written. Failures are
/// returned as-is; a partially written file is left in place.
pub trait Transport {
    fn retrieve(
        &self,
        source: &Source,
        destination: &Path,
        sink: &mut dyn ProgressSink,
    ) -> Result<u64, TransferError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn retrieve(
        &self,
        source: &Source,
        destination: &Path,
        sink: &mut dyn ProgressSink,
    ) -> Result<u64, TransferError> {
        (**self).retrieve(source, destination, sink)
    }
}

/// What one response header line says about the body that follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeaderLine {
    /// `HTTP/x y ...`: a new response starts (e.g. after a redirect).
    /// Carries the status code when it parses.
    Status(Option<u32>),
    ContentLength(u64),
    Other,
}

pub(crate) fn classify_header(line: &str) -> HeaderLine {
    let line = line.trim();
    if line.starts_with("HTTP/") {
        let code = line
            .split_whitespace()
            .nth(1)
            .and_then(|c| c.parse::<u32>().ok());
        return HeaderLine::Status(code);
    }
    if let Some((name, value)) = line.split_once(':') {
        if name.trim().eq_ignore_ascii_case("content-length") {
            if let Ok(n) = value.trim().parse::<u64>() {
                return HeaderLine::ContentLength(n);
            }
        }
    }
    HeaderLine::Other
}

/// True for 2xx statuses, the only responses whose body is saved.
pub(crate) fn is_success(code: u32) -> bool {
    (200..300).contains(&code)
}
