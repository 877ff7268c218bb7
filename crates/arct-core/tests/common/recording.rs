//! In-memory transport that records every retrieval instead of touching the network.

use arct_core::progress::{Progress, ProgressSink};
use arct_core::source::Source;
use arct_core::{TransferError, Transport};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

pub struct RecordingTransport {
    body: Vec<u8>,
    chunk: usize,
    /// Report no total size (like a response without Content-Length).
    pub unknown_size: bool,
    /// Fail with this HTTP status after writing half the body.
    pub fail_with: Option<u32>,
    calls: RefCell<Vec<(String, PathBuf)>>,
}

impl RecordingTransport {
    pub fn new(body: &[u8]) -> Self {
        Self {
            body: body.to_vec(),
            chunk: 4,
            unknown_size: false,
            fail_with: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Transport for RecordingTransport {
    fn retrieve(
        &self,
        source: &Source,
        destination: &Path,
        sink: &mut dyn ProgressSink,
    ) -> Result<u64, TransferError> {
        self.calls
            .borrow_mut()
            .push((source.to_string(), destination.to_path_buf()));

        let write_err = |e| TransferError::Write {
            path: destination.to_path_buf(),
            source: e,
        };
        let total = (!self.unknown_size).then_some(self.body.len() as u64);
        let mut written = Vec::new();
        let mut transferred = 0u64;
        for chunk in self.body.chunks(self.chunk.max(1)) {
            if let Some(code) = self.fail_with {
                if written.len() >= self.body.len() / 2 {
                    fs::write(destination, &written).map_err(write_err)?;
                    return Err(TransferError::Http {
                        url: source.to_string(),
                        code,
                    });
                }
            }
            written.extend_from_slice(chunk);
            transferred += chunk.len() as u64;
            sink.report(Progress {
                transferred,
                chunk_size: chunk.len() as u64,
                total,
            });
        }
        fs::write(destination, &written).map_err(write_err)?;
        Ok(transferred)
    }
}
