//! Single-stream GET to a file over libcurl's easy interface.

use super::{classify_header, is_success, HeaderLine, Transport};
use crate::config::TransportConfig;
use crate::error::TransferError;
use crate::progress::{Progress, ProgressSink};
use crate::source::Source;
use std::cell::Cell;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::str;
use std::time::Duration;

/// Blocking libcurl transport. One `retrieve` call is one sequential GET.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    config: TransportConfig,
}

impl CurlTransport {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    fn configure(&self, easy: &mut curl::easy::Easy, source: &Source) -> Result<(), curl::Error> {
        let cfg = &self.config;
        easy.url(source.as_str())?;
        easy.follow_location(true)?;
        easy.max_redirections(cfg.max_redirections)?;
        // 4xx/5xx become curl errors before any body bytes reach the file.
        easy.fail_on_error(true)?;
        easy.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))?;
        easy.low_speed_limit(cfg.low_speed_limit_bytes)?;
        easy.low_speed_time(Duration::from_secs(cfg.low_speed_time_secs))?;
        if let Some(secs) = cfg.timeout_secs {
            easy.timeout(Duration::from_secs(secs))?;
        }
        if let Some(agent) = &cfg.user_agent {
            easy.useragent(agent)?;
        }

        if !cfg.headers.is_empty() {
            let mut list = curl::easy::List::new();
            for (k, v) in &cfg.headers {
                list.append(&format!("{}: {}", k.trim(), v.trim()))?;
            }
            easy.http_headers(list)?;
        }
        Ok(())
    }
}

impl Transport for CurlTransport {
    fn retrieve(
        &self,
        source: &Source,
        destination: &Path,
        sink: &mut dyn ProgressSink,
    ) -> Result<u64, TransferError> {
        let mut easy = curl::easy::Easy::new();
        self.configure(&mut easy, source)?;

        let write_err = |e: io::Error| TransferError::Write {
            path: destination.to_path_buf(),
            source: e,
        };

        // The file is opened on the first chunk so a refused request leaves no file behind.
        let mut file: Option<File> = None;
        let mut write_error: Option<io::Error> = None;
        let mut transferred = 0u64;
        let total: Cell<Option<u64>> = Cell::new(None);
        // Status of the response currently being received; None for non-HTTP schemes.
        let status: Cell<Option<u32>> = Cell::new(None);
        let mut refused: Option<u32> = None;

        let perform_result = {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(line) = str::from_utf8(data) {
                    match classify_header(line) {
                        HeaderLine::Status(code) => {
                            total.set(None);
                            status.set(code);
                        }
                        HeaderLine::ContentLength(n) => total.set(Some(n)),
                        HeaderLine::Other => {}
                    }
                }
                true
            })?;
            transfer.write_function(|data| {
                // A non-2xx body (e.g. a 3xx without Location) is never written to disk.
                if let Some(code) = status.get().filter(|c| !is_success(*c)) {
                    refused = Some(code);
                    return Ok(0);
                }
                if file.is_none() {
                    match File::create(destination) {
                        Ok(f) => file = Some(f),
                        Err(e) => {
                            write_error = Some(e);
                            return Ok(0); // abort transfer
                        }
                    }
                }
                if let Some(f) = file.as_mut() {
                    if let Err(e) = f.write_all(data) {
                        write_error = Some(e);
                        return Ok(0);
                    }
                }
                transferred += data.len() as u64;
                sink.report(Progress {
                    transferred,
                    chunk_size: data.len() as u64,
                    total: total.get(),
                });
                Ok(data.len())
            })?;
            transfer.perform()
        };

        if let Err(e) = perform_result {
            if let Some(code) = refused {
                return Err(TransferError::Http {
                    url: source.to_string(),
                    code,
                });
            }
            if e.is_write_error() {
                if let Some(io_err) = write_error.take() {
                    return Err(write_err(io_err));
                }
            }
            if e.is_http_returned_error() {
                let code = easy.response_code()?;
                return Err(TransferError::Http {
                    url: source.to_string(),
                    code,
                });
            }
            return Err(TransferError::Curl(e));
        }

        let is_http = matches!(source.url().scheme(), "http" | "https");
        if is_http {
            let code = easy.response_code()?;
            if !is_success(code) {
                return Err(TransferError::Http {
                    url: source.to_string(),
                    code,
                });
            }
        }

        match file {
            Some(mut f) => f.flush().map_err(write_err)?,
            // Empty body: still produce the (empty) destination file.
            None => {
                File::create(destination).map_err(write_err)?;
            }
        }

        tracing::debug!(
            url = %source,
            path = %destination.display(),
            bytes = transferred,
            "transfer complete"
        );
        Ok(transferred)
    }
}
