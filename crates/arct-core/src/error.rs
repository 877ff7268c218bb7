//! Error types for retrieval.

use std::io;
use std::path::PathBuf;

use crate::mode::ModeParseError;
use crate::template::TemplateError;

/// Failure of the transport while moving bytes from the source to disk.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Curl reported an error (timeout, connection refused, bad URL, ...).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// The final response had a non-2xx status.
    #[error("{url} returned HTTP {code}")]
    Http { url: String, code: u32 },
    /// Writing a received chunk to the destination failed (disk full, permission denied).
    #[error("write to {} failed", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Everything that can stop a fetch. A skipped fetch is not an error.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    InvalidMode(#[from] ModeParseError),

    #[error("invalid source {text:?}: {reason}")]
    InvalidSource {
        text: String,
        reason: url::ParseError,
    },

    #[error("cannot derive a file name from {url}; give a file path as the destination")]
    NoFileName { url: String },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("retrieving {url} failed")]
    Transfer {
        url: String,
        #[source]
        source: TransferError,
    },

    #[error("{action} {} failed", .path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    pub(crate) fn fs(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        FetchError::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }
}
