//! Resource retrieval: resolve the destination, skip or fetch, create
//! directories, transfer with progress, apply a permission mode.
//!
//! Status lines go to a caller-supplied writer as the fetch proceeds, so a
//! failed fetch may already have printed "Retrieving ..." and some progress.

use crate::destination::DestinationShape;
use crate::error::FetchError;
use crate::mode::FileMode;
use crate::progress::ProgressSink;
use crate::source::Source;
use crate::template::{self, Vars};
use crate::transport::Transport;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Input to a single fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub source: String,
    pub destination: String,
    pub overwrite: bool,
    pub mode: Option<FileMode>,
}

impl FetchRequest {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            overwrite: false,
            mode: None,
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn mode(mut self, mode: FileMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets the mode from octal text such as `"755"`.
    pub fn mode_str(mut self, text: &str) -> Result<Self, FetchError> {
        self.mode = Some(text.parse()?);
        Ok(self)
    }
}

/// What a fetch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing existed at the final path; the resource was downloaded.
    Fetched,
    /// A file existed and was replaced because `overwrite` was set.
    Overwritten,
    /// A file existed and `overwrite` was not set; no transfer happened.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub final_path: PathBuf,
    pub outcome: Outcome,
    /// Bytes written by the transport (0 when skipped).
    pub bytes: u64,
    /// Mode applied after the transfer, if any.
    pub mode: Option<FileMode>,
}

/// Retrieves resources through a [`Transport`].
///
/// Holds no state between calls beyond its configuration.
pub struct Fetcher<T: Transport> {
    transport: T,
    base_dir: PathBuf,
    vars: Vars,
}

impl<T: Transport> Fetcher<T> {
    /// `base_dir` anchors relative destination hints; it should be absolute.
    pub fn new(transport: T, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            transport,
            base_dir: base_dir.into(),
            vars: Vars::new(),
        }
    }

    /// Values for `{name}` placeholders in sources and destinations.
    pub fn with_vars(mut self, vars: Vars) -> Self {
        self.vars = vars;
        self
    }

    pub fn fetch(
        &self,
        request: &FetchRequest,
        sink: &mut dyn ProgressSink,
        out: &mut dyn Write,
    ) -> Result<FetchResult, FetchError> {
        let source_text = template::expand(&request.source, &self.vars)?;
        let hint_text = template::expand(&request.destination, &self.vars)?;
        let source = Source::parse(&source_text).map_err(|reason| FetchError::InvalidSource {
            text: source_text.clone(),
            reason,
        })?;

        // Path::join keeps a trailing separator, so the shape survives anchoring.
        let hint = self.base_dir.join(&hint_text);
        let shape = DestinationShape::classify(&hint, hint.is_dir());
        let final_path = if shape.needs_file_name() {
            let name = source.file_name().ok_or_else(|| FetchError::NoFileName {
                url: source.to_string(),
            })?;
            shape.final_path(name)
        } else {
            shape.final_path("")
        };
        tracing::debug!(?shape, path = %final_path.display(), "resolved destination");

        // Unreadable paths count as missing; directory creation reports the real problem.
        let outcome = match (final_path.exists(), request.overwrite) {
            (true, false) => {
                status(
                    out,
                    format_args!(
                        "{} exists; pass --overwrite to re-fetch it\n",
                        final_path.display()
                    ),
                );
                tracing::info!(path = %final_path.display(), "destination exists; skipped");
                return Ok(FetchResult {
                    final_path,
                    outcome: Outcome::Skipped,
                    bytes: 0,
                    mode: None,
                });
            }
            (true, true) => {
                status(out, format_args!("Overwriting {}...\n", final_path.display()));
                Outcome::Overwritten
            }
            (false, _) => {
                status(out, format_args!("Retrieving {}...\n", source));
                Outcome::Fetched
            }
        };

        if let Some(dir) = shape.dir_to_create() {
            fs::create_dir_all(dir).map_err(|e| FetchError::fs("create directory", dir, e))?;
        }

        let bytes = self
            .transport
            .retrieve(&source, &final_path, sink)
            .map_err(|e| FetchError::Transfer {
                url: source.to_string(),
                source: e,
            })?;
        status(
            out,
            format_args!("\r{} saved to {}", source, final_path.display()),
        );

        if let Some(mode) = request.mode {
            apply_mode(&final_path, mode)?;
            status(out, format_args!(" with mode {}\n", mode));
        } else {
            status(out, format_args!("\n"));
        }

        tracing::info!(
            url = %source,
            path = %final_path.display(),
            bytes,
            ?outcome,
            "retrieved"
        );
        Ok(FetchResult {
            final_path,
            outcome,
            bytes,
            mode: request.mode,
        })
    }
}

/// Status text is informational; a closed output stream does not fail the fetch.
fn status(out: &mut dyn Write, args: std::fmt::Arguments<'_>) {
    if let Err(e) = out.write_fmt(args).and_then(|()| out.flush()) {
        if e.kind() != io::ErrorKind::BrokenPipe {
            tracing::debug!("status output failed: {}", e);
        }
    }
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: FileMode) -> Result<(), FetchError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode.bits()))
        .map_err(|e| FetchError::fs("chmod", path, e))
}

#[cfg(not(unix))]
fn apply_mode(path: &Path, mode: FileMode) -> Result<(), FetchError> {
    tracing::warn!(path = %path.display(), %mode, "permission modes are not supported here; skipped");
    Ok(())
}
