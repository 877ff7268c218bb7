//! `arct retrieve <source> <destination>` – fetch a resource into the project.

use anyhow::Result;
use arct_core::config::ArctConfig;
use arct_core::{
    ConsoleSink, CurlTransport, FetchRequest, FetchResult, Fetcher, FileMode, LogSink, Outcome,
};
use std::io;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct RetrieveArgs {
    pub source: String,
    pub destination: String,
    pub overwrite: bool,
    pub chmod: Option<FileMode>,
    pub vars: Vec<(String, String)>,
    pub quiet: bool,
}

/// Runs one retrieval. Relative destinations are resolved against `base_dir`.
pub fn run_retrieve(cfg: &ArctConfig, base_dir: &Path, args: RetrieveArgs) -> Result<FetchResult> {
    let mut vars = cfg.vars.clone();
    vars.extend(args.vars);

    let fetcher =
        Fetcher::new(CurlTransport::new(cfg.transport.clone()), base_dir).with_vars(vars);
    let mut request = FetchRequest::new(args.source, args.destination).overwrite(args.overwrite);
    if let Some(mode) = args.chmod {
        request = request.mode(mode);
    }

    let result = if args.quiet {
        fetcher.fetch(&request, &mut LogSink, &mut io::sink())?
    } else {
        let mut sink = ConsoleSink::new(io::stdout());
        fetcher.fetch(&request, &mut sink, &mut io::stdout())?
    };

    match result.outcome {
        Outcome::Skipped => tracing::info!("kept existing {}", result.final_path.display()),
        Outcome::Fetched | Outcome::Overwritten => tracing::info!(
            bytes = result.bytes,
            "saved {}",
            result.final_path.display()
        ),
    }
    Ok(result)
}
