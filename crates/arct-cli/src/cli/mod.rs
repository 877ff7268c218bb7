//! CLI for the arct build tasks.

mod commands;

use anyhow::Result;
use arct_core::template::parse_var;
use arct_core::{config, FileMode};
use clap::{Parser, Subcommand};

use commands::{run_config, run_retrieve, RetrieveArgs};

/// Top-level CLI for arct.
#[derive(Debug, Parser)]
#[command(name = "arct")]
#[command(about = "arct: build tasks for web projects", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Retrieve a resource and save it, similar to wget.
    ///
    /// An existing destination is left alone unless --overwrite is given. A
    /// destination ending in "/" is a directory (created if needed) and the
    /// source's base name is appended to it.
    Retrieve {
        /// Source URI (http, https or file). May contain {name} variables.
        source: String,

        /// Destination file, existing directory, or directory to create (trailing "/").
        destination: String,

        /// Re-fetch even if the destination already exists.
        #[arg(long)]
        overwrite: bool,

        /// Octal mode applied to the saved file (e.g. 755).
        #[arg(long, value_name = "MODE")]
        chmod: Option<FileMode>,

        /// Value for a {name} placeholder; overrides [vars] in the config file.
        #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
        vars: Vec<(String, String)>,

        /// Don't print status or progress.
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show the config file location and the effective configuration.
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Retrieve {
                source,
                destination,
                overwrite,
                chmod,
                vars,
                quiet,
            } => {
                let base_dir = std::env::current_dir()?;
                let args = RetrieveArgs {
                    source,
                    destination,
                    overwrite,
                    chmod,
                    vars,
                    quiet,
                };
                run_retrieve(&cfg, &base_dir, args)?;
            }
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
