//! `arct config` – show where the config lives and what it contains.

use anyhow::Result;
use arct_core::config::{self, ArctConfig};

pub fn run_config(cfg: &ArctConfig) -> Result<()> {
    let path = config::config_path()?;
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
