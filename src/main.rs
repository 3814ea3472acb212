//! Lectern - a content indexer and paginator for markdown sites.

mod build;
mod cli;
mod config;
mod data;
mod extract;
mod index;
mod scan;
mod utils;

use anyhow::{Result, bail};
use build::{run_build, run_check};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use std::path::Path;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Build { build_args } => run_build(config, build_args.mode),
        Commands::Check { build_args } => run_check(config, build_args.mode),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);

    if !config.config_path.exists() {
        bail!("Config file not found.");
    }

    config.validate()?;

    Ok(config)
}
