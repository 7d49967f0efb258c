//! Loma - A static site generator for markdown blogs.

mod assets;
mod build;
mod cli;
mod compose;
mod config;
mod content;
mod error;
mod init;
mod logger;

use anyhow::{Result, bail};
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use init::new_site;
use std::path::PathBuf;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Init { name } => new_site(&config, name.is_some()),
        Commands::Build { build_args } => {
            let summary = build_site(&config, build_args.clean)?;
            summary.report();
            if summary.failures.is_empty() {
                Ok(())
            } else {
                bail!("{} build steps failed", summary.failures.len())
            }
        }
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("./"));
    let root = match &cli.command {
        Commands::Init { name: Some(name) } => root.join(name),
        _ => root,
    };
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.set_root(root);
    config.update_with_cli(cli);

    // Validate config state based on command
    match (cli.is_init(), config_path.exists()) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) => bail!("Config file not found."),
        _ => {}
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}
