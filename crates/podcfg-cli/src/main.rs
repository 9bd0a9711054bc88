//! podcfg CLI
//!
//! Read-only inspector for the configuration resolved from layered roots.

mod cli;
mod error;
mod render;

use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};

use cli::{Cli, Commands};
use error::{CliError, Result};
use podcfg::ConfigRoots;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose > 0 {
        if let Err(e) = podcfg::logging::init(cli.verbose) {
            eprintln!("{}: failed to initialize logging: {e}", "warning".yellow());
        }
        tracing::debug!("Verbose mode enabled");
    }

    let command = cli.command.clone().unwrap_or(Commands::Show);
    match &cli.pod {
        Some(pod) => run_pod(command, pod),
        None => run_roots(command, roots(&cli)),
    }
}

fn roots(cli: &Cli) -> Vec<PathBuf> {
    if cli.roots.is_empty() {
        ConfigRoots::from_env().ordered()
    } else {
        cli.roots.clone()
    }
}

fn run_roots(command: Commands, roots: Vec<PathBuf>) -> Result<()> {
    tracing::debug!(?roots, "resolving configuration");
    let config = podcfg::get_config_from(&roots)?;
    match command {
        Commands::Show => println!("{}", serde_json::to_string_pretty(&config)?),
        Commands::Networks => print!("{}", render::networks_table(&config.net.networks)),
        Commands::AuthHeaders => print!("{}", render::auth_headers(&config.stage0.auth_per_host)),
    }
    Ok(())
}

fn run_pod(command: Commands, pod: &Path) -> Result<()> {
    let config = podcfg::get_pod_config(pod)?;
    match command {
        Commands::Show => {
            let documents: Vec<serde_json::Value> =
                config.to_documents().into_iter().map(|d| d.value).collect();
            let value = serde_json::json!({
                "network": {"schema": config.schema, "documents": documents},
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Commands::Networks => print!("{}", render::networks_table(&config.networks)),
        Commands::AuthHeaders => {
            return Err(CliError::user(
                "a pod configuration carries no registry credentials",
            ));
        }
    }
    Ok(())
}
