//! CLI argument parsing using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// podcfg - Inspect the effective layered configuration
#[derive(Parser, Debug)]
#[command(name = "podcfg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Toplevel configuration root, lowest precedence first (repeatable).
    /// Replaces the default roots.
    #[arg(long = "root", value_name = "DIR", global = true)]
    pub roots: Vec<PathBuf>,

    /// Read the network configuration of a single pod instead
    #[arg(long, value_name = "DIR", global = true, conflicts_with = "roots")]
    pub pod: Option<PathBuf>,

    /// The command to run (defaults to `show`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the effective configuration as JSON documents
    Show,

    /// List the effective networks in order
    Networks,

    /// Print the Authorization header used for every host
    AuthHeaders,
}
