//! Root CLI parser with global options.

use clap::Parser;

use crate::commands::Commands;

/// Back-office service for the academic platform.
#[derive(Parser)]
#[command(name = "acadmin")]
#[command(about = "Academic back-office REST service")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
