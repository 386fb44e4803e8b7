pub mod commands;
pub mod logging;
pub mod output;

use clap::{Parser, Subcommand};

/// Account registration, login and audit-log query service.
#[derive(Parser, Debug)]
#[command(name = "cascade", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a config file (default: ./cascade.toml if present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Verbose output: log at debug level
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet mode: only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind to (overrides config and PORT)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the effective configuration
    Config,
}
