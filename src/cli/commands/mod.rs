//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod init;
mod maintenance;
mod password;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "gamelog")]
#[command(about = "Personal gaming journal with a media gallery and Steam widget")]
#[command(version)]
pub struct Cli {
    /// Data directory (overrides config file).
    #[arg(long, short = 't', global = true)]
    target: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and database
    Init,

    /// Start the web server
    Serve {
        /// Address to bind: port, host, or host:port
        #[arg(default_value = "127.0.0.1:3030")]
        bind: String,
    },

    /// Hash an admin password for the `admin_password_hash` setting
    HashPassword {
        /// Password to hash (prompted for when omitted)
        #[arg(long, env = "GAMELOG_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Re-run media classification over every stored media item
    Reclassify,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        target: cli.target,
    };
    let (settings, _config) =
        load_settings_with_options(options).await.map_err(anyhow::Error::msg)?;

    match cli.command {
        Commands::Init => init::cmd_init(&settings).await,
        Commands::Serve { bind } => serve::cmd_serve(&settings, &bind).await,
        Commands::HashPassword { password } => password::cmd_hash_password(password),
        Commands::Reclassify => maintenance::cmd_reclassify(&settings).await,
    }
}
