mod commands;
mod loader;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "filerouter")]
#[command(version, about = "filerouter CLI - inspect file-based route trees", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = filerouter::config::CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the route table of a routes directory
    Routes {
        /// Routes directory (default: routing.routes_dir from the config)
        dir: Option<PathBuf>,

        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a routes directory: names, collisions and syntax
    Check {
        /// Routes directory (default: routing.routes_dir from the config)
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Routes { dir, json } => {
            commands::routes::execute(dir, &cli.config, json)?;
        }
        Commands::Check { dir } => {
            commands::check::execute(dir, &cli.config)?;
        }
    }

    Ok(())
}
