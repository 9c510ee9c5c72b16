//! extstage CLI - Browser-extension bundle stager
//!
//! Commands:
//! - `extstage` / `extstage build` - Stage artifacts into the bundle directory
//! - `extstage check` - Validate configuration and show the action list
//! - `extstage list` - List files in a staged bundle
//! - `extstage digest` - Print the content digest of a staged bundle
//! - `extstage pack` - Zip a staged bundle for distribution

use anyhow::Result;
use clap::{Parser, Subcommand};
use extstage_logging::prelude::*;
use std::path::PathBuf;

mod build;
mod bundle;
mod config;
mod output;
mod progress;

use config::StageConfig;

#[derive(Parser)]
#[command(name = "extstage")]
#[command(author, version, about = "Stage browser-extension bundles from prebuilt artifacts", long_about = None)]
struct Cli {
    /// Path to extstage.toml (default: ./extstage.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Diagnostic log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Stage all artifacts into the bundle directory (default)
    Build {
        /// Project root the action sources are relative to
        #[arg(short, long)]
        source_root: Option<PathBuf>,

        /// Bundle output directory
        #[arg(short, long)]
        dest_root: Option<PathBuf>,

        /// Write the build report as JSON to this path
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Validate configuration and print the action list
    Check,

    /// List the files in a staged bundle
    List {
        /// Bundle directory (default: configured destination root)
        dir: Option<PathBuf>,
    },

    /// Print the SHA256 digest of a staged bundle
    Digest {
        /// Bundle directory (default: configured destination root)
        dir: Option<PathBuf>,
    },

    /// Zip a staged bundle for distribution
    Pack {
        /// Bundle directory (default: configured destination root)
        #[arg(short, long)]
        dest_root: Option<PathBuf>,

        /// Archive path (default: <name>.zip)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir()?;
    let config = StageConfig::discover(cli.config.as_deref(), &cwd)?;

    init_logging(cli.log_level.unwrap_or(config.bundle.log_level));

    match cli.command.unwrap_or(Commands::Build {
        source_root: None,
        dest_root: None,
        report: None,
    }) {
        Commands::Build {
            source_root,
            dest_root,
            report,
        } => {
            build::run(&config, source_root, dest_root, report)?;
        }
        Commands::Check => {
            config::check(&config)?;
        }
        Commands::List { dir } => {
            bundle::list(&config, dir)?;
        }
        Commands::Digest { dir } => {
            bundle::digest(&config, dir)?;
        }
        Commands::Pack { dest_root, output } => {
            bundle::pack(&config, dest_root, output)?;
        }
    }

    Ok(())
}
