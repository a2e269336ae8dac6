//! CLI for the cabundle CA bundle updater.

mod commands;

use anyhow::Result;
use cabundle_core::config;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_checksum, run_completions, run_man, run_update};

/// Top-level CLI for cabundle.
#[derive(Debug, Parser)]
#[command(name = "cabundle")]
#[command(about = "Keep a bundled CA certificate file in sync with upstream", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Which local CA file a command operates on.
#[derive(Debug, Clone, Default, Args)]
pub struct TargetArgs {
    /// Operate on this CA file, bypassing deployment-based lookup.
    #[arg(long, value_name = "PATH")]
    pub ca_file: Option<PathBuf>,

    /// Treat this run as a packaged deployment (uses the override path).
    #[arg(long)]
    pub packaged: bool,

    /// Override path for the CA file in packaged deployments.
    #[arg(long, value_name = "PATH")]
    pub override_path: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Update the local CA bundle when the upstream checksum differs.
    #[command(alias = "ext:cert:update")]
    Update {
        /// Force overwrite. Accepted for compatibility; the checksum comparison still decides.
        #[arg(short = 'F', long)]
        force: bool,

        #[command(flatten)]
        target: TargetArgs,

        /// Also write the fetched checksum resource to this file.
        #[arg(long, value_name = "PATH")]
        save_checksum: Option<PathBuf>,
    },

    /// Print the SHA-256 of the local CA bundle.
    Checksum {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Write a shell completion script to stdout.
    Completions {
        shell: clap_complete::Shell,
    },

    /// Write the roff man page to stdout.
    Man,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Update {
                force,
                target,
                save_checksum,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_update(&cfg, &target, force, save_checksum.as_deref())?;
            }
            CliCommand::Checksum { target } => {
                let cfg = config::load_or_init()?;
                run_checksum(&cfg, &target)?;
            }
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
