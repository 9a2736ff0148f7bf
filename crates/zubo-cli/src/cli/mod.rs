//! CLI for the zubo playlist builder.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zubo_core::config::{self, Layout};

use commands::{run_assemble, run_expand, run_harvest, run_pipeline, run_sources};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "zubo")]
#[command(about = "zubo: build an IPTV M3U playlist from harvested source hosts", long_about = None)]
pub struct Cli {
    /// Config file (default: ./zubo.toml if present, else built-in defaults).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding ip/, template/, zubo/ and the playlist (default: current directory).
    #[arg(long, global = true, value_name = "DIR")]
    pub workdir: Option<PathBuf>,

    /// Log to the XDG state dir instead of stderr.
    #[arg(long, global = true)]
    pub log_file: bool,

    /// Defaults to `run`.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Harvest, expand, and assemble in one go.
    Run,

    /// Download every source list and write the per-region host files.
    Harvest,

    /// Expand templates with the harvested hosts.
    Expand,

    /// Assemble the expanded region files into the final playlist.
    Assemble,

    /// List configured regions.
    Sources,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let workdir = match self.workdir {
            Some(dir) => dir,
            None => std::env::current_dir().context("current dir")?,
        };
        let cfg = config::load(self.config.as_deref(), &workdir)?;
        tracing::debug!("loaded config: {:?}", cfg);
        let layout = Layout::resolve(&cfg, &workdir);

        match self.command.unwrap_or(CliCommand::Run) {
            CliCommand::Run => run_pipeline(&cfg, &layout)?,
            CliCommand::Harvest => run_harvest(&cfg, &layout)?,
            CliCommand::Expand => run_expand(&cfg, &layout)?,
            CliCommand::Assemble => run_assemble(&cfg, &layout)?,
            CliCommand::Sources => run_sources(&cfg, &layout),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
