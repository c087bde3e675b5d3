//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all
//! lingorun commands. It uses clap's derive API for declarative argument
//! parsing.
//!
//! ## Commands
//!
//! - `run`: Execute one localization run end to end
//! - `init`: Write a sample INPUT record for local development

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::engine::DEFAULT_ENGINE;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Run root where scratch files and the engine configuration are staged
    #[arg(long, default_value = ".")]
    pub workdir: PathBuf,

    /// Platform storage root holding key-value stores and datasets
    #[arg(long, env = "LINGORUN_STORAGE_DIR", default_value = "storage")]
    pub storage_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct RunCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Job input path (default: the INPUT record in the key-value store)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Engine command, whitespace-separated (program plus leading arguments)
    #[arg(long, env = "LINGORUN_ENGINE", default_value = DEFAULT_ENGINE)]
    pub engine: String,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Overwrite an existing INPUT record
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Localize the job input through the external engine and publish results
    Run(RunCommand),
    /// Write a sample INPUT record into the local key-value store
    Init(InitCommand),
}
