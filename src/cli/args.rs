//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `apply`: Apply every translation document in the manifest to the target tree
//! - `check`: Validate the manifest and its documents without writing anything
//! - `init`: Initialize a patchloc configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::engine::ReplacementMode;

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
    /// Target source tree (takes precedence over configured candidate roots)
    #[arg(long, env = "PATCHLOC_TREE")]
    pub tree: Option<PathBuf>,

    /// Directory containing manifest.json and translation documents (overrides config file)
    #[arg(long)]
    pub resources: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// How replacement pairs interact (overrides config file)
    #[arg(long, value_enum)]
    pub mode: Option<ReplacementMode>,

    /// Count replacements without modifying any file
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct ApplyCommand {
    #[command(flatten)]
    pub args: ApplyArgs,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub args: CheckArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply translation documents to the target source tree
    Apply(ApplyCommand),
    /// Check the manifest and translation documents for problems
    Check(CheckCommand),
    /// Initialize a new .patchlocrc.json configuration file
    Init,
}
