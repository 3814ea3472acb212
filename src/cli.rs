//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::config::BuildMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lectern content indexer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: lectern.toml)
    #[arg(short = 'C', long, default_value = "lectern.toml")]
    pub config: PathBuf,

    /// Posts per listing page, overriding `[content.page_size]`
    #[arg(short, long)]
    pub page_size: Option<usize>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared arguments for the Build and Check commands
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Build mode, controlling exclusion patterns and draft visibility
    #[arg(short, long, value_enum, default_value_t = BuildMode::Production)]
    pub mode: BuildMode,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scan and index the content tree, then write the data files
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Run the full pipeline without writing, reporting every issue
    Check {
        #[command(flatten)]
        build_args: BuildArgs,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_check(&self) -> bool {
        matches!(self.command, Commands::Check { .. })
    }
}
