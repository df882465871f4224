//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Browse a wildlife catalog folded into Status / Order / Family folders
#[derive(Parser, Debug)]
#[command(name = "wildlife-explorer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (repeat for more: -d -d -d)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// CSV source, overrides catalog.source
    #[arg(long, global = true, value_hint = ValueHint::FilePath, conflicts_with = "json")]
    pub source: Option<PathBuf>,

    /// Load a JSON tree snapshot instead of CSV
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub json: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the whole catalog as a tree
    Tree,

    /// List the entries of a folder
    Ls {
        /// Path segments from the root, e.g. Native Passeriformes
        path: Vec<String>,
    },

    /// Show a folder heading or an item's record
    Show {
        /// Path segments from the root
        #[arg(required = true)]
        path: Vec<String>,
    },

    /// Write the tree as a JSON snapshot
    Export {
        /// Output file (default: stdout)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Interactive browsing session on stdin
    Browse,

    /// Decode every catalog image once and report progress
    Preload,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Show config file locations
    Path,
    /// Print a commented config template
    Template,
}
