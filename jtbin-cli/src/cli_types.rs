//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jtbin")]
#[command(about = "Extract table data from JTBIN MRA descriptors", long_about = None)]
pub(crate) struct Cli {
    /// JTBIN root directory (defaults to $JTBIN, then settings.toml, then the current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Only show warnings and errors
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments selecting which descriptors are processed.
#[derive(Args, Clone)]
pub(crate) struct ExtractArgs {
    /// Board identifier (the descriptor's <rbf>) to process
    #[arg(short, long)]
    pub board: Option<String>,

    /// ROM region index to extract
    #[arg(long)]
    pub region: Option<i32>,

    /// Descriptor directory, relative to the root
    #[arg(long, default_value = "mra")]
    pub mra_dir: PathBuf,

    /// File name suffix of descriptor files
    #[arg(long, default_value = ".mra")]
    pub extension: String,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print a table row for every descriptor of the selected board
    Extract {
        #[command(flatten)]
        args: ExtractArgs,
    },

    /// Decode a CPS2 security key
    Keys {
        /// Key bytes in hex (20 bytes, spaces optional)
        #[arg(conflicts_with = "mra", required_unless_present = "mra")]
        hex: Vec<String>,

        /// Read the key from this descriptor instead
        #[arg(long)]
        mra: Option<PathBuf>,

        /// ROM region holding the key inside the descriptor
        #[arg(long, default_value_t = 1)]
        region: i32,
    },

    /// Inspect settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved settings and their sources
    Show,

    /// Print the settings file path
    Path,
}
