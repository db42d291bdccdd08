//! CLI interface for lockrain

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Matrix-style binary rain around a rotating padlock, in your terminal
#[derive(Parser)]
#[command(name = "lockrain")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the scene full-screen in the terminal
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "lockrain.yaml")]
        config: PathBuf,
    },

    /// Render frames off-screen to a text file
    Record {
        /// Configuration file path
        #[arg(short, long, default_value = "lockrain.yaml")]
        config: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Number of frames to render
        #[arg(short, long, default_value = "300")]
        frames: u32,

        /// Canvas width in cells
        #[arg(long, default_value = "100")]
        width: u16,

        /// Canvas height in cells
        #[arg(long, default_value = "40")]
        height: u16,
    },

    /// Resolve the configured assets and report what loads
    Assets {
        /// Configuration file path
        #[arg(short, long, default_value = "lockrain.yaml")]
        config: PathBuf,
    },

    /// Validate a configuration file
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "lockrain.yaml")]
        config: PathBuf,
    },

    /// Generate an example configuration file
    Init,
}
