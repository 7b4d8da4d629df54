//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for linkcraft using clap's derive macros.

use clap::{Parser, Subcommand};

/// linkcraft - Validate, normalize and submit short-link configurations
#[derive(Parser)]
#[command(name = "linkcraft")]
#[command(version)]
#[command(about = "Validate, normalize and submit short-link configurations", long_about = None)]
pub struct Cli {
    /// Configuration file (default: linkcraft.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Check a draft and print field errors and advisories
    Validate {
        /// Draft JSON file ("-" reads stdin)
        draft: String,

        /// Validate as an edit of an existing short code
        #[arg(long, value_name = "CODE")]
        edit: Option<String>,
    },

    /// Print the request body a draft would be sent as
    Normalize {
        /// Draft JSON file ("-" reads stdin)
        draft: String,

        /// Normalize as an edit of an existing short code
        #[arg(long, value_name = "CODE")]
        edit: Option<String>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Validate, normalize and send a draft to the Link API
    Submit {
        /// Draft JSON file ("-" reads stdin)
        draft: String,

        /// Update this short code instead of creating a link
        #[arg(long, value_name = "CODE")]
        edit: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: linkcraft.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}
