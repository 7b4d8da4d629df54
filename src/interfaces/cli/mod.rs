//! CLI interface module
//!
//! This module provides command-line interface functionality for linkcraft.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::errors::LinkcraftError;
use commands::{config_generate, normalize_draft, submit_draft, validate_draft};

#[derive(Debug)]
pub enum CliError {
    FileError(String),
    ParseError(String),
    /// The draft failed local validation (count of field groups)
    ValidationError(usize),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::FileError(msg) => format!("File error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::ValidationError(count) => {
                format!("Validation failed: {} field group(s) need attention", count)
            }
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    #[cfg(feature = "cli")]
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::FileError(msg) => format!("{} {}", "File error:".red().bold(), msg.white()),
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::ValidationError(count) => format!(
                "{} {} field group(s) need attention",
                "Validation failed:".red().bold(),
                count.to_string().white()
            ),
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<LinkcraftError> for CliError {
    fn from(err: LinkcraftError) -> Self {
        match err {
            LinkcraftError::FileOperation(msg) => CliError::FileError(msg),
            LinkcraftError::Serialization(msg) => CliError::ParseError(msg),
            other => CliError::CommandError(other.format_simple()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    match cmd {
        Commands::Validate { draft, edit } => validate_draft(&draft, edit),

        Commands::Normalize {
            draft,
            edit,
            compact,
        } => normalize_draft(&draft, edit, compact),

        Commands::Submit { draft, edit } => submit_draft(&draft, edit).await,

        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_format_simple() {
        assert_eq!(
            CliError::ParseError("bad json".into()).format_simple(),
            "Parse error: bad json"
        );
        assert_eq!(
            CliError::ValidationError(2).format_simple(),
            "Validation failed: 2 field group(s) need attention"
        );
    }

    #[test]
    fn test_from_linkcraft_error() {
        let err: CliError = LinkcraftError::file_operation("missing.json").into();
        assert!(matches!(err, CliError::FileError(ref m) if m == "missing.json"));

        let err: CliError = LinkcraftError::serialization("eof").into();
        assert!(matches!(err, CliError::ParseError(_)));

        let err: CliError = LinkcraftError::remote("Alias taken").into();
        match err {
            CliError::CommandError(msg) => assert!(msg.contains("Alias taken"), "got: {}", msg),
            other => panic!("Expected CommandError, got: {:?}", other),
        }
    }

    #[test]
    fn test_cli_error_is_std_error() {
        let err = CliError::CommandError("x".into());
        let _: &dyn std::error::Error = &err;
    }
}
