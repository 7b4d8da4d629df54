//! Normalize draft command

use colored::Colorize;

use super::draft_file::{edit_mode, load_draft};
use super::validate::print_errors;
use crate::interfaces::cli::CliError;
use crate::services::{normalize, validate};

/// Print the payload for a draft. Invalid drafts are reported instead,
/// since only validated drafts are ever normalized.
pub fn normalize_draft(path: &str, edit: Option<String>, compact: bool) -> Result<(), CliError> {
    let draft = load_draft(path)?;
    let mode = edit_mode(edit);

    let errors = validate(&draft, &mode);
    if !errors.is_empty() {
        eprintln!(
            "{} Draft must be valid before it can be normalized:",
            "✗".bold().red()
        );
        print_errors(&errors);
        return Err(CliError::ValidationError(errors.len()));
    }

    let payload = normalize(&draft, &mode);
    let json = if compact {
        serde_json::to_string(&payload)
    } else {
        serde_json::to_string_pretty(&payload)
    }
    .map_err(|e| CliError::ParseError(format!("Failed to serialize payload: {}", e)))?;

    println!("{}", json);
    Ok(())
}
