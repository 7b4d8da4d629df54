//! Validate draft command

use colored::Colorize;

use super::draft_file::{edit_mode, load_draft};
use crate::interfaces::cli::CliError;
use crate::services::{Advisory, ValidationErrors, advisories, validate};

pub(super) fn print_errors(errors: &ValidationErrors) {
    for (group, message) in errors.iter() {
        println!(
            "  {} {}: {}",
            "✗".bold().red(),
            group.as_ref().cyan(),
            message.red()
        );
    }
}

pub(super) fn print_advisories(advisories: &[Advisory]) {
    for advisory in advisories {
        println!("  {} {}", "⚠".bold().yellow(), advisory.to_string().yellow());
    }
}

pub fn validate_draft(path: &str, edit: Option<String>) -> Result<(), CliError> {
    let draft = load_draft(path)?;
    let mode = edit_mode(edit);

    let errors = validate(&draft, &mode);
    let notes = advisories(&draft);

    if errors.is_empty() {
        println!("{} Draft is valid", "✓".bold().green());
        print_advisories(&notes);
        return Ok(());
    }

    println!(
        "{} Draft has {} problem(s):",
        "✗".bold().red(),
        errors.len().to_string().yellow()
    );
    print_errors(&errors);
    print_advisories(&notes);
    Err(CliError::ValidationError(errors.len()))
}
