//! Submit draft command

use std::sync::Arc;

use colored::Colorize;

use super::draft_file::{edit_mode, load_draft};
use super::validate::{print_advisories, print_errors};
use crate::client::HttpTransport;
use crate::config::get_config;
use crate::interfaces::cli::CliError;
use crate::services::{EditorSession, LinkEditor, SubmitError, SubmitOutcome};

pub async fn submit_draft(path: &str, edit: Option<String>) -> Result<(), CliError> {
    let draft = load_draft(path)?;
    let mode = edit_mode(edit);

    let config = get_config();
    let transport = Arc::new(HttpTransport::from_config(&config.api));
    println!(
        "{} {}",
        "Submitting to".yellow(),
        transport.base_url().blue()
    );

    let editor = LinkEditor::new(transport);
    editor.open(EditorSession::new(mode, draft));
    print_advisories(&editor.advisories()?);

    match editor.submit().await {
        Ok(SubmitOutcome::Saved(link)) => {
            println!(
                "{} Saved short link: {} -> {}",
                "✓".bold().green(),
                link.short_code.cyan(),
                link.original_url.blue().underline()
            );
            Ok(())
        }
        Ok(SubmitOutcome::Discarded) => Err(CliError::CommandError(
            "The response arrived after the editor was closed".to_string(),
        )),
        Err(SubmitError::Invalid(errors)) => {
            println!("{} Draft was not sent:", "✗".bold().red());
            print_errors(&errors);
            Err(CliError::ValidationError(errors.len()))
        }
        Err(SubmitError::Remote { status, message }) => {
            println!(
                "{} {} {}",
                "✗".bold().red(),
                format!("[{}]", status).yellow(),
                message.red()
            );
            Err(CliError::CommandError(message))
        }
        Err(e) => Err(CliError::CommandError(e.to_string())),
    }
}
