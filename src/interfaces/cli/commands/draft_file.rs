//! Draft file helpers shared by the draft commands

use std::io::Read;

use crate::interfaces::cli::CliError;
use crate::models::{EditMode, LinkDraft};

/// Parse a draft from its JSON form-state representation
pub fn parse_draft(content: &str) -> Result<LinkDraft, CliError> {
    serde_json::from_str(content)
        .map_err(|e| CliError::ParseError(format!("Invalid draft JSON: {}", e)))
}

/// Read a draft from `path`, or from stdin when `path` is `-`
pub fn load_draft(path: &str) -> Result<LinkDraft, CliError> {
    let content = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::FileError(format!("Failed to read stdin: {}", e)))?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| CliError::FileError(format!("Failed to read {}: {}", path, e)))?
    };
    parse_draft(&content)
}

pub fn edit_mode(edit: Option<String>) -> EditMode {
    match edit.filter(|code| !code.trim().is_empty()) {
        Some(code) => EditMode::edit(code.trim()),
        None => EditMode::Create,
    }
}
