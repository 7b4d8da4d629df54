pub mod number;
pub mod time_parser;
pub mod url_validator;

pub use time_parser::TimeParser;

/// Allowed length of a custom alias
pub const ALIAS_MIN_LEN: usize = 3;
pub const ALIAS_MAX_LEN: usize = 50;

/// Check a custom alias: 3-50 ASCII letters, digits, `-` or `_`
pub fn is_valid_custom_alias(alias: &str) -> bool {
    (ALIAS_MIN_LEN..=ALIAS_MAX_LEN).contains(&alias.len())
        && alias
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
}

pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Trimmed copy, or `None` when nothing is left
pub fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
