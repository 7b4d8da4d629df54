//! CLI command implementations
//!
//! This module re-exports all CLI command functions.

mod config_gen;
mod draft_file;
mod normalize;
mod submit;
mod validate;

pub use config_gen::config_generate;
pub use draft_file::{edit_mode, load_draft, parse_draft};
pub use normalize::normalize_draft;
pub use submit::submit_draft;
pub use validate::validate_draft;
