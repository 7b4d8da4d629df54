//! User-facing interfaces
//!
//! - `cli`: clap command handlers

pub mod cli;
