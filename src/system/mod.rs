//! System-level modules
//!
//! - Logging initialization

pub mod logging;
