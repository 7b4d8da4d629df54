//! linkcraft - Link configuration editor core
//!
//! This library holds the link a user is editing, validates it, turns it into
//! the Link API request body and submits it.
//!
//! # Features
//! - **cli**: Command-line interface (default)
//!
//! # Architecture
//! - `models`: Draft link, wire payload, API records
//! - `draft`: Reducer actions and the state-transition log
//! - `services`: Validator, normalizer and the submission orchestrator
//! - `client`: Link API transport
//! - `config`: Configuration management
//! - `system`: Logging setup
//! - `interfaces`: Command-line front end

#[cfg(feature = "cli")]
pub mod cli;
pub mod client;
pub mod config;
pub mod draft;
pub mod errors;
#[cfg(feature = "cli")]
pub mod interfaces;
pub mod models;
pub mod services;
pub mod system;
pub mod utils;
