//! # saiv-core
//!
//! Core crate for the SAIV instructor dashboard. Contains configuration
//! schemas, the unified error system, list/pagination envelopes, lenient
//! timestamp parsing, and the display formatting helpers shared by the web
//! dashboard and the CLI.
//!
//! This crate has **no** internal dependencies on other SAIV crates.

pub mod config;
pub mod error;
pub mod format;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
