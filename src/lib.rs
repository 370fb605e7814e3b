// file: src/lib.rs
// version: 1.0.0
// guid: 9d4e2b71-0c35-48fa-b6d9-e12a7f83c0a5

//! # gcli
//!
//! A command-line tool for GitHub that authenticates through a third-party
//! identity provider (Descope), wraps common repository operations over the
//! GitHub REST API, and drafts Conventional-Commits messages with a locally
//! hosted model server (Ollama), falling back to rule-based analysis when
//! the model is unreachable.

pub mod ai;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod logging;
pub mod utils;

pub use error::{GcliError, Result};

/// Version information for the utility
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
