// file: src/github/mod.rs
// version: 1.0.0
// guid: 6e03a7d2-91f4-4b8c-a561-38c0d9e24b7f

//! GitHub REST API integration

pub mod client;
pub mod models;

pub use client::GithubClient;
pub use models::{GithubUser, Issue, Label, Repository};
