// file: src/git/mod.rs
// version: 1.0.0
// guid: 0a5e8c31-7d92-46bf-a084-53c6e1f9b2d7

//! Local git integration via subprocess

pub mod repo;

pub use repo::GitRepo;
