// file: src/cli/mod.rs
// version: 1.0.0
// guid: 70d2b9f4-1e86-4a53-9c07-d48e5a31b6c2

//! Command line interface

pub mod args;
pub mod commands;
