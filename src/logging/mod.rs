// file: src/logging/mod.rs
// version: 1.0.0
// guid: 5c0f3a82-9e14-4b67-8d20-1f6b4c9da3e7

//! Logging configuration

pub mod logger;
