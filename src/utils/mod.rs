// file: src/utils/mod.rs
// version: 1.0.0
// guid: 3b84f1c6-a2d9-45e0-b713-9c52e8a06d41

//! Shared helpers

pub mod prompt;
