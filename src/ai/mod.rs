// file: src/ai/mod.rs
// version: 1.0.0
// guid: 4d7a1e95-208c-4f6b-93e7-b5c04a8d1f62

//! Commit message generation: local model first, rule-based fallback

pub mod fallback;
pub mod message;
pub mod ollama;

pub use ollama::OllamaClient;
