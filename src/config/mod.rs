// file: src/config/mod.rs
// version: 1.0.0
// guid: e2a84f61-b093-47c5-9d18-6fa20b35c8d1

//! Persistent user configuration

pub mod store;

pub use store::{Config, ConfigStore, DEFAULT_MODEL};
