// file: src/auth/mod.rs
// version: 1.0.0
// guid: 1c6b9e47-52d0-483a-b8f3-7a04e2c91d65

//! Identity provider integration

pub mod descope;

pub use descope::{DescopeClient, VerifyResponse};
