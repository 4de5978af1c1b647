//! Configuration management for the hostscout agent
//!
//! Layered loading (compiled defaults → TOML file → environment
//! overrides) with one section per concern.

pub mod loader;
pub mod types;

pub use types::*;
