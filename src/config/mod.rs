//! Configuration model for runlock.
//!
//! This module defines the Config struct that represents `runlock.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for every field, command-line overrides, and validation.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use operations::{ConfigOverrides, DEFAULT_CONFIG_FILE};
pub use types::{JobConfig, LockConfig, StoreConfig};
