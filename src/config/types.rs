//! Configuration sections and defaults for runlock.
//!
//! This module defines the per-section structs and the default value
//! functions used by the Config struct.

use serde::{Deserialize, Serialize};

/// Default lock key when none is configured.
pub const DEFAULT_LOCK_KEY: &str = "script_lock";

/// Connection settings for the lock store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store host name or IP address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Store TCP port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logical database index.
    #[serde(default)]
    pub db: i64,

    /// Milliseconds to wait for the TCP connection.
    #[serde(default = "default_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Milliseconds to wait for each command's reply.
    #[serde(default = "default_timeout_ms")]
    pub io_timeout_ms: u64,
}

impl StoreConfig {
    /// Connection URL for the redis client.
    pub fn url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }

    /// `host:port`, for messages.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            db: 0,
            connect_timeout_ms: default_timeout_ms(),
            io_timeout_ms: default_timeout_ms(),
        }
    }
}

/// The single named lock guarding the job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// Store key whose presence means the job is running.
    #[serde(default = "default_lock_key")]
    pub key: String,

    /// Seconds after which the store drops an unreleased lock.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            key: default_lock_key(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Settings for the built-in simulated job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// Number of work steps to perform.
    #[serde(default = "default_steps")]
    pub steps: u32,

    /// Pause after each step, in milliseconds.
    #[serde(default = "default_step_interval_ms")]
    pub step_interval_ms: u64,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            step_interval_ms: default_step_interval_ms(),
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    6379
}
fn default_timeout_ms() -> u64 {
    2000
}
fn default_lock_key() -> String {
    DEFAULT_LOCK_KEY.to_string()
}
fn default_ttl_secs() -> u64 {
    10
}
fn default_steps() -> u32 {
    5
}
fn default_step_interval_ms() -> u64 {
    1000
}
