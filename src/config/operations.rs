//! Config loading, validation, and override operations.

use super::model::Config;
use crate::error::{Result, RunlockError};
use crate::locks::MAX_TTL_SECS;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "runlock.yaml";

/// Values given on the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub key: Option<String>,
    pub ttl_secs: Option<u64>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(RunlockError::UserError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            RunlockError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Resolve the effective config file.
    ///
    /// An explicit path must exist. Without one, `runlock.yaml` in `dir` is
    /// used when present, otherwise the built-in defaults.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate: PathBuf = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading config");
            Self::load(candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| RunlockError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            RunlockError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Apply command-line overrides, then re-validate.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(key) = overrides.key {
            self.lock.key = key;
        }
        if let Some(ttl_secs) = overrides.ttl_secs {
            self.lock.ttl_secs = ttl_secs;
        }
        if let Some(host) = overrides.host {
            self.store.host = host;
        }
        if let Some(port) = overrides.port {
            self.store.port = port;
        }

        self.validate()?;
        Ok(self)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `store.host` must be non-empty, `store.port` non-zero
    /// - `store.db` must not be negative
    /// - `store.connect_timeout_ms` and `store.io_timeout_ms` must be positive
    /// - `lock.key` must be non-blank
    /// - `lock.ttl_secs` must be between 1 and `MAX_TTL_SECS`
    pub fn validate(&self) -> Result<()> {
        if self.store.host.trim().is_empty() {
            return Err(invalid("store.host must not be empty"));
        }

        if self.store.port == 0 {
            return Err(invalid("store.port must be greater than 0"));
        }

        if self.store.db < 0 {
            return Err(invalid("store.db must not be negative"));
        }

        if self.store.connect_timeout_ms == 0 || self.store.io_timeout_ms == 0 {
            return Err(invalid(
                "store.connect_timeout_ms and store.io_timeout_ms must be greater than 0",
            ));
        }

        if self.lock.key.trim().is_empty() {
            return Err(invalid("lock.key must not be empty"));
        }

        if self.lock.ttl_secs == 0 {
            return Err(invalid("lock.ttl_secs must be greater than 0"));
        }

        if self.lock.ttl_secs > MAX_TTL_SECS {
            return Err(RunlockError::UserError(format!(
                "config validation failed: lock.ttl_secs must be at most {}",
                MAX_TTL_SECS
            )));
        }

        Ok(())
    }
}

fn invalid(reason: &str) -> RunlockError {
    RunlockError::UserError(format!("config validation failed: {}", reason))
}
