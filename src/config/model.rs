//! Config struct definition.

use super::types::{JobConfig, LockConfig, StoreConfig};
use serde::{Deserialize, Serialize};

/// Configuration for runlock.
///
/// This struct represents the contents of `runlock.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lock store connection settings.
    pub store: StoreConfig,

    /// The lock key and its TTL.
    pub lock: LockConfig,

    /// The simulated job run under the lock.
    pub job: JobConfig,
}
