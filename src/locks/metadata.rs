//! Lock value written to the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marker used when the metadata cannot be serialized.
const FALLBACK_VALUE: &str = "locked";

/// Metadata stored as the lock key's value.
///
/// The value is informational only: release deletes the key without
/// comparing it. It lets an operator inspecting the store see who holds
/// the lock and since when.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockMetadata {
    /// Owner of the lock (e.g., `user@HOST`).
    pub owner: String,

    /// Process ID of the lock holder (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,

    /// Timestamp when the lock was requested (RFC3339).
    pub created_at: DateTime<Utc>,

    /// Name of the job the lock was taken for, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,

    /// TTL the lock was requested with, in seconds.
    pub ttl_secs: u64,
}

impl LockMetadata {
    /// Create new lock metadata with the current timestamp.
    pub fn new(job: Option<&str>, ttl_secs: u64) -> Self {
        Self {
            owner: get_owner_string(),
            pid: Some(std::process::id()),
            created_at: Utc::now(),
            job: job.map(str::to_string),
            ttl_secs,
        }
    }

    /// Compact JSON used as the store value.
    pub fn to_value(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| FALLBACK_VALUE.to_string())
    }
}

/// Get the owner string for lock metadata.
fn get_owner_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_metadata_creation() {
        let meta = LockMetadata::new(Some("simulated"), 10);

        assert!(meta.owner.contains('@'));
        assert_eq!(meta.job.as_deref(), Some("simulated"));
        assert_eq!(meta.pid, Some(std::process::id()));
        assert_eq!(meta.ttl_secs, 10);
        assert!(Utc::now().signed_duration_since(meta.created_at).num_seconds() < 60);
    }

    #[test]
    fn test_lock_value_is_single_line_json() {
        let meta = LockMetadata::new(None, 30);
        let value = meta.to_value();

        assert!(!value.contains('\n'));
        assert!(!value.contains("\"job\""));
        let parsed: LockMetadata = serde_json::from_str(&value).unwrap();
        assert_eq!(parsed.owner, meta.owner);
        assert_eq!(parsed.ttl_secs, 30);
        assert_eq!(parsed.job, None);
    }
}
