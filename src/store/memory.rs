//! In-process lock store for tests.
//!
//! Clones share the same state, so several coordinators (or threads) can
//! contend for one key exactly as separate processes would against Redis.

use super::LockStore;
use crate::error::{Result, RunlockError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct State {
    entries: HashMap<String, Entry>,
    unavailable: bool,
    delete_calls: usize,
}

impl State {
    fn purge_expired(&mut self, now: Instant) {
        self.entries.retain(|_, entry| entry.expires_at > now);
    }
}

/// Shared in-memory store with expiry and failure injection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    /// Make every following command fail with `StoreUnavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state().unavailable = unavailable;
    }

    /// Whether a live (non-expired) entry exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        let mut state = self.state();
        state.purge_expired(Instant::now());
        state.entries.contains_key(key)
    }

    /// The value stored under `key`, if live.
    pub fn value(&self, key: &str) -> Option<String> {
        let mut state = self.state();
        state.purge_expired(Instant::now());
        state.entries.get(key).map(|e| e.value.clone())
    }

    /// Number of delete commands received, successful or not.
    pub fn delete_calls(&self) -> usize {
        self.state().delete_calls
    }

    /// Drop `key` as if its TTL had lapsed.
    pub fn expire(&self, key: &str) {
        self.state().entries.remove(key);
    }
}

impl LockStore for MemoryStore {
    fn set_if_absent(&mut self, key: &str, value: &str, ttl: Duration) -> Result<bool> {
        let mut state = self.state();
        if state.unavailable {
            return Err(RunlockError::StoreUnavailable(
                "connection refused (memory)".to_string(),
            ));
        }

        let now = Instant::now();
        state.purge_expired(now);
        if state.entries.contains_key(key) {
            return Ok(false);
        }

        state.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + ttl,
            },
        );
        Ok(true)
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        let mut state = self.state();
        state.delete_calls += 1;
        if state.unavailable {
            return Err(RunlockError::StoreUnavailable(
                "connection refused (memory)".to_string(),
            ));
        }

        state.purge_expired(Instant::now());
        Ok(state.entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_if_absent_only_once() {
        let mut store = MemoryStore::new();
        assert!(store.set_if_absent("k", "a", Duration::from_secs(10)).unwrap());
        assert!(!store.set_if_absent("k", "b", Duration::from_secs(10)).unwrap());
        assert_eq!(store.value("k").as_deref(), Some("a"));
    }

    #[test]
    fn test_clones_share_state() {
        let mut a = MemoryStore::new();
        let mut b = a.clone();
        assert!(a.set_if_absent("k", "a", Duration::from_secs(10)).unwrap());
        assert!(!b.set_if_absent("k", "b", Duration::from_secs(10)).unwrap());
        assert!(b.delete("k").unwrap());
        assert!(!a.contains("k"));
    }

    #[test]
    fn test_entries_expire() {
        let mut store = MemoryStore::new();
        assert!(store.set_if_absent("k", "a", Duration::from_millis(20)).unwrap());
        std::thread::sleep(Duration::from_millis(40));
        assert!(!store.contains("k"));
        assert!(store.set_if_absent("k", "b", Duration::from_secs(10)).unwrap());
    }

    #[test]
    fn test_unavailable_rejects_commands() {
        let mut store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(store.set_if_absent("k", "a", Duration::from_secs(1)).is_err());
        assert!(store.delete("k").is_err());
        assert_eq!(store.delete_calls(), 1);
    }
}
