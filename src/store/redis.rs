//! Redis-backed lock store.
//!
//! Uses the synchronous `redis` client. The connection is opened lazily on the
//! first command so that an unreachable server surfaces as `StoreUnavailable`
//! from `acquire`, not from construction. A connection that failed a command is
//! dropped; the next command reconnects.

use super::LockStore;
use crate::config::StoreConfig;
use crate::error::{Result, RunlockError};
use redis::{Client, Cmd, Connection, FromRedisValue, RedisError};
use std::time::Duration;

/// Lock store talking to a single Redis server.
pub struct RedisStore {
    client: Client,
    address: String,
    connect_timeout: Duration,
    io_timeout: Duration,
    conn: Option<Connection>,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("address", &self.address)
            .field("connected", &self.conn.is_some())
            .finish()
    }
}

impl RedisStore {
    /// Create a store for the configured server. Does not connect.
    ///
    /// # Returns
    ///
    /// * `Ok(RedisStore)` - Client created
    /// * `Err(RunlockError::UserError)` - The address could not be parsed
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let url = config.url();
        let client = Client::open(url.as_str()).map_err(|e| {
            RunlockError::UserError(format!("invalid store address '{}': {}", url, e))
        })?;

        Ok(Self {
            client,
            address: config.address(),
            connect_timeout: Duration::from_millis(config.connect_timeout_ms),
            io_timeout: Duration::from_millis(config.io_timeout_ms),
            conn: None,
        })
    }

    /// The `host:port` this store talks to.
    pub fn address(&self) -> &str {
        &self.address
    }

    fn connect(&self) -> Result<Connection> {
        tracing::debug!(address = %self.address, "connecting to lock store");
        let conn = self
            .client
            .get_connection_with_timeout(self.connect_timeout)
            .map_err(|e| self.unavailable(&e))?;
        conn.set_read_timeout(Some(self.io_timeout))
            .map_err(|e| self.unavailable(&e))?;
        conn.set_write_timeout(Some(self.io_timeout))
            .map_err(|e| self.unavailable(&e))?;
        Ok(conn)
    }

    fn query<T: FromRedisValue>(&mut self, cmd: &Cmd) -> Result<T> {
        let mut conn = match self.conn.take() {
            Some(conn) => conn,
            None => self.connect()?,
        };

        match cmd.query::<T>(&mut conn) {
            Ok(value) => {
                self.conn = Some(conn);
                Ok(value)
            }
            Err(e) => Err(self.unavailable(&e)),
        }
    }

    fn unavailable(&self, err: &RedisError) -> RunlockError {
        RunlockError::StoreUnavailable(format!(
            "{} ({}): {}",
            failure_kind(err),
            self.address,
            err
        ))
    }
}

/// Short classification of a store failure for messages and logs.
fn failure_kind(err: &RedisError) -> &'static str {
    if err.is_timeout() {
        "timed out"
    } else if err.is_connection_refusal() {
        "connection refused"
    } else if err.is_connection_dropped() {
        "connection dropped"
    } else if err.is_io_error() {
        "i/o error"
    } else {
        "command failed"
    }
}

impl LockStore for RedisStore {
    fn set_if_absent(&mut self, key: &str, value: &str, ttl: Duration) -> Result<bool> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value).arg("NX").arg("EX").arg(ttl.as_secs());

        // "OK" when the key was created, nil when it already existed.
        let reply: Option<String> = self.query(&cmd)?;
        Ok(reply.is_some())
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        let mut cmd = redis::cmd("DEL");
        cmd.arg(key);

        let removed: i64 = self.query(&cmd)?;
        Ok(removed > 0)
    }
}
