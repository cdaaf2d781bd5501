//! Redis-backed session store.
//!
//! Uses `SET EX` for TTL writes; expired keys vanish server-side, so the
//! store needs no cleanup pass. Connection pooling via `ConnectionManager`,
//! which reconnects transparently and is cheap to clone.

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::info;

use abode_core::error::{AbodeError, AbodeResult};
use abode_core::store::SessionStore;

/// Cloneable handle to a Redis keyspace.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis (e.g. `redis://127.0.0.1:6379`).
    pub async fn connect(url: &str) -> AbodeResult<Self> {
        info!(url = %url, "connecting to Redis session store");

        let client =
            Client::open(url).map_err(|e| AbodeError::Store(format!("redis client: {e}")))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| AbodeError::Store(format!("redis connect: {e}")))?;

        Ok(Self { conn })
    }
}

impl SessionStore for RedisStore {
    async fn get(&self, key: &str) -> AbodeResult<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| AbodeError::Store(format!("redis get: {e}")))?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> AbodeResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(key, value, ttl_secs)
            .await
            .map_err(|e| AbodeError::Store(format!("redis set: {e}")))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AbodeResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .del(key)
            .await
            .map_err(|e| AbodeError::Store(format!("redis delete: {e}")))?;
        Ok(())
    }
}
