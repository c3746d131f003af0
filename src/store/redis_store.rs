use super::KvStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{Client, Script};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::config::Config;

const COMPARE_AND_SWAP_SCRIPT: &str = include_str!("lua/compare_and_swap.lua");

/// Per-attempt limit on establishing a connection, so an unreachable host fails
/// as quickly as a refused one
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Shareable Redis client for use across async handlers
///
/// The connection is established on first use rather than at construction, so the
/// service can start (and serve fallback words) while Redis is still down. Once
/// connected, the `ConnectionManager` reconnects on its own after a dropped
/// connection.
#[derive(Clone)]
pub struct RedisStore {
    client: Client,
    conn: Arc<OnceCell<ConnectionManager>>,
    cas_script: Script,
}

impl RedisStore {
    /// Create a new Redis store from configuration
    ///
    /// Only validates the connection URL; no network traffic happens here.
    pub fn from_config(config: &Config) -> Result<Self> {
        let url = config.redis_url();
        let client = Client::open(url.as_str())
            .with_context(|| format!("Invalid Redis URL: {}", url))?;

        tracing::info!("Redis store configured for {}", url);

        Ok(Self {
            client,
            conn: Arc::new(OnceCell::new()),
            cas_script: Script::new(COMPARE_AND_SWAP_SCRIPT),
        })
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                // Keep the initial connect short: callers fall back rather than wait
                let config = ConnectionManagerConfig::new()
                    .set_number_of_retries(1)
                    .set_connection_timeout(CONNECT_TIMEOUT);
                let conn = self.client.get_connection_manager_with_config(config).await?;
                tracing::info!("Connected to Redis");
                Ok::<_, redis::RedisError>(conn)
            })
            .await
            .context("Failed to connect to Redis")?;
        Ok(conn.clone())
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .with_context(|| format!("Failed to GET '{}'", key))?;
        Ok(value)
    }

    async fn get_many(&self, keys: &[String]) -> Result<Vec<Option<String>>> {
        // MGET with no keys is a Redis error
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.connection().await?;
        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(keys)
            .query_async(&mut conn)
            .await
            .with_context(|| format!("Failed to MGET {} keys", keys.len()))?;
        Ok(values)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .query_async(&mut conn)
            .await
            .with_context(|| format!("Failed to SET '{}'", key))?;
        tracing::debug!("SET {}", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let removed: i64 = redis::cmd("DEL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .with_context(|| format!("Failed to DEL '{}'", key))?;
        tracing::debug!("DEL {} removed {}", key, removed);
        Ok(removed > 0)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let count: i64 = redis::cmd("EXISTS")
            .arg(key)
            .query_async(&mut conn)
            .await
            .with_context(|| format!("Failed to check EXISTS '{}'", key))?;
        Ok(count > 0)
    }

    async fn incr_by(&self, key: &str, delta: i64) -> Result<i64> {
        let mut conn = self.connection().await?;
        let value: i64 = redis::cmd("INCRBY")
            .arg(key)
            .arg(delta)
            .query_async(&mut conn)
            .await
            .with_context(|| format!("Failed to INCRBY '{}'", key))?;
        Ok(value)
    }

    async fn compare_and_swap(&self, key: &str, expected: Option<&str>, new: &str) -> Result<bool> {
        let mut conn = self.connection().await?;

        let mut invocation = self.cas_script.prepare_invoke();
        invocation
            .key(key)
            .arg(if expected.is_some() { "1" } else { "0" })
            .arg(expected.unwrap_or_default())
            .arg(new);

        // invoke_async falls back from EVALSHA to EVAL when the script is not cached
        let swapped: i64 = invocation
            .invoke_async(&mut conn)
            .await
            .with_context(|| format!("Failed to compare-and-swap '{}'", key))?;
        Ok(swapped == 1)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .context("Redis did not answer PING")?;
        Ok(())
    }
}
