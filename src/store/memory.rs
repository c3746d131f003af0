//! In-process store backend.
//!
//! Holds everything in a mutex-guarded map. Used for `KV_BACKEND=memory` and as the
//! substitute store in tests, where `MemoryStore::set_available` simulates an
//! unreachable Redis.

use super::KvStore;
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub struct MemoryStore {
    data: Arc<Mutex<HashMap<String, String>>>,
    available: Arc<AtomicBool>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Toggle simulated connectivity. While unavailable every operation fails the
    /// way a refused Redis connection would.
    #[cfg(test)]
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        if !self.available.load(Ordering::SeqCst) {
            bail!("Connection refused: in-memory store is marked unavailable");
        }
        self.data
            .lock()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn get_many(&self, keys: &[String]) -> Result<Vec<Option<String>>> {
        let data = self.lock()?;
        Ok(keys.iter().map(|key| data.get(key).cloned()).collect())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.lock()?.remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.lock()?.contains_key(key))
    }

    async fn incr_by(&self, key: &str, delta: i64) -> Result<i64> {
        let mut data = self.lock()?;
        let current = match data.get(key) {
            Some(raw) => raw
                .parse::<i64>()
                .with_context(|| format!("value at '{}' is not an integer", key))?,
            None => 0,
        };
        let updated = current
            .checked_add(delta)
            .ok_or_else(|| anyhow!("increment of '{}' would overflow", key))?;
        data.insert(key.to_string(), updated.to_string());
        Ok(updated)
    }

    async fn compare_and_swap(&self, key: &str, expected: Option<&str>, new: &str) -> Result<bool> {
        let mut data = self.lock()?;
        if data.get(key).map(String::as_str) != expected {
            return Ok(false);
        }
        data.insert(key.to_string(), new.to_string());
        Ok(true)
    }

    async fn ping(&self) -> Result<()> {
        self.lock().map(|_| ())
    }
}
