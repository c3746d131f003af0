//! Key-value store abstraction.
//!
//! Every handler and the word cursor talk to the store through [`KvStore`], so the
//! Redis backend can be swapped for [`MemoryStore`] in tests and local runs.

use anyhow::Result;
use async_trait::async_trait;

pub mod memory;
pub mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// String-keyed, string-valued remote store.
///
/// Implementations must be safe to share across request handlers. All values are
/// stored as UTF-8 strings; integer counters are stored in their decimal form so
/// that `incr_by` and plain `get` agree on the representation.
#[async_trait]
pub trait KvStore: Send + Sync + 'static {
    /// Returns `Ok(None)` if the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Reads several keys in one round-trip. The result has one slot per key, in
    /// the same order, with `None` for missing keys.
    async fn get_many(&self, keys: &[String]) -> Result<Vec<Option<String>>>;

    /// Stores `value` under `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Returns `Ok(true)` if the key existed and was removed.
    async fn delete(&self, key: &str) -> Result<bool>;

    async fn exists(&self, key: &str) -> Result<bool>;

    /// Atomically adds `delta` to the integer stored at `key` (absent counts as 0)
    /// and returns the new value.
    ///
    /// # Errors
    ///
    /// Fails if the current value is not a decimal integer.
    async fn incr_by(&self, key: &str, delta: i64) -> Result<i64>;

    /// Atomically replaces the value at `key` with `new` if the current value equals
    /// `expected`. `expected = None` means "only if the key is absent".
    ///
    /// Returns whether the swap happened.
    async fn compare_and_swap(&self, key: &str, expected: Option<&str>, new: &str) -> Result<bool>;

    /// Liveness check.
    async fn ping(&self) -> Result<()>;
}
