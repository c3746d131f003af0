//! Rotating word list kept in the key-value store.
//!
//! Layout: `word:<i>` for every index below `total_words`, plus `current_word_index`
//! naming the word served next. The cursor only moves through `compare_and_swap`
//! and appends reserve their slots with `incr_by`, so concurrent requests never
//! share an index or lose a cursor step.

use anyhow::{Context, Result};
use rand::Rng;
use std::sync::Arc;

use crate::store::KvStore;

pub const CURSOR_KEY: &str = "current_word_index";
pub const TOTAL_KEY: &str = "total_words";

/// Built-in list used to populate an empty store and as the fallback source when
/// the store cannot be reached.
pub const SEED_WORDS: &[&str] = &[
    "apple", "breeze", "canyon", "dolphin", "ember", "falcon", "glacier", "harbor", "island",
    "jungle", "lantern", "meadow",
];

/// Lost compare-and-swap races tolerated before a caller gives up on advancing
const CURSOR_CAS_ATTEMPTS: usize = 8;

/// `MGET` batch size used by [`WordCursor::list`]
const LIST_BATCH: u64 = 500;

pub fn word_key(index: u64) -> String {
    format!("word:{}", index)
}

/// A word handed out by [`WordCursor::next`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedWord {
    pub word: String,
    /// Store index the word was read from; `None` for fallback words
    pub index: Option<u64>,
    /// Set when the store was unusable and the word came from [`SEED_WORDS`]
    pub degraded: bool,
}

/// Outcome of an append: the indices `first_index .. first_index + count` now
/// hold the new words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appended {
    pub first_index: u64,
    pub count: u64,
    pub total_words: u64,
}

#[derive(Clone)]
pub struct WordCursor {
    store: Arc<dyn KvStore>,
}

impl WordCursor {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Populate the store with [`SEED_WORDS`] unless `total_words` already exists,
    /// and create the cursor if it is missing.
    ///
    /// Returns `Ok(true)` if this call did the seeding. The seed block is reserved
    /// by claiming `total_words` atomically, so two instances starting together
    /// seed once and an append that already created the counter is never
    /// overwritten.
    pub async fn initialize(&self) -> Result<bool> {
        let seeded = !self.store.exists(TOTAL_KEY).await?
            && self
                .store
                .compare_and_swap(TOTAL_KEY, None, &SEED_WORDS.len().to_string())
                .await?;

        if seeded {
            for (index, word) in SEED_WORDS.iter().enumerate() {
                self.store.set(&word_key(index as u64), word).await?;
            }
            tracing::info!("Seeded word list with {} words", SEED_WORDS.len());
        } else {
            tracing::debug!("Word list already initialized");
        }

        // Never moves an existing cursor
        self.store.compare_and_swap(CURSOR_KEY, None, "0").await?;
        Ok(seeded)
    }

    /// Seed the list on first use, e.g. when the store was down at startup or has
    /// been flushed since.
    async fn ensure_seeded(&self) -> Result<()> {
        if !self.store.exists(TOTAL_KEY).await? {
            self.initialize().await?;
        }
        Ok(())
    }

    /// Serve the word under the cursor and advance it, wrapping at `total_words`.
    ///
    /// Never fails: if the store is unusable a random seed word is returned with
    /// `degraded` set.
    pub async fn next(&self) -> ServedWord {
        match self.try_next().await {
            Ok(served) => served,
            Err(e) => {
                tracing::warn!("Serving fallback word, store unavailable: {:#}", e);
                Self::fallback()
            }
        }
    }

    async fn try_next(&self) -> Result<ServedWord> {
        self.ensure_seeded().await?;

        let mut attempts = 0;
        let (current, total) = loop {
            attempts += 1;

            let total = self.total().await?;
            if total == 0 {
                tracing::warn!("Word list is empty, serving fallback word");
                return Ok(Self::fallback());
            }

            // A missing cursor reads as 0 and is recreated by the swap below
            let observed = self.store.get(CURSOR_KEY).await?;
            let current = observed
                .as_deref()
                .and_then(|raw| raw.parse::<u64>().ok())
                .unwrap_or(0)
                % total;
            let next = (current + 1) % total;

            if self
                .store
                .compare_and_swap(CURSOR_KEY, observed.as_deref(), &next.to_string())
                .await?
            {
                break (current, total);
            }
            if attempts >= CURSOR_CAS_ATTEMPTS {
                tracing::warn!(
                    "Cursor contended {} times, serving index {} without advancing",
                    attempts,
                    current
                );
                break (current, total);
            }
        };

        self.word_at(current, total).await
    }

    /// Read `word:<index>`, restoring it from the seed list if it has gone missing.
    async fn word_at(&self, index: u64, total: u64) -> Result<ServedWord> {
        if let Some(word) = self.store.get(&word_key(index)).await? {
            return Ok(ServedWord {
                word,
                index: Some(index),
                degraded: false,
            });
        }

        let bound = usize::try_from(total).unwrap_or(usize::MAX).min(SEED_WORDS.len());
        let word = SEED_WORDS[rand::rng().random_range(0..bound)];

        // Only fill the hole; a concurrent append or seeding may have just written it
        let key = word_key(index);
        let word = if self.store.compare_and_swap(&key, None, word).await? {
            tracing::warn!("{} was missing, restored it with '{}'", key, word);
            word.to_string()
        } else {
            self.store.get(&key).await?.unwrap_or_else(|| word.to_string())
        };

        Ok(ServedWord {
            word,
            index: Some(index),
            degraded: false,
        })
    }

    fn fallback() -> ServedWord {
        let word = SEED_WORDS[rand::rng().random_range(0..SEED_WORDS.len())];
        ServedWord {
            word: word.to_string(),
            index: None,
            degraded: true,
        }
    }

    /// Every stored word in index order. Holes are skipped.
    pub async fn list(&self) -> Result<Vec<String>> {
        self.ensure_seeded().await?;
        let total = self.total().await?;
        let mut words = Vec::new();

        let mut start = 0;
        while start < total {
            let end = total.min(start + LIST_BATCH);
            let keys: Vec<String> = (start..end).map(word_key).collect();
            words.extend(self.store.get_many(&keys).await?.into_iter().flatten());
            start = end;
        }

        tracing::debug!("Listed {} of {} word slots", words.len(), total);
        Ok(words)
    }

    pub async fn reset(&self) -> Result<()> {
        self.ensure_seeded().await?;
        self.store.set(CURSOR_KEY, "0").await
    }

    pub async fn add(&self, word: &str) -> Result<Appended> {
        self.append(std::slice::from_ref(&word)).await
    }

    /// Append `words` in order at consecutive indices.
    pub async fn add_multiple(&self, words: &[String]) -> Result<Appended> {
        let words: Vec<&str> = words.iter().map(String::as_str).collect();
        self.append(&words).await
    }

    async fn append(&self, words: &[&str]) -> Result<Appended> {
        // Seeding first keeps the seed block from landing on top of this append
        self.ensure_seeded().await?;

        let count = words.len() as u64;
        if count == 0 {
            let total_words = self.stored_total().await?;
            return Ok(Appended {
                first_index: total_words,
                count,
                total_words,
            });
        }

        let delta = i64::try_from(count).context("Too many words in one append")?;
        let total_words = u64::try_from(self.store.incr_by(TOTAL_KEY, delta).await?)
            .context("total_words is negative")?;
        let first_index = total_words
            .checked_sub(count)
            .with_context(|| format!("{} was negative before this append", TOTAL_KEY))?;

        for (offset, word) in words.iter().enumerate() {
            self.store
                .set(&word_key(first_index + offset as u64), word)
                .await?;
        }

        tracing::info!(
            "Appended {} word(s) at index {} (total: {})",
            count,
            first_index,
            total_words
        );
        Ok(Appended {
            first_index,
            count,
            total_words,
        })
    }

    /// `total_words` as used for reading: absent or unparseable counts as the seed
    /// list length.
    async fn total(&self) -> Result<u64> {
        let raw = self.store.get(TOTAL_KEY).await?;
        Ok(raw
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(SEED_WORDS.len() as u64))
    }

    /// `total_words` as stored, absent counting as zero.
    async fn stored_total(&self) -> Result<u64> {
        match self.store.get(TOTAL_KEY).await? {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("{} holds a non-numeric value '{}'", TOTAL_KEY, raw)),
            None => Ok(0),
        }
    }
}
