//! Key-value persistence
//!
//! The game never touches browser storage directly: the client hands the
//! engine a [`KeyValueStore`] and tests use [`MemoryStore`].

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

pub const CARDS_KEY: &str = "cb_cards_cards";
pub const REWARD_CARDS_KEY: &str = "cb_cards_reward_cards";
pub const DECK_KEY: &str = "cb_cards_deck";
pub const LAST_SPAWN_KEY: &str = "cb_cards_last_spawn_time";

/// Every key the game writes
pub const ALL_KEYS: [&str; 4] = [CARDS_KEY, REWARD_CARDS_KEY, DECK_KEY, LAST_SPAWN_KEY];

/// Minimal string key-value store (the shape of `window.localStorage`)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store with an optional size quota
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes once keys plus values would exceed `quota_bytes`
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            values: BTreeMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.values
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota_bytes {
            if self.used_bytes_without(key) + key.len() + value.len() > quota {
                return Err(StorageError::QuotaExceeded);
            }
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Read and decode a JSON value; `Ok(None)` when the key is absent
pub fn load_json<S, T>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}

/// Encode a value as JSON and write it
pub fn save_json<S, T>(store: &mut S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|e| StorageError::Encode {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.set(key, &raw)
}

/// Last spawn time in epoch milliseconds.
///
/// Absent, unparseable and zero values all read as "never spawned".
pub fn load_last_spawn<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<i64>, StorageError> {
    let raw = store.get(LAST_SPAWN_KEY)?;
    Ok(raw
        .and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|ts| *ts != 0))
}

pub fn save_last_spawn<S: KeyValueStore + ?Sized>(store: &mut S, timestamp: i64) -> Result<(), StorageError> {
    store.set(LAST_SPAWN_KEY, &timestamp.to_string())
}
