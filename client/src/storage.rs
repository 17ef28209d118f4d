//! `window.localStorage` behind the core store trait

use cb_cards_core::error::StorageError;
use cb_cards_core::log;
use cb_cards_core::storage::KeyValueStore;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DomException, Storage};

/// Browser local storage; absent in private modes and some embedded views
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn("localStorage unavailable, progress will not be saved");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage.as_ref().ok_or_else(|| StorageError::Unavailable {
            reason: "localStorage is not available".to_string(),
        })
    }
}

/// Browsers disagree on the name; 22 is the legacy code for all of them
fn is_quota_error(err: &DomException) -> bool {
    matches!(err.name().as_str(), "QuotaExceededError" | "NS_ERROR_DOM_QUOTA_REACHED") || err.code() == 22
}

fn to_storage_error(err: JsValue) -> StorageError {
    match err.dyn_into::<DomException>() {
        Ok(dom) if is_quota_error(&dom) => StorageError::QuotaExceeded,
        Ok(dom) => StorageError::Backend {
            reason: format!("{}: {}", dom.name(), dom.message()),
        },
        Err(other) => StorageError::Backend {
            reason: format!("{:?}", other),
        },
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match &self.storage {
            Some(storage) => storage.get_item(key).map_err(to_storage_error),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(to_storage_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(to_storage_error)
    }
}
