//! LocalStorage backend (WASM)
//!
//! The whole map is stored as one JSON item under a single LocalStorage key.

use super::store::{KeyValueStore, ValueMap};
use crate::error::GameError;

pub struct LocalStorageStore {
    storage_key: String,
    values: ValueMap,
}

impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }

    /// Load the map stored under `storage_key`, or start empty
    pub fn open(storage_key: &str) -> Self {
        let values = Self::storage()
            .and_then(|s| s.get_item(storage_key).ok().flatten())
            .and_then(|json| ValueMap::from_json(&json).ok());

        let values = match values {
            Some(values) => {
                log::info!("Loaded {} saved keys from LocalStorage", values.len());
                values
            }
            None => {
                log::info!("No saved data found, starting fresh");
                ValueMap::new()
            }
        };

        Self {
            storage_key: storage_key.to_string(),
            values,
        }
    }
}

impl KeyValueStore for LocalStorageStore {
    fn values(&self) -> &ValueMap {
        &self.values
    }

    fn values_mut(&mut self) -> &mut ValueMap {
        &mut self.values
    }

    fn flush(&mut self) -> Result<(), GameError> {
        let storage =
            Self::storage().ok_or(GameError::ReferenceMissing("window.localStorage"))?;
        let json = self.values.to_json()?;
        storage
            .set_item(&self.storage_key, &json)
            .map_err(|_| GameError::Persistence("LocalStorage write rejected".to_string()))
    }
}
