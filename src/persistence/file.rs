//! JSON file backend (native)
//!
//! Writes go to a `.tmp` sibling first and are renamed over the save file so a
//! crash mid-write leaves the previous save intact.

use std::fs;
use std::path::{Path, PathBuf};

use super::store::{KeyValueStore, ValueMap};
use crate::error::GameError;

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: ValueMap,
}

impl JsonFileStore {
    /// Open a store at `path`. A missing or corrupt file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(json) => match ValueMap::from_json(&json) {
                Ok(values) => {
                    log::info!("Loaded {} saved keys from {}", values.len(), path.display());
                    values
                }
                Err(e) => {
                    log::warn!("Save file {} unreadable ({e}), starting fresh", path.display());
                    ValueMap::new()
                }
            },
            Err(_) => {
                log::info!("No save file at {}, starting fresh", path.display());
                ValueMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn values(&self) -> &ValueMap {
        &self.values
    }

    fn values_mut(&mut self) -> &mut ValueMap {
        &mut self.values
    }

    fn flush(&mut self) -> Result<(), GameError> {
        let json = self.values.to_json()?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Saved {} keys to {}", self.values.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "basket_legend_{}_{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_flush_and_reopen() {
        let path = temp_path("reopen");
        {
            let mut store = JsonFileStore::open(&path);
            store.set_u32("UnlockedLevels", 4);
            store.set_string("PlayerName", "Kai");
            store.flush().unwrap();
        }
        let store = JsonFileStore::open(&path);
        assert_eq!(store.get_u32("UnlockedLevels", 1), 4);
        assert_eq!(store.get_string("PlayerName", "Player"), "Kai");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, "{{{ not json").unwrap();
        let store = JsonFileStore::open(&path);
        assert!(store.values().is_empty());
        let _ = fs::remove_file(&path);
    }
}
