//! Store trait and the shared value map

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// A single persisted value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Int(i64),
    Float(f32),
    Text(String),
}

/// Ordered key → value map (ordered so saved files diff cleanly)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueMap(BTreeMap<String, StoredValue>);

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&StoredValue> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: &str, value: StoredValue) {
        self.0.insert(key.to_string(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<StoredValue> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Synchronous typed key/value storage.
///
/// Reads never fail: a missing key or a value of the wrong type yields the
/// caller's default. Writes land in memory immediately; `flush` commits them
/// to the backing medium.
pub trait KeyValueStore {
    fn values(&self) -> &ValueMap;
    fn values_mut(&mut self) -> &mut ValueMap;

    /// Commit pending writes to the backing medium
    fn flush(&mut self) -> Result<(), GameError>;

    fn has_key(&self, key: &str) -> bool {
        self.values().get(key).is_some()
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.values().get(key) {
            Some(StoredValue::Int(v)) => *v,
            _ => default,
        }
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.values_mut().insert(key, StoredValue::Int(value));
    }

    /// Unsigned read, falling back to `default` on negative or oversized values
    fn get_u32(&self, key: &str, default: u32) -> u32 {
        u32::try_from(self.get_int(key, i64::from(default))).unwrap_or(default)
    }

    fn set_u32(&mut self, key: &str, value: u32) {
        self.set_int(key, i64::from(value));
    }

    fn get_float(&self, key: &str, default: f32) -> f32 {
        match self.values().get(key) {
            Some(StoredValue::Float(v)) => *v,
            // Whole-number floats round-trip through JSON as integers
            Some(StoredValue::Int(v)) => *v as f32,
            _ => default,
        }
    }

    fn set_float(&mut self, key: &str, value: f32) {
        self.values_mut().insert(key, StoredValue::Float(value));
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get_int(key, i64::from(default)) == 1
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.set_int(key, i64::from(value));
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        match self.values().get(key) {
            Some(StoredValue::Text(v)) => v.clone(),
            _ => default.to_string(),
        }
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.values_mut()
            .insert(key, StoredValue::Text(value.to_string()));
    }

    fn delete_key(&mut self, key: &str) {
        self.values_mut().remove(key);
    }
}

/// Volatile store (tests, headless runs)
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: ValueMap,
    /// Number of flushes, for observing commit points
    flushes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flush_count(&self) -> u32 {
        self.flushes
    }
}

impl KeyValueStore for MemoryStore {
    fn values(&self) -> &ValueMap {
        &self.values
    }

    fn values_mut(&mut self) -> &mut ValueMap {
        &mut self.values
    }

    fn flush(&mut self) -> Result<(), GameError> {
        self.flushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_keys() {
        let store = MemoryStore::new();
        assert_eq!(store.get_int("PlayerLevel", 1), 1);
        assert_eq!(store.get_string("PlayerName", "Player"), "Player");
        assert_eq!(store.get_float("MasterVolume", 0.8), 0.8);
        assert!(!store.get_bool("IsMuted", false));
    }

    #[test]
    fn test_type_mismatch_yields_default() {
        let mut store = MemoryStore::new();
        store.set_string("PlayerLevel", "seven");
        assert_eq!(store.get_int("PlayerLevel", 1), 1);
    }

    #[test]
    fn test_negative_int_as_u32_falls_back() {
        let mut store = MemoryStore::new();
        store.set_int("UnlockedLevels", -3);
        assert_eq!(store.get_u32("UnlockedLevels", 1), 1);
    }

    #[test]
    fn test_json_round_trip_keeps_types() {
        let mut store = MemoryStore::new();
        store.set_int("Experience", 40);
        store.set_float("MusicVolume", 0.5);
        store.set_string("PlayerName", "Ana");

        let json = store.values().to_json().unwrap();
        let restored = ValueMap::from_json(&json).unwrap();
        assert_eq!(restored.get("Experience"), Some(&StoredValue::Int(40)));
        assert_eq!(restored.get("MusicVolume"), Some(&StoredValue::Float(0.5)));
        assert_eq!(
            restored.get("PlayerName"),
            Some(&StoredValue::Text("Ana".into()))
        );
    }

    #[test]
    fn test_flush_counts() {
        let mut store = MemoryStore::new();
        store.flush().unwrap();
        store.flush().unwrap();
        assert_eq!(store.flush_count(), 2);
    }
}
