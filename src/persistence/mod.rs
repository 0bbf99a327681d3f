//! Typed key/value persistence
//!
//! Features:
//! - Typed get-with-default / set by string key
//! - In-memory map shared by every backend
//! - Backends differ only in how `flush` writes the map out
//!   (memory: no-op, native: JSON file, web: LocalStorage)

mod store;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod web;

pub use store::{KeyValueStore, MemoryStore, StoredValue, ValueMap};

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;
