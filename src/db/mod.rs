//! Storage layer (key-value).
//!
//! Values are JSON strings keyed by collection name, the same shape a
//! browser's local storage holds.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use std::sync::Arc;

/// Storage keys as constants.
pub mod collections {
    pub const PRODUCTS: &str = "products";
    pub const WORKOUTS: &str = "workouts";
}

/// String-keyed, string-valued persistent store.
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `Ok(None)` if the key was never set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Shared handle used by the application state.
pub type SharedStore = Arc<dyn KeyValueStore>;
