//! Local key-value persistence
//!
//! Features:
//! - `KeyValueStore` capability (`get`/`set`/`delete`) with in-memory, file and LocalStorage backends
//! - Storage key derivation scoped by grid shape, catalog size and pool
//! - Per-card mark sets stored as JSON arrays
//!
//! Read and write failures are absorbed here: callers fall back to defaults
//! and keep their in-memory state.

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
pub mod keys;
pub mod marks;
pub mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
pub use keys::StorageKeys;
pub use marks::{MarkSet, MarkStore};
pub use memory::MemoryStore;

use crate::error::BingoError;

/// Minimal string → string persistence capability
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, BingoError>;
    /// Replace the whole value; on error the previous value is untouched
    fn set(&mut self, key: &str, value: &str) -> Result<(), BingoError>;
    fn delete(&mut self, key: &str) -> Result<(), BingoError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, BingoError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BingoError> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<(), BingoError> {
        (**self).delete(key)
    }
}

/// Read a key, treating an unreadable store as an absent value
pub(crate) fn read_or_absent<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("{}", err);
            None
        }
    }
}

/// Write a key, logging and swallowing failures. Returns whether it stuck.
pub(crate) fn write_or_log<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, value: &str) -> bool {
    match store.set(key, value) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("{} (continuing with in-memory state)", err);
            false
        }
    }
}

/// Delete a key, logging and swallowing failures
pub(crate) fn delete_or_log<S: KeyValueStore + ?Sized>(store: &mut S, key: &str) -> bool {
    match store.delete(key) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("{}", err);
            false
        }
    }
}
