//! Key-value store trait and typed wrapper with automatic serialization.

use crate::StorageError;
use serde::{de::DeserializeOwned, Serialize};
use std::rc::Rc;

/// A durable client-local key-value store.
///
/// Implementations persist raw bytes under string keys. [`Storage`] layers
/// JSON serialization on top so callers work with typed values.
pub trait KeyValueStore {
    /// Get the bytes stored under `key`.
    ///
    /// Returns `None` if the key doesn't exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store bytes under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Delete the value stored under `key`.
    ///
    /// Deleting an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Check whether `key` has a stored value.
    fn exists(&self, key: &str) -> Result<bool, StorageError>;
}

/// Shared handles delegate, so one backing store can serve several owners.
impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        (**self).exists(key)
    }
}

/// Type-safe storage backed by any [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
///
/// # Example
///
/// ```rust,ignore
/// let storage = Storage::new(Box::new(MemoryStore::new()));
/// storage.set("cart-storage", &record)?;
/// let record: Option<CartRecord> = storage.get("cart-storage")?;
/// ```
pub struct Storage {
    store: Box<dyn KeyValueStore>,
}

impl Storage {
    /// Wrap a store implementation.
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the store.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the store.
    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the store.
    pub fn exists(&self, key: &str) -> Result<bool, StorageError> {
        self.store.exists(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        count: u32,
    }

    #[test]
    fn test_typed_round_trip() {
        let storage = Storage::new(Box::new(MemoryStore::new()));
        let record = Record {
            name: "caneca".to_string(),
            count: 3,
        };

        storage.set("record", &record).unwrap();
        let back: Option<Record> = storage.get("record").unwrap();
        assert_eq!(back, Some(record));
    }

    #[test]
    fn test_get_missing_key() {
        let storage = Storage::new(Box::new(MemoryStore::new()));
        let value: Option<Record> = storage.get("absent").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_get_corrupt_value_is_an_error() {
        let mem = MemoryStore::new();
        mem.set("record", b"not json").unwrap();

        let storage = Storage::new(Box::new(mem));
        let result: Result<Option<Record>, _> = storage.get("record");
        assert!(matches!(result, Err(StorageError::SerializeError(_))));
    }

    #[test]
    fn test_delete_and_exists() {
        let storage = Storage::new(Box::new(MemoryStore::new()));
        storage.set("record", &1u32).unwrap();
        assert!(storage.exists("record").unwrap());

        storage.delete("record").unwrap();
        assert!(!storage.exists("record").unwrap());
    }

    #[test]
    fn test_shared_handle_sees_writes() {
        let mem = Rc::new(MemoryStore::new());
        let storage = Storage::new(Box::new(Rc::clone(&mem)));

        storage.set("record", &7u32).unwrap();
        let raw = mem.get("record").unwrap().unwrap();
        assert_eq!(raw, b"7");
    }
}
