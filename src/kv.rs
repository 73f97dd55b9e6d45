//! Key/value persistence the store writes through to

use std::collections::HashMap;

use crate::error::StorageError;

/// A synchronous string key/value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Process-local store; contents are gone when it is dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_overwrites_values() {
        let mut kv = MemoryStore::new();
        assert_eq!(kv.get("darkMode").unwrap(), None);
        kv.set("darkMode", "false").unwrap();
        kv.set("darkMode", "true").unwrap();
        assert_eq!(kv.get("darkMode").unwrap().as_deref(), Some("true"));
        assert_eq!(kv.entries.len(), 1);
    }
}
