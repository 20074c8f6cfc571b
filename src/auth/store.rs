//! Backends for persisting secrets by `(service, key)`.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StoreError;

/// Trait for a key/value secret store.
///
/// Implement this trait to persist the bearer token somewhere other than the
/// built-in backends, for example a secrets manager.
pub trait SecretStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key is not present.
    fn get(&self, service: &str, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set(&self, service: &str, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a value. Removing a missing key is not an error.
    fn delete(&self, service: &str, key: &str) -> Result<(), StoreError>;
}

/// In-process store. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<(String, String), String>>,
    max_value_len: Option<usize>,
}

impl MemoryStore {
    /// Create an empty store without a value length limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects values longer than `max` characters,
    /// like platform credential stores do.
    pub fn with_max_value_len(max: usize) -> Self {
        Self {
            entries: Mutex::default(),
            max_value_len: Some(max),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.lock().map(|e| e.len()).unwrap_or_default()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<(String, String), String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl SecretStore for MemoryStore {
    fn get(&self, service: &str, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.lock()?;
        Ok(entries
            .get(&(service.to_string(), key.to_string()))
            .cloned())
    }

    fn set(&self, service: &str, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(max) = self.max_value_len {
            let len = value.chars().count();
            if len > max {
                return Err(StoreError::InvalidValue(format!(
                    "{len} characters exceeds the limit of {max}"
                )));
            }
        }
        self.lock()?
            .insert((service.to_string(), key.to_string()), value.to_string());
        Ok(())
    }

    fn delete(&self, service: &str, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(&(service.to_string(), key.to_string()));
        Ok(())
    }
}

/// OS credential store (Keychain, Windows Credential Manager, kernel keyutils).
#[cfg(feature = "keyring")]
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyringStore;

#[cfg(feature = "keyring")]
impl KeyringStore {
    /// Create a handle to the OS credential store.
    pub fn new() -> Self {
        Self
    }

    fn entry(service: &str, key: &str) -> Result<keyring::Entry, StoreError> {
        keyring::Entry::new(service, key).map_err(map_keyring_error)
    }
}

#[cfg(feature = "keyring")]
fn map_keyring_error(error: keyring::Error) -> StoreError {
    match error {
        keyring::Error::TooLong(..) | keyring::Error::Invalid(..) | keyring::Error::BadEncoding(_) => {
            StoreError::InvalidValue(error.to_string())
        }
        other => StoreError::Unavailable(other.to_string()),
    }
}

#[cfg(feature = "keyring")]
impl SecretStore for KeyringStore {
    fn get(&self, service: &str, key: &str) -> Result<Option<String>, StoreError> {
        match Self::entry(service, key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(map_keyring_error(e)),
        }
    }

    fn set(&self, service: &str, key: &str, value: &str) -> Result<(), StoreError> {
        Self::entry(service, key)?
            .set_password(value)
            .map_err(map_keyring_error)
    }

    fn delete(&self, service: &str, key: &str) -> Result<(), StoreError> {
        match Self::entry(service, key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(map_keyring_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("svc", "k").unwrap(), None);
        store.set("svc", "k", "v1").unwrap();
        store.set("svc", "k", "v2").unwrap();
        assert_eq!(store.get("svc", "k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.get("other", "k").unwrap(), None);
        store.delete("svc", "k").unwrap();
        store.delete("svc", "k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_value_limit() {
        let store = MemoryStore::with_max_value_len(4);
        store.set("svc", "k", "abcd").unwrap();
        let err = store.set("svc", "k", "abcde").unwrap_err();
        assert!(matches!(err, StoreError::InvalidValue(_)));
        assert_eq!(store.get("svc", "k").unwrap().as_deref(), Some("abcd"));
    }
}
