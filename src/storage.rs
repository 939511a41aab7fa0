//! Persistent credential store.
//!
//! Persists the session token and identity snapshot across process restarts
//! using the system keyring. Persistence is best-effort: every failure —
//! keyring unavailable, entry unreadable, stored text unparsable — is
//! logged and degraded to "no stored value" or a silent no-op, never raised
//! to callers. A host without a usable keyring simply has a memory-only
//! session for this process lifetime.

use std::collections::HashMap;
use std::sync::Mutex;

use keyring::Entry;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Persisted key for the bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Persisted key for the identity snapshot.
pub const AUTH_USER_KEY: &str = "auth_user";

/// Every key the store may hold; `clear` removes exactly these.
const PERSISTED_KEYS: [&str; 2] = [AUTH_TOKEN_KEY, AUTH_USER_KEY];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("credential store operation failed: {0}")]
    Backend(String),
}

impl From<keyring::Error> for StoreError {
    fn from(err: keyring::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Raw text storage underneath [`CredentialStore`].
///
/// In production this is the system keyring; tests inject [`MemoryBackend`]
/// or a failing double.
pub trait SecretBackend: Send + Sync {
    /// Read the stored text for `key`; `Ok(None)` when nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Store `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Remove `key`. Idempotent: removing an absent key succeeds.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// System keyring backend: one entry per key under a fixed service name.
pub struct KeyringBackend {
    service: String,
}

impl KeyringBackend {
    pub fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry, StoreError> {
        Entry::new(&self.service, key).map_err(StoreError::from)
    }
}

impl SecretBackend for KeyringBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StoreError::from(e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entry(key)?.set_password(value)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StoreError::from(e)),
        }
    }
}

/// In-memory backend for tests and for hosts without a usable keyring.
#[derive(Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<String, String>>,
}

impl SecretBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self
            .values
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        values.remove(key);
        Ok(())
    }
}

/// Typed, best-effort key/value store for session credentials.
///
/// Values are serialized to JSON text on write and parsed on read; a value
/// that no longer parses is treated as absent.
pub struct CredentialStore {
    backend: Box<dyn SecretBackend>,
}

impl CredentialStore {
    pub fn new(backend: Box<dyn SecretBackend>) -> Self {
        Self { backend }
    }

    /// Store backed by the system keyring under `service`.
    pub fn keyring(service: &str) -> Self {
        Self::new(Box::new(KeyringBackend::new(service)))
    }

    /// Memory-only store (process lifetime).
    pub fn memory() -> Self {
        Self::new(Box::new(MemoryBackend::default()))
    }

    /// Read and parse the value stored under `key`.
    ///
    /// Backend failures and parse failures both yield `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let text = match self.backend.read(key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("credential store read failed for '{}': {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("stored value for '{}' is not valid JSON, ignoring: {}", key, e);
                None
            }
        }
    }

    /// Serialize and store `value` under `key`. Failures are logged.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let text = match serde_json::to_string(value) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("failed to serialize value for '{}': {}", key, e);
                return;
            }
        };
        if let Err(e) = self.backend.write(key, &text) {
            log::warn!("credential store write failed for '{}': {}", key, e);
        }
    }

    /// Remove the value stored under `key`. Failures are logged.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.delete(key) {
            log::warn!("credential store delete failed for '{}': {}", key, e);
        }
    }

    /// Remove every persisted session key.
    pub fn clear(&self) {
        for key in PERSISTED_KEYS {
            self.remove(key);
        }
    }
}
