// SPDX-License-Identifier: Apache-2.0
//! Config service and storage port for the viewer.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage port for raw config blobs (keyed by logical name).
pub trait ConfigStore {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// I/O error while reading.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Thin service that deserializes config values out of a `ConfigStore`.
///
/// The viewer only reads configuration at startup; there is no save
/// path, keeping the scene/session-persistence non-goal intact.
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Create a new service using the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Load and deserialize a config value for `key`. Returns `Ok(None)`
    /// if the key is missing or its blob is empty.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        match self.store.load_raw(key) {
            Ok(bytes) => {
                if bytes.is_empty() {
                    return Ok(None);
                }
                let value = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

    struct MapStore(HashMap<String, Vec<u8>>);

    impl ConfigStore for MapStore {
        fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
            self.0.get(key).cloned().ok_or(ConfigError::NotFound)
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Demo {
        title: String,
    }

    #[test]
    fn missing_key_is_none() {
        let svc = ConfigService::new(MapStore(HashMap::new()));
        let got: Option<Demo> = svc.load("viewer").expect("load");
        assert!(got.is_none());
    }

    #[test]
    fn empty_blob_is_none() {
        let mut m = HashMap::new();
        m.insert("viewer".to_string(), Vec::new());
        let svc = ConfigService::new(MapStore(m));
        let got: Option<Demo> = svc.load("viewer").expect("load");
        assert!(got.is_none());
    }

    #[test]
    fn json_blob_deserializes() {
        let mut m = HashMap::new();
        m.insert("viewer".to_string(), br#"{"title":"orrery"}"#.to_vec());
        let svc = ConfigService::new(MapStore(m));
        let got: Option<Demo> = svc.load("viewer").expect("load");
        assert_eq!(
            got,
            Some(Demo {
                title: "orrery".into()
            })
        );
    }

    #[test]
    fn malformed_blob_is_an_error() {
        let mut m = HashMap::new();
        m.insert("viewer".to_string(), b"{nope".to_vec());
        let svc = ConfigService::new(MapStore(m));
        let got: Result<Option<Demo>, _> = svc.load("viewer");
        assert!(matches!(got, Err(ConfigError::Serde(_))));
    }
}
