use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Storage error: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Serialization(err.to_string())
    }
}

/// Keys under which the tracker stores its blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Records,
    Settings,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Records => "records",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value storage for serialized records and settings.
///
/// Blobs are opaque strings to the gateway; the tracker owns their JSON
/// encoding.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Stored blob for `key`, or `None` when nothing was ever saved.
    async fn get(
        &self,
        key: StorageKey,
    ) -> Result<Option<String>, GatewayError>;

    /// Stores `blob` under `key`, replacing any previous value.
    async fn set(
        &self,
        key: StorageKey,
        blob: &str,
    ) -> Result<(), GatewayError>;

    /// Removes every key in `keys`. Either all are removed or none are.
    async fn multi_remove(
        &self,
        keys: &[StorageKey],
    ) -> Result<(), GatewayError>;
}

/// Shared gateways, so a caller can keep a handle on the store it hands to a tracker.
#[async_trait]
impl<G: PersistenceGateway + ?Sized> PersistenceGateway for Arc<G> {
    async fn get(
        &self,
        key: StorageKey,
    ) -> Result<Option<String>, GatewayError> {
        (**self).get(key).await
    }

    async fn set(
        &self,
        key: StorageKey,
        blob: &str,
    ) -> Result<(), GatewayError> {
        (**self).set(key, blob).await
    }

    async fn multi_remove(
        &self,
        keys: &[StorageKey],
    ) -> Result<(), GatewayError> {
        (**self).multi_remove(keys).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn storage_keys_use_stable_names() {
        assert_eq!(StorageKey::Records.as_str(), "records");
        assert_eq!(StorageKey::Settings.to_string(), "settings");
    }

    #[test]
    fn json_errors_become_serialization_errors() {
        let err = serde_json::from_str::<Vec<u32>>("{not json").unwrap_err();

        assert!(matches!(GatewayError::from(err), GatewayError::Serialization(_)));
    }
}
