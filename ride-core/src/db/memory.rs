use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::debug;

use super::factory::GatewayFactory;
use super::gateway::{GatewayError, PersistenceGateway, StorageKey};

/// Process-local key/value store.
///
/// Writes can be made to fail on demand so callers can exercise their
/// save-failure paths without a real backend.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    entries: Mutex<HashMap<StorageKey, String>>,
    fail_writes: AtomicBool,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing blobs.
    pub fn with_entries(entries: impl IntoIterator<Item = (StorageKey, String)>) -> Self {
        Self {
            entries: Mutex::new(entries.into_iter().collect()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// When set, `set` and `multi_remove` return [`GatewayError::Backend`]
    /// without touching the stored blobs.
    pub fn set_fail_writes(
        &self,
        fail: bool,
    ) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current blob under `key`, bypassing the async interface.
    pub fn snapshot(
        &self,
        key: StorageKey,
    ) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(&key).cloned())
    }

    fn check_writable(&self) -> Result<(), GatewayError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(GatewayError::Backend("writes are disabled".to_string()));
        }
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<StorageKey, String>>, GatewayError> {
        self.entries
            .lock()
            .map_err(|e| GatewayError::Backend(format!("store lock poisoned: {e}")))
    }
}

#[async_trait]
impl PersistenceGateway for InMemoryGateway {
    async fn get(
        &self,
        key: StorageKey,
    ) -> Result<Option<String>, GatewayError> {
        Ok(self.lock()?.get(&key).cloned())
    }

    async fn set(
        &self,
        key: StorageKey,
        blob: &str,
    ) -> Result<(), GatewayError> {
        self.check_writable()?;
        debug!(key = %key, bytes = blob.len(), "storing blob in memory");
        self.lock()?.insert(key, blob.to_string());
        Ok(())
    }

    async fn multi_remove(
        &self,
        keys: &[StorageKey],
    ) -> Result<(), GatewayError> {
        self.check_writable()?;
        let mut entries = self.lock()?;
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }
}

/// Factory for the `memory` backend. The connection string is ignored.
pub struct MemoryGatewayFactory;

#[async_trait]
impl GatewayFactory for MemoryGatewayFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _connection_string: &str,
    ) -> Result<Box<dyn PersistenceGateway>, GatewayError> {
        Ok(Box::new(InMemoryGateway::new()))
    }
}
