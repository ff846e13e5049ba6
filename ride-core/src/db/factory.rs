//! Choosing and opening a storage backend at runtime.

use async_trait::async_trait;
use tracing::info;

use super::gateway::{GatewayError, PersistenceGateway, StorageKey};
use super::memory::MemoryGatewayFactory;

/// Environment variable selecting the storage backend.
pub const BACKEND_ENV_VAR: &str = "RIDE_LEDGER_BACKEND";
/// Environment variable holding the backend connection string.
pub const CONNECTION_ENV_VAR: &str = "RIDE_LEDGER_DB";

/// Which backend to open, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Lowercase backend name, e.g. `memory` or `sqlite`.
    pub backend: String,
    /// Passed to the backend untouched; `memory` ignores it.
    pub connection_string: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            connection_string: String::new(),
        }
    }
}

impl GatewayConfig {
    /// Reads [`BACKEND_ENV_VAR`] and [`CONNECTION_ENV_VAR`], keeping the
    /// defaults for anything unset or blank.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`GatewayConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            backend: read(BACKEND_ENV_VAR)
                .map(|value| value.to_lowercase())
                .unwrap_or(defaults.backend),
            connection_string: read(CONNECTION_ENV_VAR).unwrap_or(defaults.connection_string),
        }
    }
}

/// Opens one kind of key-value store.
#[async_trait]
pub trait GatewayFactory: Send + Sync {
    fn backend_name(&self) -> &'static str;

    /// Connects to `connection_string`, preparing the store (tables,
    /// migrations) so both [`StorageKey`]s can be written right away.
    async fn create(
        &self,
        connection_string: &str,
    ) -> Result<Box<dyn PersistenceGateway>, GatewayError>;
}

/// The backends a process can open, in registration order.
pub struct GatewayRegistry {
    factories: Vec<Box<dyn GatewayFactory>>,
}

impl GatewayRegistry {
    /// A registry that knows no backends yet.
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// A registry that can already open the `memory` backend.
    pub fn with_memory() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(MemoryGatewayFactory));
        registry
    }

    /// Adds a backend. A later factory with the same name replaces the
    /// earlier one in place.
    pub fn register(
        &mut self,
        factory: Box<dyn GatewayFactory>,
    ) {
        let name = factory.backend_name();
        match self.factories.iter_mut().find(|f| f.backend_name() == name) {
            Some(slot) => *slot = factory,
            None => self.factories.push(factory),
        }
    }

    pub fn backends(&self) -> Vec<&'static str> {
        self.factories.iter().map(|f| f.backend_name()).collect()
    }

    /// Opens the backend `config` names and checks it answers a read of
    /// the settings key before handing it out.
    ///
    /// # Errors
    /// * [`GatewayError::Configuration`] for an unregistered backend.
    /// * [`GatewayError::Connection`] when the opened store cannot be read.
    /// * Whatever the backend's factory reports.
    pub async fn open(
        &self,
        config: &GatewayConfig,
    ) -> Result<Box<dyn PersistenceGateway>, GatewayError> {
        let factory = self
            .factories
            .iter()
            .find(|f| f.backend_name() == config.backend)
            .ok_or_else(|| {
                GatewayError::Configuration(format!(
                    "unknown backend '{}'; available: {}",
                    config.backend,
                    self.backends().join(", ")
                ))
            })?;

        let gateway = factory.create(&config.connection_string).await?;
        gateway
            .get(StorageKey::Settings)
            .await
            .map_err(|e| GatewayError::Connection(format!("{} is not readable: {e}", config.backend)))?;

        info!(backend = %config.backend, "storage backend opened");
        Ok(gateway)
    }
}

impl Default for GatewayRegistry {
    fn default() -> Self {
        Self::with_memory()
    }
}
