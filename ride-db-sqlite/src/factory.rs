use async_trait::async_trait;
use ride_core::db::GatewayFactory;
use ride_core::{GatewayError, PersistenceGateway};
use tracing::info;

use crate::gateway::SqliteGateway;

/// Opens the `"sqlite"` backend.
///
/// ```rust,no_run
/// use ride_core::db::GatewayRegistry;
/// use ride_db_sqlite::SqliteGatewayFactory;
///
/// let mut registry = GatewayRegistry::with_memory();
/// registry.register(Box::new(SqliteGatewayFactory));
/// ```
pub struct SqliteGatewayFactory;

#[async_trait]
impl GatewayFactory for SqliteGatewayFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// `connection_string` is a file path (created when missing),
    /// `":memory:"`, or a full sqlx SQLite URL.
    async fn create(
        &self,
        connection_string: &str,
    ) -> Result<Box<dyn PersistenceGateway>, GatewayError> {
        let gateway = SqliteGateway::new(connection_string)
            .await
            .map_err(|e| GatewayError::Connection(format!("{e:#}")))?;
        gateway
            .run_migrations()
            .await
            .map_err(|e| GatewayError::Backend(format!("{e:#}")))?;

        info!(database = %connection_string, "sqlite gateway ready");
        Ok(Box::new(gateway))
    }
}
