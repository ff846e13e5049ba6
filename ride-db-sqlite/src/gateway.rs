use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use ride_core::{GatewayError, PersistenceGateway, StorageKey};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

pub struct SqliteGateway {
    pool: SqlitePool,
}

impl SqliteGateway {
    /// Opens `database_url`, creating the file when it does not exist.
    ///
    /// Accepts sqlx URLs (`sqlite://ledger.db`, `sqlite::memory:`) as well as
    /// bare paths and `:memory:`.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database url: {}", database_url))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// When `key` was last written, in UTC.
    pub async fn last_updated(
        &self,
        key: StorageKey,
    ) -> Result<Option<NaiveDateTime>, GatewayError> {
        let row = sqlx::query("SELECT updated_at FROM kv_store WHERE key = ?")
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;

        row.map(|row| row.try_get::<NaiveDateTime, _>("updated_at"))
            .transpose()
            .map_err(backend)
    }
}

fn backend(err: sqlx::Error) -> GatewayError {
    GatewayError::Backend(err.to_string())
}

#[async_trait]
impl PersistenceGateway for SqliteGateway {
    async fn get(
        &self,
        key: StorageKey,
    ) -> Result<Option<String>, GatewayError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;

        row.map(|row| row.try_get::<String, _>("value"))
            .transpose()
            .map_err(backend)
    }

    async fn set(
        &self,
        key: StorageKey,
        blob: &str,
    ) -> Result<(), GatewayError> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key.as_str())
        .bind(blob)
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        debug!(key = %key, bytes = blob.len(), "stored blob");
        Ok(())
    }

    async fn multi_remove(
        &self,
        keys: &[StorageKey],
    ) -> Result<(), GatewayError> {
        let mut tx = self.pool.begin().await.map_err(backend)?;
        for key in keys {
            sqlx::query("DELETE FROM kv_store WHERE key = ?")
                .bind(key.as_str())
                .execute(&mut *tx)
                .await
                .map_err(backend)?;
        }
        tx.commit().await.map_err(backend)?;

        debug!(count = keys.len(), "removed keys");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn setup_test_db() -> SqliteGateway {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        let gateway = SqliteGateway::new_with_pool(pool).await;
        gateway.run_migrations().await.unwrap();
        gateway
    }

    // =========================================================================
    // get / set tests
    // =========================================================================

    #[tokio::test]
    async fn get_missing_key_is_none() {
        let gateway = setup_test_db().await;

        assert_eq!(gateway.get(StorageKey::Records).await, Ok(None));
    }

    #[tokio::test]
    async fn set_then_get_round_trips_blob() {
        let gateway = setup_test_db().await;
        let blob = r#"[{"id":"a","date":"2025-06-15"}]"#;

        gateway.set(StorageKey::Records, blob).await.unwrap();

        assert_eq!(gateway.get(StorageKey::Records).await, Ok(Some(blob.to_string())));
        assert_eq!(gateway.get(StorageKey::Settings).await, Ok(None));
    }

    #[tokio::test]
    async fn set_upserts_existing_key() {
        let gateway = setup_test_db().await;

        gateway.set(StorageKey::Settings, "{\"v\":1}").await.unwrap();
        gateway.set(StorageKey::Settings, "{\"v\":2}").await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store")
            .fetch_one(gateway.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            gateway.get(StorageKey::Settings).await,
            Ok(Some("{\"v\":2}".to_string()))
        );
    }

    #[tokio::test]
    async fn last_updated_is_set_on_write() {
        let gateway = setup_test_db().await;

        assert_eq!(gateway.last_updated(StorageKey::Records).await, Ok(None));

        gateway.set(StorageKey::Records, "[]").await.unwrap();

        assert!(gateway.last_updated(StorageKey::Records).await.unwrap().is_some());
    }

    // =========================================================================
    // multi_remove tests
    // =========================================================================

    #[tokio::test]
    async fn multi_remove_deletes_listed_keys() {
        let gateway = setup_test_db().await;
        gateway.set(StorageKey::Records, "[]").await.unwrap();
        gateway.set(StorageKey::Settings, "{}").await.unwrap();

        gateway
            .multi_remove(&[StorageKey::Records, StorageKey::Settings])
            .await
            .unwrap();

        assert_eq!(gateway.get(StorageKey::Records).await, Ok(None));
        assert_eq!(gateway.get(StorageKey::Settings).await, Ok(None));
    }

    #[tokio::test]
    async fn multi_remove_of_absent_keys_succeeds() {
        let gateway = setup_test_db().await;

        let result = gateway.multi_remove(&[StorageKey::Records]).await;

        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn missing_table_reports_backend_error() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let gateway = SqliteGateway::new_with_pool(pool).await;

        let result = gateway.get(StorageKey::Records).await;

        assert!(matches!(result, Err(GatewayError::Backend(_))));
    }

    // =========================================================================
    // connection tests
    // =========================================================================

    #[tokio::test]
    async fn new_accepts_bare_memory_path() {
        let gateway = SqliteGateway::new(":memory:").await.unwrap();

        gateway.run_migrations().await.unwrap();

        assert_eq!(gateway.get(StorageKey::Settings).await, Ok(None));
    }
}
