//! Postgres-backed inventory repository.
//!
//! ## Schema
//!
//! One table, `inventory_items`, created by [`PostgresInventoryRepository::init_schema`]
//! when absent. `condition` is stored as its symbolic name under a `CHECK`
//! constraint, so the column can never hold a value `Condition` cannot represent.
//!
//! ## Error Mapping
//!
//! | SQLx error | RepositoryError |
//! |------------|-----------------|
//! | `ColumnDecode` / `ColumnNotFound` | `Corrupt` |
//! | anything else (pool closed, network, constraint) | `Storage` |
//!
//! ## Ordering
//!
//! `all` and `list` return rows ordered by `id` ascending.

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;

use stockkeep_core::{Entity, InventoryItemId, ValidationError};
use stockkeep_inventory::{Condition, InventoryItem, ItemFilter};

use super::{InventoryRepository, RepositoryError};
use crate::config::DatabaseConfig;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS inventory_items (
    id BIGSERIAL PRIMARY KEY,
    sku VARCHAR(63) NOT NULL,
    "count" INTEGER NOT NULL,
    "condition" TEXT NOT NULL DEFAULT 'New'
        CHECK ("condition" IN ('New', 'Used', 'OpenBox')),
    restock_level INTEGER NOT NULL,
    restock_amount INTEGER NOT NULL,
    in_stock BOOLEAN NOT NULL DEFAULT FALSE
)
"#;

const SELECT_BY_ID: &str = r#"
SELECT id, sku, "count", "condition", restock_level, restock_amount, in_stock
FROM inventory_items
WHERE id = $1
"#;

const SELECT_ALL: &str = r#"
SELECT id, sku, "count", "condition", restock_level, restock_amount, in_stock
FROM inventory_items
ORDER BY id ASC
"#;

const SELECT_BY_SKU: &str = r#"
SELECT id, sku, "count", "condition", restock_level, restock_amount, in_stock
FROM inventory_items
WHERE sku = $1
ORDER BY id ASC
"#;

const SELECT_BY_CONDITION: &str = r#"
SELECT id, sku, "count", "condition", restock_level, restock_amount, in_stock
FROM inventory_items
WHERE "condition" = $1
ORDER BY id ASC
"#;

const SELECT_BY_IN_STOCK: &str = r#"
SELECT id, sku, "count", "condition", restock_level, restock_amount, in_stock
FROM inventory_items
WHERE in_stock = $1
ORDER BY id ASC
"#;

/// Postgres-backed inventory store.
///
/// Uses an SQLx connection pool, which is `Send + Sync` and cheap to clone.
/// The pool is opened by [`connect`](Self::connect) and closed by
/// [`InventoryRepository::close`].
#[derive(Debug, Clone)]
pub struct PostgresInventoryRepository {
    pool: PgPool,
}

impl PostgresInventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool using `config`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, RepositoryError> {
        tracing::info!(max_connections = config.max_connections, "connecting to database");
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `inventory_items` table if it does not exist yet.
    #[instrument(skip(self), err)]
    pub async fn init_schema(&self) -> Result<(), RepositoryError> {
        tracing::info!("initializing database schema");
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("init_schema", e))?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl InventoryRepository for PostgresInventoryRepository {
    #[instrument(skip(self, item), fields(sku = %item.sku), err)]
    async fn create(&self, item: InventoryItem) -> Result<InventoryItem, RepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO inventory_items (
                sku, "count", "condition", restock_level, restock_amount, in_stock
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&item.sku)
        .bind(item.count)
        .bind(item.condition.as_str())
        .bind(item.restock_level)
        .bind(item.restock_amount)
        .bind(item.in_stock)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create", e))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| map_sqlx_error("create", e))?;
        tracing::info!(item_id = id, "created inventory item");
        Ok(item.without_id().with_id(InventoryItemId::new(id)))
    }

    #[instrument(skip(self, item), fields(sku = %item.sku), err)]
    async fn update(&self, item: &InventoryItem) -> Result<(), RepositoryError> {
        let id = item.id().ok_or(RepositoryError::MissingId)?;
        let result = sqlx::query(
            r#"
            UPDATE inventory_items
            SET sku = $1,
                "count" = $2,
                "condition" = $3,
                restock_level = $4,
                restock_amount = $5,
                in_stock = $6
            WHERE id = $7
            "#,
        )
        .bind(&item.sku)
        .bind(item.count)
        .bind(item.condition.as_str())
        .bind(item.restock_level)
        .bind(item.restock_amount)
        .bind(item.in_stock)
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self, item), fields(sku = %item.sku), err)]
    async fn delete(&self, item: &InventoryItem) -> Result<(), RepositoryError> {
        let id = item.id().ok_or(RepositoryError::MissingId)?;
        sqlx::query("DELETE FROM inventory_items WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;
        Ok(())
    }

    #[instrument(skip(self), fields(item_id = %id), err)]
    async fn find(&self, id: InventoryItemId) -> Result<Option<InventoryItem>, RepositoryError> {
        let row = sqlx::query(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find", e))?;
        row.as_ref().map(item_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn all(&self) -> Result<Vec<InventoryItem>, RepositoryError> {
        self.list(&ItemFilter::All).await
    }

    #[instrument(skip(self), fields(filter = %filter), err)]
    async fn list(&self, filter: &ItemFilter) -> Result<Vec<InventoryItem>, RepositoryError> {
        let rows = match filter {
            ItemFilter::All => sqlx::query(SELECT_ALL).fetch_all(&self.pool).await,
            ItemFilter::BySku(sku) => {
                sqlx::query(SELECT_BY_SKU)
                    .bind(sku)
                    .fetch_all(&self.pool)
                    .await
            }
            ItemFilter::ByCondition(condition) => {
                sqlx::query(SELECT_BY_CONDITION)
                    .bind(condition.as_str())
                    .fetch_all(&self.pool)
                    .await
            }
            ItemFilter::ByInStock(in_stock) => {
                sqlx::query(SELECT_BY_IN_STOCK)
                    .bind(*in_stock)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| map_sqlx_error("list", e))?;

        rows.iter().map(item_from_row).collect()
    }

    async fn close(&self) {
        tracing::info!("closing database pool");
        self.pool.close().await;
    }
}

fn item_from_row(row: &PgRow) -> Result<InventoryItem, RepositoryError> {
    let id: i64 = row.try_get("id").map_err(|e| map_sqlx_error("decode_row", e))?;
    let condition_name: String = row
        .try_get("condition")
        .map_err(|e| map_sqlx_error("decode_row", e))?;
    let condition: Condition = condition_name.parse().map_err(|e: ValidationError| {
        RepositoryError::Corrupt(format!("row {id}: {e}"))
    })?;

    let item = InventoryItem::new(
        row.try_get::<String, _>("sku").map_err(|e| map_sqlx_error("decode_row", e))?,
        row.try_get::<i32, _>("count").map_err(|e| map_sqlx_error("decode_row", e))?,
        condition,
        row.try_get::<i32, _>("restock_level")
            .map_err(|e| map_sqlx_error("decode_row", e))?,
        row.try_get::<i32, _>("restock_amount")
            .map_err(|e| map_sqlx_error("decode_row", e))?,
        row.try_get::<bool, _>("in_stock")
            .map_err(|e| map_sqlx_error("decode_row", e))?,
    );
    Ok(item.with_id(InventoryItemId::new(id)))
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> RepositoryError {
    tracing::error!(operation, error = %err, "database operation failed");
    match err {
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_) => {
            RepositoryError::Corrupt(format!("{operation}: {err}"))
        }
        other => RepositoryError::Storage(format!("{operation}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    //! Runs against a live database only when `TEST_DATABASE_URL` is set.

    use super::*;

    async fn repo() -> Option<PostgresInventoryRepository> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let repo = PostgresInventoryRepository::connect(&DatabaseConfig::new(url))
            .await
            .expect("failed to connect to TEST_DATABASE_URL");
        sqlx::query("DROP TABLE IF EXISTS inventory_items")
            .execute(repo.pool())
            .await
            .unwrap();
        repo.init_schema().await.unwrap();
        Some(repo)
    }

    #[tokio::test]
    async fn lifecycle_against_postgres() {
        let Some(repo) = repo().await else {
            return;
        };

        let created = repo
            .create(InventoryItem::new("foo", 3, Condition::New, 1, 5, true))
            .await
            .unwrap();
        repo.create(InventoryItem::new("bar", 0, Condition::OpenBox, 2, 4, false))
            .await
            .unwrap();
        let id = created.id().unwrap();

        let mut found = repo.find(id).await.unwrap().unwrap();
        assert_eq!(found, created);

        found.count = 42;
        repo.update(&found).await.unwrap();
        assert_eq!(repo.find(id).await.unwrap().unwrap().count, 42);

        let open_box = repo
            .list(&ItemFilter::ByCondition(Condition::OpenBox))
            .await
            .unwrap();
        assert_eq!(open_box.len(), 1);
        assert_eq!(open_box[0].sku, "bar");

        repo.delete(&found).await.unwrap();
        assert_eq!(repo.find(id).await.unwrap(), None);
        assert_eq!(repo.all().await.unwrap().len(), 1);

        repo.close().await;
    }
}
