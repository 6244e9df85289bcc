//! Persistence interface for inventory records.
//!
//! The routing layer holds an `Arc<dyn InventoryRepository>` and never touches
//! the underlying store directly.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stockkeep_core::InventoryItemId;
use stockkeep_inventory::{InventoryItem, ItemFilter};

pub use in_memory::InMemoryInventoryRepository;
pub use postgres::PostgresInventoryRepository;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// `update`/`delete` called on a record the store never assigned an id to.
    #[error("update called with empty ID field")]
    MissingId,

    #[error("inventory item {0} not found")]
    NotFound(InventoryItemId),

    /// A stored row could not be mapped back into a record.
    #[error("corrupt inventory row: {0}")]
    Corrupt(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Store for inventory records.
///
/// Implementations must:
/// - assign a fresh id on `create`, ignoring any id already on the record
/// - reject `update` of a record without an id
/// - return records in ascending id order from `all` and `list`
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Persist a new record and return it with its assigned id.
    async fn create(&self, item: InventoryItem) -> Result<InventoryItem, RepositoryError>;

    /// Overwrite an existing record (matched by id).
    async fn update(&self, item: &InventoryItem) -> Result<(), RepositoryError>;

    /// Remove a record. Removing an already-absent row is not an error.
    async fn delete(&self, item: &InventoryItem) -> Result<(), RepositoryError>;

    async fn find(&self, id: InventoryItemId) -> Result<Option<InventoryItem>, RepositoryError>;

    async fn all(&self) -> Result<Vec<InventoryItem>, RepositoryError>;

    /// Records matching `filter`. Stores that can push the predicate down
    /// should override this.
    async fn list(&self, filter: &ItemFilter) -> Result<Vec<InventoryItem>, RepositoryError> {
        Ok(filter.apply(&self.all().await?))
    }

    /// Release underlying resources. The repository must not be used afterwards.
    async fn close(&self) {}
}

#[async_trait]
impl<S> InventoryRepository for Arc<S>
where
    S: InventoryRepository + ?Sized,
{
    async fn create(&self, item: InventoryItem) -> Result<InventoryItem, RepositoryError> {
        (**self).create(item).await
    }

    async fn update(&self, item: &InventoryItem) -> Result<(), RepositoryError> {
        (**self).update(item).await
    }

    async fn delete(&self, item: &InventoryItem) -> Result<(), RepositoryError> {
        (**self).delete(item).await
    }

    async fn find(&self, id: InventoryItemId) -> Result<Option<InventoryItem>, RepositoryError> {
        (**self).find(id).await
    }

    async fn all(&self) -> Result<Vec<InventoryItem>, RepositoryError> {
        (**self).all().await
    }

    async fn list(&self, filter: &ItemFilter) -> Result<Vec<InventoryItem>, RepositoryError> {
        (**self).list(filter).await
    }

    async fn close(&self) {
        (**self).close().await
    }
}
