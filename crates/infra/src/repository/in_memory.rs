use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use stockkeep_core::{Entity, InventoryItemId};
use stockkeep_inventory::{InventoryItem, ItemFilter};

use super::{InventoryRepository, RepositoryError};

#[derive(Debug)]
struct State {
    next_id: i64,
    items: BTreeMap<InventoryItemId, InventoryItem>,
}

/// In-memory inventory store.
///
/// Intended for tests/dev. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct InMemoryInventoryRepository {
    state: RwLock<State>,
}

impl InMemoryInventoryRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                next_id: 1,
                items: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryInventoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::Storage("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl InventoryRepository for InMemoryInventoryRepository {
    async fn create(&self, item: InventoryItem) -> Result<InventoryItem, RepositoryError> {
        let mut state = self.state.write().map_err(poisoned)?;
        let id = InventoryItemId::new(state.next_id);
        state.next_id += 1;

        let stored = item.without_id().with_id(id);
        state.items.insert(id, stored.clone());
        tracing::info!(item_id = %id, sku = %stored.sku, "created inventory item");
        Ok(stored)
    }

    async fn update(&self, item: &InventoryItem) -> Result<(), RepositoryError> {
        let id = item.id().ok_or(RepositoryError::MissingId)?;
        let mut state = self.state.write().map_err(poisoned)?;
        match state.items.get_mut(&id) {
            Some(slot) => {
                *slot = item.clone();
                tracing::info!(item_id = %id, sku = %item.sku, "saved inventory item");
                Ok(())
            }
            None => Err(RepositoryError::NotFound(id)),
        }
    }

    async fn delete(&self, item: &InventoryItem) -> Result<(), RepositoryError> {
        let id = item.id().ok_or(RepositoryError::MissingId)?;
        let mut state = self.state.write().map_err(poisoned)?;
        if state.items.remove(&id).is_some() {
            tracing::info!(item_id = %id, sku = %item.sku, "deleted inventory item");
        }
        Ok(())
    }

    async fn find(&self, id: InventoryItemId) -> Result<Option<InventoryItem>, RepositoryError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.items.get(&id).cloned())
    }

    async fn all(&self) -> Result<Vec<InventoryItem>, RepositoryError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.items.values().cloned().collect())
    }

    async fn list(&self, filter: &ItemFilter) -> Result<Vec<InventoryItem>, RepositoryError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(filter.apply(state.items.values()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockkeep_inventory::Condition;

    fn item(sku: &str, condition: Condition, in_stock: bool) -> InventoryItem {
        InventoryItem::new(sku, 10, condition, 2, 20, in_stock)
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let repo = InMemoryInventoryRepository::new();
        let a = repo.create(item("A", Condition::New, true)).await.unwrap();
        let b = repo.create(item("B", Condition::Used, false)).await.unwrap();

        assert_eq!(a.id(), Some(InventoryItemId::new(1)));
        assert_eq!(b.id(), Some(InventoryItemId::new(2)));
        assert_eq!(repo.find(InventoryItemId::new(2)).await.unwrap(), Some(b));
    }

    #[tokio::test]
    async fn create_ignores_caller_supplied_id() {
        let repo = InMemoryInventoryRepository::new();
        let forged = item("A", Condition::New, true).with_id(InventoryItemId::new(500));
        let stored = repo.create(forged).await.unwrap();
        assert_eq!(stored.id(), Some(InventoryItemId::new(1)));
        assert_eq!(repo.find(InventoryItemId::new(500)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_requires_id_and_existing_row() {
        let repo = InMemoryInventoryRepository::new();
        assert_eq!(
            repo.update(&item("A", Condition::New, true)).await,
            Err(RepositoryError::MissingId)
        );

        let ghost = item("A", Condition::New, true).with_id(InventoryItemId::new(42));
        assert_eq!(
            repo.update(&ghost).await,
            Err(RepositoryError::NotFound(InventoryItemId::new(42)))
        );

        let mut stored = repo.create(item("A", Condition::New, true)).await.unwrap();
        stored.count = 99;
        repo.update(&stored).await.unwrap();
        let found = repo.find(stored.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(found.count, 99);
    }

    #[tokio::test]
    async fn delete_removes_and_is_idempotent() {
        let repo = InMemoryInventoryRepository::new();
        let stored = repo.create(item("A", Condition::New, true)).await.unwrap();

        repo.delete(&stored).await.unwrap();
        assert_eq!(repo.find(stored.id().unwrap()).await.unwrap(), None);
        repo.delete(&stored).await.unwrap();
        assert!(repo.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_applies_filter_in_id_order() {
        let repo = InMemoryInventoryRepository::new();
        repo.create(item("foo", Condition::New, true)).await.unwrap();
        repo.create(item("bar", Condition::OpenBox, false)).await.unwrap();
        repo.create(item("foo", Condition::Used, false)).await.unwrap();

        let foos = repo.list(&ItemFilter::BySku("foo".into())).await.unwrap();
        assert_eq!(foos.len(), 2);
        assert!(foos[0].id() < foos[1].id());

        let open_box = repo.list(&ItemFilter::ByCondition(Condition::OpenBox)).await.unwrap();
        assert_eq!(open_box.len(), 1);
        assert_eq!(open_box[0].sku, "bar");

        let out = repo.list(&ItemFilter::ByInStock(false)).await.unwrap();
        assert_eq!(out.len(), 2);

        assert_eq!(repo.list(&ItemFilter::All).await.unwrap().len(), 3);
    }
}
