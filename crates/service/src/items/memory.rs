use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::domain::{seed_items, Item, ItemChanges, NewItem};
use super::repository::ItemRepository;
use crate::errors::ServiceError;

struct ItemTable {
    items: Vec<Item>,
    /// Next id to hand out; only ever grows.
    next_id: u64,
}

/// Process-local item store: an ordered list behind a `RwLock`.
///
/// Contents are lost on restart.
pub struct InMemoryItemStore {
    inner: RwLock<ItemTable>,
}

impl InMemoryItemStore {
    /// Store preloaded with the two seed records; the next id is 3.
    pub fn seeded() -> Arc<Self> {
        Self::from_items(seed_items())
    }

    pub fn empty() -> Arc<Self> {
        Self::from_items(Vec::new())
    }

    /// Start from existing records. Ids continue after the largest one present.
    pub fn from_items(items: Vec<Item>) -> Arc<Self> {
        let next_id = items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        Arc::new(Self { inner: RwLock::new(ItemTable { items, next_id }) })
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemStore {
    async fn list(&self) -> Result<Vec<Item>, ServiceError> {
        Ok(self.inner.read().await.items.clone())
    }

    async fn create(&self, input: NewItem) -> Result<Item, ServiceError> {
        let mut table = self.inner.write().await;
        let item = Item { id: table.next_id, name: input.name, description: input.description };
        table.next_id += 1;
        table.items.push(item.clone());
        debug!(id = item.id, "item stored");
        Ok(item)
    }

    async fn get(&self, id: u64) -> Result<Item, ServiceError> {
        let table = self.inner.read().await;
        table
            .items
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("item"))
    }

    async fn update(&self, id: u64, changes: ItemChanges) -> Result<Item, ServiceError> {
        let mut table = self.inner.write().await;
        let item = table
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| ServiceError::not_found("item"))?;
        changes.apply(item);
        Ok(item.clone())
    }

    async fn delete(&self, id: u64) -> Result<Item, ServiceError> {
        let mut table = self.inner.write().await;
        let pos = table
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| ServiceError::not_found("item"))?;
        Ok(table.items.remove(pos))
    }
}
