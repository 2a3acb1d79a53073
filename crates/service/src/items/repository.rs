use async_trait::async_trait;

use super::domain::{Item, ItemChanges, NewItem};
use crate::errors::ServiceError;

/// Storage abstraction for the item resource.
///
/// Lookups that match nothing return `ServiceError::NotFound`.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items in insertion order.
    async fn list(&self) -> Result<Vec<Item>, ServiceError>;
    async fn create(&self, input: NewItem) -> Result<Item, ServiceError>;
    async fn get(&self, id: u64) -> Result<Item, ServiceError>;
    async fn update(&self, id: u64, changes: ItemChanges) -> Result<Item, ServiceError>;
    /// Removes the item and hands it back.
    async fn delete(&self, id: u64) -> Result<Item, ServiceError>;
}
