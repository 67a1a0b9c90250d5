use async_trait::async_trait;

use crate::error::ItemResult;
use crate::models::{CreateItem, Item};

/// Data access contract for items. The booking core and the request board
/// consume this trait rather than the tables directly.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn create(&self, owner_id: i64, input: CreateItem) -> ItemResult<Item>;

    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>>;

    async fn get_many(&self, ids: Vec<i64>) -> ItemResult<Vec<Item>>;

    async fn update(&self, item: Item) -> ItemResult<Item>;

    /// Returns false when nothing was deleted.
    async fn delete(&self, id: i64) -> ItemResult<bool>;

    /// All items of one owner, ordered by id.
    async fn list_by_owner(&self, owner_id: i64) -> ItemResult<Vec<Item>>;

    async fn count_by_owner(&self, owner_id: i64) -> ItemResult<u64>;

    /// Case-insensitive substring match over name and description,
    /// available items only.
    async fn search(&self, text: &str) -> ItemResult<Vec<Item>>;

    async fn list_by_request(&self, request_id: i64) -> ItemResult<Vec<Item>>;

    async fn list_by_request_ids(&self, request_ids: Vec<i64>) -> ItemResult<Vec<Item>>;
}
