use async_trait::async_trait;

use crate::error::RequestResult;
use crate::models::{ItemRequest, NewRequestRecord};

/// Data access contract for item requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestRepository: Send + Sync {
    async fn create(&self, record: NewRequestRecord) -> RequestResult<ItemRequest>;

    async fn get_by_id(&self, id: i64) -> RequestResult<Option<ItemRequest>>;

    /// The requestor's own requests, newest first.
    async fn list_by_requestor(&self, requestor_id: i64) -> RequestResult<Vec<ItemRequest>>;

    /// Other users' requests, newest first, paginated.
    async fn list_by_others(
        &self,
        requestor_id: i64,
        from: u64,
        size: u64,
    ) -> RequestResult<Vec<ItemRequest>>;
}
