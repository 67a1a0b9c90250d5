use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use domain_items::{Item, ItemRepository};
use domain_users::{UserError, UserRepository};

use crate::{
    error::{RequestError, RequestResult},
    models::{CreateRequest, ItemRequest, NewRequestRecord, RequestResponse},
    repository::RequestRepository,
};

/// Business logic for the request board. Listings attach the items that were
/// created in answer to each request.
pub struct RequestService<R, I, U>
where
    R: RequestRepository,
    I: ItemRepository,
    U: UserRepository,
{
    requests: Arc<R>,
    items: Arc<I>,
    users: Arc<U>,
}

impl<R, I, U> Clone for RequestService<R, I, U>
where
    R: RequestRepository,
    I: ItemRepository,
    U: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            requests: Arc::clone(&self.requests),
            items: Arc::clone(&self.items),
            users: Arc::clone(&self.users),
        }
    }
}

impl<R, I, U> RequestService<R, I, U>
where
    R: RequestRepository,
    I: ItemRepository,
    U: UserRepository,
{
    pub fn new(requests: Arc<R>, items: Arc<I>, users: Arc<U>) -> Self {
        Self {
            requests,
            items,
            users,
        }
    }

    pub async fn create_request(
        &self,
        user_id: i64,
        input: CreateRequest,
    ) -> RequestResult<RequestResponse> {
        self.require_user(user_id).await?;

        let request = self
            .requests
            .create(NewRequestRecord {
                description: input.description,
                requestor_id: user_id,
                created: Utc::now(),
            })
            .await?;

        Ok(RequestResponse::new(request, Vec::new()))
    }

    /// The caller's own requests, newest first, items attached in batch.
    pub async fn get_user_requests(&self, user_id: i64) -> RequestResult<Vec<RequestResponse>> {
        self.require_user(user_id).await?;

        let requests = self.requests.list_by_requestor(user_id).await?;
        self.attach_items(requests).await
    }

    /// Other users' requests, newest first, paginated.
    pub async fn get_all_requests(
        &self,
        user_id: i64,
        from: u64,
        size: u64,
    ) -> RequestResult<Vec<RequestResponse>> {
        self.require_user(user_id).await?;

        let requests = self.requests.list_by_others(user_id, from, size).await?;
        self.attach_items(requests).await
    }

    pub async fn get_request(
        &self,
        user_id: i64,
        request_id: i64,
    ) -> RequestResult<RequestResponse> {
        self.require_user(user_id).await?;

        let request = self
            .requests
            .get_by_id(request_id)
            .await?
            .ok_or(RequestError::NotFound(request_id))?;
        let items = self
            .items
            .list_by_request(request_id)
            .await
            .map_err(RequestError::from)?;

        Ok(RequestResponse::new(request, items))
    }

    async fn require_user(&self, id: i64) -> RequestResult<()> {
        if !self.users.exists(id).await.map_err(UserError::from)? {
            return Err(UserError::NotFound(id).into());
        }
        Ok(())
    }

    async fn attach_items(
        &self,
        requests: Vec<ItemRequest>,
    ) -> RequestResult<Vec<RequestResponse>> {
        let request_ids: Vec<i64> = requests.iter().map(|r| r.id).collect();

        let mut items_by_request: HashMap<i64, Vec<Item>> = HashMap::new();
        for item in self
            .items
            .list_by_request_ids(request_ids)
            .await
            .map_err(RequestError::from)?
        {
            if let Some(request_id) = item.request_id {
                items_by_request.entry(request_id).or_default().push(item);
            }
        }

        Ok(requests
            .into_iter()
            .map(|request| {
                let items = items_by_request.remove(&request.id).unwrap_or_default();
                RequestResponse::new(request, items)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockRequestRepository;
    use chrono::Duration;
    use mockall::predicate::eq;

    mockall::mock! {
        Users {}

        #[async_trait::async_trait]
        impl UserRepository for Users {
            async fn create(
                &self,
                input: domain_users::CreateUser,
            ) -> domain_users::UserResult<domain_users::User>;
            async fn get_by_id(&self, id: i64) -> domain_users::UserResult<Option<domain_users::User>>;
            async fn get_many(&self, ids: Vec<i64>) -> domain_users::UserResult<Vec<domain_users::User>>;
            async fn list(&self) -> domain_users::UserResult<Vec<domain_users::User>>;
            async fn update(&self, user: domain_users::User) -> domain_users::UserResult<domain_users::User>;
            async fn delete(&self, id: i64) -> domain_users::UserResult<bool>;
            async fn exists(&self, id: i64) -> domain_users::UserResult<bool>;
            async fn email_taken(
                &self,
                email: &str,
                exclude_id: Option<i64>,
            ) -> domain_users::UserResult<bool>;
        }
    }

    mockall::mock! {
        Items {}

        #[async_trait::async_trait]
        impl ItemRepository for Items {
            async fn create(
                &self,
                owner_id: i64,
                input: domain_items::CreateItem,
            ) -> domain_items::ItemResult<Item>;
            async fn get_by_id(&self, id: i64) -> domain_items::ItemResult<Option<Item>>;
            async fn get_many(&self, ids: Vec<i64>) -> domain_items::ItemResult<Vec<Item>>;
            async fn update(&self, item: Item) -> domain_items::ItemResult<Item>;
            async fn delete(&self, id: i64) -> domain_items::ItemResult<bool>;
            async fn list_by_owner(&self, owner_id: i64) -> domain_items::ItemResult<Vec<Item>>;
            async fn count_by_owner(&self, owner_id: i64) -> domain_items::ItemResult<u64>;
            async fn search(&self, text: &str) -> domain_items::ItemResult<Vec<Item>>;
            async fn list_by_request(&self, request_id: i64) -> domain_items::ItemResult<Vec<Item>>;
            async fn list_by_request_ids(
                &self,
                request_ids: Vec<i64>,
            ) -> domain_items::ItemResult<Vec<Item>>;
        }
    }

    fn request(id: i64, requestor_id: i64) -> ItemRequest {
        ItemRequest {
            id,
            description: "Need a ladder".to_string(),
            requestor_id,
            created: Utc::now() - Duration::hours(id as i64),
        }
    }

    fn answering_item(id: i64, request_id: i64) -> Item {
        Item {
            id,
            name: "Ladder".to_string(),
            description: "Sturdy ladder".to_string(),
            available: true,
            owner_id: 10,
            request_id: Some(request_id),
        }
    }

    #[tokio::test]
    async fn create_request_requires_existing_user() {
        let requests = MockRequestRepository::new();
        let items = MockItems::new();
        let mut users = MockUsers::new();
        users.expect_exists().with(eq(99)).returning(|_| Ok(false));

        let service = RequestService::new(Arc::new(requests), Arc::new(items), Arc::new(users));
        let result = service
            .create_request(
                99,
                CreateRequest {
                    description: "Need a ladder".to_string(),
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(RequestError::User(UserError::NotFound(99)))
        ));
    }

    #[tokio::test]
    async fn create_request_starts_with_no_items() {
        let mut requests = MockRequestRepository::new();
        requests.expect_create().returning(|record| {
            Ok(ItemRequest {
                id: 1,
                description: record.description,
                requestor_id: record.requestor_id,
                created: record.created,
            })
        });
        let items = MockItems::new();
        let mut users = MockUsers::new();
        users.expect_exists().returning(|_| Ok(true));

        let service = RequestService::new(Arc::new(requests), Arc::new(items), Arc::new(users));
        let response = service
            .create_request(
                20,
                CreateRequest {
                    description: "Need a ladder".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(response.description, "Need a ladder");
        assert!(response.items.is_empty());
    }

    #[tokio::test]
    async fn own_requests_attach_answering_items() {
        let mut requests = MockRequestRepository::new();
        requests
            .expect_list_by_requestor()
            .with(eq(20))
            .returning(|id| Ok(vec![request(1, id), request(2, id)]));
        let mut items = MockItems::new();
        items
            .expect_list_by_request_ids()
            .with(eq(vec![1, 2]))
            .returning(|_| Ok(vec![answering_item(5, 1)]));
        let mut users = MockUsers::new();
        users.expect_exists().returning(|_| Ok(true));

        let service = RequestService::new(Arc::new(requests), Arc::new(items), Arc::new(users));
        let responses = service.get_user_requests(20).await.unwrap();

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].items.len(), 1);
        assert_eq!(responses[0].items[0].name, "Ladder");
        assert!(responses[1].items.is_empty());
    }

    #[tokio::test]
    async fn all_requests_pass_pagination_through() {
        let mut requests = MockRequestRepository::new();
        requests
            .expect_list_by_others()
            .with(eq(20), eq(5), eq(2))
            .returning(|_, _, _| Ok(vec![request(3, 30)]));
        let mut items = MockItems::new();
        items
            .expect_list_by_request_ids()
            .returning(|_| Ok(Vec::new()));
        let mut users = MockUsers::new();
        users.expect_exists().returning(|_| Ok(true));

        let service = RequestService::new(Arc::new(requests), Arc::new(items), Arc::new(users));
        let responses = service.get_all_requests(20, 5, 2).await.unwrap();

        assert_eq!(responses.len(), 1);
    }

    #[tokio::test]
    async fn missing_request_is_not_found() {
        let mut requests = MockRequestRepository::new();
        requests.expect_get_by_id().returning(|_| Ok(None));
        let items = MockItems::new();
        let mut users = MockUsers::new();
        users.expect_exists().returning(|_| Ok(true));

        let service = RequestService::new(Arc::new(requests), Arc::new(items), Arc::new(users));
        let result = service.get_request(20, 404).await;

        assert!(matches!(result, Err(RequestError::NotFound(404))));
    }
}
