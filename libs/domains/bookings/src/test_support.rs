//! Hand-rolled mocks for the collaborator traits owned by other crates.
//! `automock` generates mocks only inside the defining crate, so the user
//! and item contracts are mocked here manually.

use domain_items::{CreateItem, Item, ItemResult};
use domain_users::{CreateUser, User, UserResult};

mockall::mock! {
    pub Users {}

    #[async_trait::async_trait]
    impl domain_users::UserRepository for Users {
        async fn create(&self, input: CreateUser) -> UserResult<User>;
        async fn get_by_id(&self, id: i64) -> UserResult<Option<User>>;
        async fn get_many(&self, ids: Vec<i64>) -> UserResult<Vec<User>>;
        async fn list(&self) -> UserResult<Vec<User>>;
        async fn update(&self, user: User) -> UserResult<User>;
        async fn delete(&self, id: i64) -> UserResult<bool>;
        async fn exists(&self, id: i64) -> UserResult<bool>;
        async fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> UserResult<bool>;
    }
}

mockall::mock! {
    pub Items {}

    #[async_trait::async_trait]
    impl domain_items::ItemRepository for Items {
        async fn create(&self, owner_id: i64, input: CreateItem) -> ItemResult<Item>;
        async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>>;
        async fn get_many(&self, ids: Vec<i64>) -> ItemResult<Vec<Item>>;
        async fn update(&self, item: Item) -> ItemResult<Item>;
        async fn delete(&self, id: i64) -> ItemResult<bool>;
        async fn list_by_owner(&self, owner_id: i64) -> ItemResult<Vec<Item>>;
        async fn count_by_owner(&self, owner_id: i64) -> ItemResult<u64>;
        async fn search(&self, text: &str) -> ItemResult<Vec<Item>>;
        async fn list_by_request(&self, request_id: i64) -> ItemResult<Vec<Item>>;
        async fn list_by_request_ids(&self, request_ids: Vec<i64>) -> ItemResult<Vec<Item>>;
    }
}

pub fn user(id: i64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
    }
}

pub fn item(id: i64, owner_id: i64, name: &str, available: bool) -> Item {
    Item {
        id,
        name: name.to_string(),
        description: format!("{} description", name),
        available,
        owner_id,
        request_id: None,
    }
}
