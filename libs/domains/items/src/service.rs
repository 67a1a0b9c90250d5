use std::sync::Arc;

use domain_users::{UserError, UserRepository};

use crate::{
    error::{ItemError, ItemResult},
    models::{CreateItem, Item, UpdateItem},
    repository::ItemRepository,
};

/// Business logic for the item catalog. Ownership checks live here; the
/// availability projection over bookings lives in the booking core.
pub struct ItemService<I: ItemRepository, U: UserRepository> {
    items: Arc<I>,
    users: Arc<U>,
}

impl<I: ItemRepository, U: UserRepository> Clone for ItemService<I, U> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            users: Arc::clone(&self.users),
        }
    }
}

impl<I: ItemRepository, U: UserRepository> ItemService<I, U> {
    pub fn new(items: Arc<I>, users: Arc<U>) -> Self {
        Self { items, users }
    }

    pub async fn create_item(&self, owner_id: i64, input: CreateItem) -> ItemResult<Item> {
        if !self.users.exists(owner_id).await.map_err(UserError::from)? {
            return Err(UserError::NotFound(owner_id).into());
        }

        self.items.create(owner_id, input).await
    }

    pub async fn get_item(&self, id: i64) -> ItemResult<Item> {
        self.items
            .get_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    /// Only the owner may change an item.
    pub async fn update_item(
        &self,
        caller_id: i64,
        item_id: i64,
        patch: UpdateItem,
    ) -> ItemResult<Item> {
        let mut item = self.get_item(item_id).await?;

        if item.owner_id != caller_id {
            return Err(ItemError::Forbidden);
        }

        item.apply_update(patch);
        self.items.update(item).await
    }

    pub async fn delete_item(&self, id: i64) -> ItemResult<()> {
        if !self.items.delete(id).await? {
            return Err(ItemError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockItemRepository;
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

    fn sample_item() -> Item {
        Item {
            id: 1,
            name: "Drill".to_string(),
            description: "Cordless drill".to_string(),
            available: true,
            owner_id: 10,
            request_id: None,
        }
    }

    #[tokio::test]
    async fn create_item_requires_existing_owner() {
        let items = MockItemRepository::new();
        let mut users = MockUsers::new();
        users.expect_exists().with(eq(99)).returning(|_| Ok(false));

        let service = ItemService::new(Arc::new(items), Arc::new(users));
        let result = service
            .create_item(
                99,
                CreateItem {
                    name: "Drill".to_string(),
                    description: "Cordless drill".to_string(),
                    available: true,
                    request_id: None,
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(ItemError::User(UserError::NotFound(99)))
        ));
    }

    #[tokio::test]
    async fn create_item_persists_for_existing_owner() {
        let mut items = MockItemRepository::new();
        items.expect_create().returning(|owner_id, input| {
            Ok(Item {
                id: 1,
                name: input.name,
                description: input.description,
                available: input.available,
                owner_id,
                request_id: input.request_id,
            })
        });
        let mut users = MockUsers::new();
        users.expect_exists().with(eq(10)).returning(|_| Ok(true));

        let service = ItemService::new(Arc::new(items), Arc::new(users));
        let item = service
            .create_item(
                10,
                CreateItem {
                    name: "Drill".to_string(),
                    description: "Cordless drill".to_string(),
                    available: true,
                    request_id: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(item.owner_id, 10);
        assert!(item.available);
    }

    #[tokio::test]
    async fn update_item_rejects_non_owner() {
        let mut items = MockItemRepository::new();
        items
            .expect_get_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(sample_item())));
        let users = MockUsers::new();

        let service = ItemService::new(Arc::new(items), Arc::new(users));
        let result = service
            .update_item(
                11,
                1,
                UpdateItem {
                    available: Some(false),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(ItemError::Forbidden)));
    }

    #[tokio::test]
    async fn update_item_applies_partial_patch_for_owner() {
        let mut items = MockItemRepository::new();
        items
            .expect_get_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(sample_item())));
        items.expect_update().returning(Ok);
        let users = MockUsers::new();

        let service = ItemService::new(Arc::new(items), Arc::new(users));
        let item = service
            .update_item(
                10,
                1,
                UpdateItem {
                    available: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(!item.available);
        assert_eq!(item.name, "Drill");
    }

    #[tokio::test]
    async fn delete_item_returns_not_found_when_absent() {
        let mut items = MockItemRepository::new();
        items.expect_delete().with(eq(5)).returning(|_| Ok(false));
        let users = MockUsers::new();

        let service = ItemService::new(Arc::new(items), Arc::new(users));
        let result = service.delete_item(5).await;

        assert!(matches!(result, Err(ItemError::NotFound(5))));
    }
}
