use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use crate::{
    entity,
    error::UserResult,
    models::{CreateUser, User},
    repository::UserRepository,
};

pub struct PgUserRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let active_model: entity::ActiveModel = input.into();
        let model = self.base.insert(active_model).await?;

        tracing::info!(user_id = %model.id, "Created user");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn get_many(&self, ids: Vec<i64>) -> UserResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = entity::Entity::find()
            .filter(entity::Column::Id.is_in(ids))
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let active_model: entity::ActiveModel = user.into();
        let model = self.base.update(active_model).await?;

        tracing::info!(user_id = %model.id, "Updated user");
        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await?;

        if rows_affected > 0 {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(rows_affected > 0)
    }

    async fn exists(&self, id: i64) -> UserResult<bool> {
        let count = entity::Entity::find()
            .filter(entity::Column::Id.eq(id))
            .count(self.base.db())
            .await?;

        Ok(count > 0)
    }

    async fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> UserResult<bool> {
        let mut query = entity::Entity::find().filter(entity::Column::Email.eq(email));

        if let Some(id) = exclude_id {
            query = query.filter(entity::Column::Id.ne(id));
        }

        let count = query.count(self.base.db()).await?;
        Ok(count > 0)
    }
}
