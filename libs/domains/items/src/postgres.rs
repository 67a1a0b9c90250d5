use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    entity,
    error::ItemResult,
    models::{CreateItem, Item},
    repository::ItemRepository,
};

pub struct PgItemRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn create(&self, owner_id: i64, input: CreateItem) -> ItemResult<Item> {
        let active_model = input.into_active_model(owner_id);
        let model = self.base.insert(active_model).await?;

        tracing::info!(item_id = %model.id, owner_id = %owner_id, "Created item");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn get_many(&self, ids: Vec<i64>) -> ItemResult<Vec<Item>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = entity::Entity::find()
            .filter(entity::Column::Id.is_in(ids))
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, item: Item) -> ItemResult<Item> {
        let active_model: entity::ActiveModel = item.into();
        let model = self.base.update(active_model).await?;

        tracing::info!(item_id = %model.id, "Updated item");
        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> ItemResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await?;

        if rows_affected > 0 {
            tracing::info!(item_id = %id, "Deleted item");
        }
        Ok(rows_affected > 0)
    }

    async fn list_by_owner(&self, owner_id: i64) -> ItemResult<Vec<Item>> {
        let models = entity::Entity::find()
            .filter(entity::Column::OwnerId.eq(owner_id))
            .order_by_asc(entity::Column::Id)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count_by_owner(&self, owner_id: i64) -> ItemResult<u64> {
        let count = entity::Entity::find()
            .filter(entity::Column::OwnerId.eq(owner_id))
            .count(self.base.db())
            .await?;

        Ok(count)
    }

    async fn search(&self, text: &str) -> ItemResult<Vec<Item>> {
        let pattern = format!("%{}%", text);

        let models = entity::Entity::find()
            .filter(entity::Column::Available.eq(true))
            .filter(
                Condition::any()
                    .add(Expr::col(entity::Column::Name).ilike(pattern.clone()))
                    .add(Expr::col(entity::Column::Description).ilike(pattern)),
            )
            .order_by_asc(entity::Column::Id)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_by_request(&self, request_id: i64) -> ItemResult<Vec<Item>> {
        let models = entity::Entity::find()
            .filter(entity::Column::RequestId.eq(request_id))
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_by_request_ids(&self, request_ids: Vec<i64>) -> ItemResult<Vec<Item>> {
        if request_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = entity::Entity::find()
            .filter(entity::Column::RequestId.is_in(request_ids))
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
