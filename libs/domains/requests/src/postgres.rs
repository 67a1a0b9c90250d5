use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    entity,
    error::RequestResult,
    models::{ItemRequest, NewRequestRecord},
    repository::RequestRepository,
};

pub struct PgRequestRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl RequestRepository for PgRequestRepository {
    async fn create(&self, record: NewRequestRecord) -> RequestResult<ItemRequest> {
        let active_model: entity::ActiveModel = record.into();
        let model = self.base.insert(active_model).await?;

        tracing::info!(request_id = %model.id, "Created item request");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> RequestResult<Option<ItemRequest>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn list_by_requestor(&self, requestor_id: i64) -> RequestResult<Vec<ItemRequest>> {
        let models = entity::Entity::find()
            .filter(entity::Column::RequestorId.eq(requestor_id))
            .order_by_desc(entity::Column::Created)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_by_others(
        &self,
        requestor_id: i64,
        from: u64,
        size: u64,
    ) -> RequestResult<Vec<ItemRequest>> {
        let models = entity::Entity::find()
            .filter(entity::Column::RequestorId.ne(requestor_id))
            .order_by_desc(entity::Column::Created)
            .offset(from)
            .limit(size)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
