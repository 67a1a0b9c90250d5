//! Generic repository base for sea-orm entities with BIGINT primary keys.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait,
};
use std::marker::PhantomData;

/// Shared persistence plumbing for the domain repositories.
///
/// Wraps a `DatabaseConnection` and the entity's basic CRUD so that the
/// per-domain repositories only spell out their custom queries.
pub struct BaseRepository<E: EntityTrait> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> BaseRepository<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// Access the underlying connection for custom queries.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn insert<A>(&self, model: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.insert(&self.db).await
    }

    pub async fn update<A>(&self, model: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.update(&self.db).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<E::Model>, DbErr>
    where
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i64>,
    {
        E::find_by_id(<E::PrimaryKey as PrimaryKeyTrait>::ValueType::from(id))
            .one(&self.db)
            .await
    }

    /// Returns the number of rows deleted (0 or 1).
    pub async fn delete_by_id(&self, id: i64) -> Result<u64, DbErr>
    where
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i64>,
    {
        E::delete_by_id(<E::PrimaryKey as PrimaryKeyTrait>::ValueType::from(id))
            .exec(&self.db)
            .await
            .map(|res| res.rows_affected)
    }
}
