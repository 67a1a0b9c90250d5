use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select,
};

use crate::{
    entity::{booking, comment},
    error::BookingResult,
    models::{
        Booking, BookingStateQuery, BookingStatus, Comment, NewBookingRecord, NewCommentRecord,
    },
    repository::{BookingRepository, CommentRepository},
};

pub struct PgBookingRepository {
    base: BaseRepository<booking::Entity>,
}

impl PgBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

/// SQL side of [`BookingStateQuery::matches`].
fn apply_state_filter(
    query: Select<booking::Entity>,
    state: BookingStateQuery,
    now: DateTime<Utc>,
) -> Select<booking::Entity> {
    match state {
        BookingStateQuery::All => query,
        BookingStateQuery::Current => query.filter(
            Condition::all()
                .add(booking::Column::Start.lte(now))
                .add(booking::Column::End.gt(now)),
        ),
        BookingStateQuery::Past => query.filter(booking::Column::End.lt(now)),
        BookingStateQuery::Future => query.filter(booking::Column::Start.gt(now)),
        BookingStateQuery::Waiting => {
            query.filter(booking::Column::Status.eq(BookingStatus::Waiting))
        }
        BookingStateQuery::Rejected => {
            query.filter(booking::Column::Status.eq(BookingStatus::Rejected))
        }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(&self, record: NewBookingRecord) -> BookingResult<Booking> {
        let active_model: booking::ActiveModel = record.into();
        let model = self.base.insert(active_model).await?;

        tracing::info!(booking_id = %model.id, item_id = %model.item_id, "Created booking");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> BookingResult<Option<Booking>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn decide_if_waiting(
        &self,
        id: i64,
        status: BookingStatus,
    ) -> BookingResult<Option<Booking>> {
        // Conditional update: the WHERE clause makes the one-shot guard hold
        // even when two approvals race on the same row.
        let result = booking::Entity::update_many()
            .set(booking::ActiveModel {
                status: Set(status),
                ..Default::default()
            })
            .filter(
                Condition::all()
                    .add(booking::Column::Id.eq(id))
                    .add(booking::Column::Status.eq(BookingStatus::Waiting)),
            )
            .exec(self.base.db())
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        tracing::info!(booking_id = %id, status = ?status, "Booking decided");
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn list_for_booker(
        &self,
        booker_id: i64,
        state: BookingStateQuery,
        now: DateTime<Utc>,
    ) -> BookingResult<Vec<Booking>> {
        let query = booking::Entity::find().filter(booking::Column::BookerId.eq(booker_id));

        let models = apply_state_filter(query, state, now)
            .order_by_desc(booking::Column::Start)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_for_items(
        &self,
        item_ids: Vec<i64>,
        state: BookingStateQuery,
        now: DateTime<Utc>,
    ) -> BookingResult<Vec<Booking>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = booking::Entity::find().filter(booking::Column::ItemId.is_in(item_ids));

        let models = apply_state_filter(query, state, now)
            .order_by_desc(booking::Column::Start)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_by_item(&self, item_id: i64) -> BookingResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::ItemId.eq(item_id))
            .order_by_desc(booking::Column::Start)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_approved_for_items(&self, item_ids: Vec<i64>) -> BookingResult<Vec<Booking>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = booking::Entity::find()
            .filter(booking::Column::ItemId.is_in(item_ids))
            .filter(booking::Column::Status.eq(BookingStatus::Approved))
            .order_by_desc(booking::Column::Start)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn has_completed_approved(
        &self,
        booker_id: i64,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> BookingResult<bool> {
        let count = booking::Entity::find()
            .filter(booking::Column::BookerId.eq(booker_id))
            .filter(booking::Column::ItemId.eq(item_id))
            .filter(booking::Column::Status.eq(BookingStatus::Approved))
            .filter(booking::Column::End.lt(now))
            .count(self.base.db())
            .await?;

        Ok(count > 0)
    }
}

pub struct PgCommentRepository {
    base: BaseRepository<comment::Entity>,
}

impl PgCommentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create(&self, record: NewCommentRecord) -> BookingResult<Comment> {
        let active_model: comment::ActiveModel = record.into();
        let model = self.base.insert(active_model).await?;

        tracing::info!(comment_id = %model.id, item_id = %model.item_id, "Created comment");
        Ok(model.into())
    }

    async fn list_by_item(&self, item_id: i64) -> BookingResult<Vec<Comment>> {
        let models = comment::Entity::find()
            .filter(comment::Column::ItemId.eq(item_id))
            .order_by_asc(comment::Column::Created)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_for_items(&self, item_ids: Vec<i64>) -> BookingResult<Vec<Comment>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = comment::Entity::find()
            .filter(comment::Column::ItemId.is_in(item_ids))
            .order_by_asc(comment::Column::Created)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
