use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::BookingResult;
use crate::models::{
    Booking, BookingStateQuery, BookingStatus, Comment, NewBookingRecord, NewCommentRecord,
};

/// Data access contract for bookings. Filtered finders apply the
/// [`BookingStateQuery`] predicate server-side against the supplied instant
/// and return rows ordered by start descending.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, record: NewBookingRecord) -> BookingResult<Booking>;

    async fn get_by_id(&self, id: i64) -> BookingResult<Option<Booking>>;

    /// Persists only the status column, and only while the row is still
    /// WAITING. Returns `None` when the booking was already decided, so
    /// concurrent approvals resolve to exactly one winner.
    async fn decide_if_waiting(
        &self,
        id: i64,
        status: BookingStatus,
    ) -> BookingResult<Option<Booking>>;

    async fn list_for_booker(
        &self,
        booker_id: i64,
        state: BookingStateQuery,
        now: DateTime<Utc>,
    ) -> BookingResult<Vec<Booking>>;

    async fn list_for_items(
        &self,
        item_ids: Vec<i64>,
        state: BookingStateQuery,
        now: DateTime<Utc>,
    ) -> BookingResult<Vec<Booking>>;

    /// Every booking on one item, any status.
    async fn list_by_item(&self, item_id: i64) -> BookingResult<Vec<Booking>>;

    /// APPROVED bookings across many items, for the batched projection.
    async fn list_approved_for_items(&self, item_ids: Vec<i64>) -> BookingResult<Vec<Booking>>;

    /// Whether the booker holds an APPROVED booking on the item that ended
    /// before the given instant.
    async fn has_completed_approved(
        &self,
        booker_id: i64,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> BookingResult<bool>;
}

/// Data access contract for comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, record: NewCommentRecord) -> BookingResult<Comment>;

    async fn list_by_item(&self, item_id: i64) -> BookingResult<Vec<Comment>>;

    async fn list_for_items(&self, item_ids: Vec<i64>) -> BookingResult<Vec<Comment>>;
}
