use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Decision state of a booking. Persisted as the `booking_status` enum.
/// WAITING is the only state a transition can leave.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "booking_status")]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    #[sea_orm(string_value = "WAITING")]
    Waiting,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

/// Query-time filter over bookings. Not a persisted state: CURRENT, PAST and
/// FUTURE are time windows regardless of status, and APPROVED has no
/// selector of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString, strum::EnumIter)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum BookingStateQuery {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingStateQuery {
    /// Whether the booking falls under this filter at the given instant.
    /// The SQL finders apply the same predicate server-side.
    pub fn matches(&self, booking: &Booking, now: DateTime<Utc>) -> bool {
        match self {
            BookingStateQuery::All => true,
            BookingStateQuery::Current => booking.start <= now && now < booking.end,
            BookingStateQuery::Past => booking.end < now,
            BookingStateQuery::Future => booking.start > now,
            BookingStateQuery::Waiting => booking.status == BookingStatus::Waiting,
            BookingStateQuery::Rejected => booking.status == BookingStatus::Rejected,
        }
    }
}

/// Booking entity - one renter's claim on an item for a date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub item_id: i64,
    pub booker_id: i64,
    pub status: BookingStatus,
}

/// DTO for creating a booking. Date sanity (end after start, both in the
/// future) is enforced at the gateway boundary.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewBooking {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub item_id: i64,
}

/// Insertable booking row, status decided by the engine
#[derive(Debug, Clone)]
pub struct NewBookingRecord {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub item_id: i64,
    pub booker_id: i64,
    pub status: BookingStatus,
}

/// Comment entity - feedback left after a completed booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub item_id: i64,
    pub author_id: i64,
    pub created: DateTime<Utc>,
}

/// DTO for creating a comment
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateComment {
    #[validate(length(min = 1))]
    pub text: String,
}

/// Insertable comment row
#[derive(Debug, Clone)]
pub struct NewCommentRecord {
    pub text: String,
    pub item_id: i64,
    pub author_id: i64,
    pub created: DateTime<Utc>,
}

/// Item snapshot embedded in booking responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemRef {
    pub id: i64,
    pub name: String,
}

/// Booker snapshot embedded in booking responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserRef {
    pub id: i64,
    pub name: String,
}

/// DTO for booking responses, item and booker resolved by name
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub item: ItemRef,
    pub booker: UserRef,
}

/// Short booking marker used for the owner's last/next projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BookingBrief {
    pub id: i64,
    pub booker_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<&Booking> for BookingBrief {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            booker_id: booking.booker_id,
            start: booking.start,
            end: booking.end,
        }
    }
}

/// DTO for comment responses, author resolved by name
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

/// Item view with the booking projection attached. Owners get the derived
/// last/next markers, everyone else gets the raw booking history.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_booking: Option<BookingBrief>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_booking: Option<BookingBrief>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookings: Option<Vec<Booking>>,
    pub comments: Vec<CommentResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn booking(id: i64, start: DateTime<Utc>, end: DateTime<Utc>, status: BookingStatus) -> Booking {
        Booking {
            id,
            start,
            end,
            item_id: 1,
            booker_id: 2,
            status,
        }
    }

    #[test]
    fn state_query_parses_case_insensitively() {
        assert_eq!(
            BookingStateQuery::from_str("current").unwrap(),
            BookingStateQuery::Current
        );
        assert_eq!(
            BookingStateQuery::from_str("WAITING").unwrap(),
            BookingStateQuery::Waiting
        );
        assert_eq!(
            BookingStateQuery::from_str("Past").unwrap(),
            BookingStateQuery::Past
        );
    }

    #[test]
    fn state_query_rejects_unknown_values() {
        assert!(BookingStateQuery::from_str("INVALID").is_err());
        assert!(BookingStateQuery::from_str("APPROVED").is_err());
        assert!(BookingStateQuery::from_str("").is_err());
    }

    #[test]
    fn all_filter_is_union_of_the_others_at_fixed_now() {
        let now = Utc::now();
        let day = Duration::days(1);

        let bookings = vec![
            // past, approved
            booking(1, now - day * 3, now - day, BookingStatus::Approved),
            // current, approved
            booking(2, now - day, now + day, BookingStatus::Approved),
            // future, waiting
            booking(3, now + day, now + day * 2, BookingStatus::Waiting),
            // future, rejected
            booking(4, now + day * 2, now + day * 3, BookingStatus::Rejected),
        ];

        let all: Vec<i64> = bookings
            .iter()
            .filter(|b| BookingStateQuery::All.matches(b, now))
            .map(|b| b.id)
            .collect();

        let mut union: Vec<i64> = bookings
            .iter()
            .filter(|b| {
                BookingStateQuery::iter()
                    .filter(|f| *f != BookingStateQuery::All)
                    .any(|f| f.matches(b, now))
            })
            .map(|b| b.id)
            .collect();
        union.dedup();

        assert_eq!(all, vec![1, 2, 3, 4]);
        assert_eq!(all, union);
    }

    #[test]
    fn current_window_is_inclusive_of_start_and_exclusive_of_end() {
        let now = Utc::now();
        let starting_now = booking(1, now, now + Duration::hours(1), BookingStatus::Waiting);
        let ending_now = booking(2, now - Duration::hours(1), now, BookingStatus::Waiting);

        assert!(BookingStateQuery::Current.matches(&starting_now, now));
        assert!(!BookingStateQuery::Current.matches(&ending_now, now));
        // a booking ending exactly now is not yet past either
        assert!(!BookingStateQuery::Past.matches(&ending_now, now));
    }
}
