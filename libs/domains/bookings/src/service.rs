use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use domain_items::{Item, ItemError, ItemRepository};
use domain_users::{User, UserError, UserRepository};

use crate::{
    error::{BookingError, BookingResult},
    models::{
        Booking, BookingResponse, BookingStateQuery, BookingStatus, ItemRef, NewBooking,
        NewBookingRecord, UserRef,
    },
    repository::BookingRepository,
};

/// The booking engine: creation rules, the one-shot approval state machine,
/// and state-filtered retrieval for renter and owner perspectives.
pub struct BookingService<B, I, U>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    bookings: Arc<B>,
    items: Arc<I>,
    users: Arc<U>,
}

impl<B, I, U> Clone for BookingService<B, I, U>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            bookings: Arc::clone(&self.bookings),
            items: Arc::clone(&self.items),
            users: Arc::clone(&self.users),
        }
    }
}

impl<B, I, U> BookingService<B, I, U>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    pub fn new(bookings: Arc<B>, items: Arc<I>, users: Arc<U>) -> Self {
        Self {
            bookings,
            items,
            users,
        }
    }

    /// Creates a WAITING booking. Date sanity is enforced at the gateway;
    /// ownership and availability are enforced here.
    pub async fn create_booking(
        &self,
        booker_id: i64,
        input: NewBooking,
    ) -> BookingResult<BookingResponse> {
        let booker = self.require_user(booker_id).await?;
        let item = self.require_item(input.item_id).await?;

        if item.owner_id == booker_id {
            return Err(BookingError::Validation(
                "Owner cannot book own item".to_string(),
            ));
        }
        if !item.available {
            return Err(BookingError::Validation("Item is not available".to_string()));
        }

        let booking = self
            .bookings
            .create(NewBookingRecord {
                start: input.start,
                end: input.end,
                item_id: input.item_id,
                booker_id,
                status: BookingStatus::Waiting,
            })
            .await?;

        Ok(to_response(booking, &item, &booker))
    }

    /// Decides a WAITING booking. Repeated calls fail, they are not
    /// silently ignored.
    pub async fn approve_booking(
        &self,
        booking_id: i64,
        caller_id: i64,
        approved: bool,
    ) -> BookingResult<BookingResponse> {
        let booking = self.require_booking(booking_id).await?;
        let item = self.require_item(booking.item_id).await?;

        if item.owner_id != caller_id {
            return Err(BookingError::Validation(
                "Only owner can approve booking".to_string(),
            ));
        }
        if booking.status != BookingStatus::Waiting {
            return Err(BookingError::Validation(
                "Booking is not waiting".to_string(),
            ));
        }

        let status = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };
        // The conditional update can still lose to a concurrent approval
        // that landed after the read above.
        let booking = self
            .bookings
            .decide_if_waiting(booking_id, status)
            .await?
            .ok_or_else(|| BookingError::Validation("Booking is not waiting".to_string()))?;
        let booker = self.require_user(booking.booker_id).await?;

        Ok(to_response(booking, &item, &booker))
    }

    /// Visible to the booker and the item owner only.
    pub async fn get_booking(
        &self,
        booking_id: i64,
        caller_id: i64,
    ) -> BookingResult<BookingResponse> {
        let booking = self.require_booking(booking_id).await?;
        let item = self.require_item(booking.item_id).await?;

        if caller_id != booking.booker_id && caller_id != item.owner_id {
            return Err(BookingError::Validation(
                "Only owner and booker can get booking".to_string(),
            ));
        }

        let booker = self.require_user(booking.booker_id).await?;
        Ok(to_response(booking, &item, &booker))
    }

    /// Bookings made by the caller, newest start first. The pagination
    /// parameters are accepted for API compatibility but not applied.
    pub async fn get_user_bookings(
        &self,
        booker_id: i64,
        state: &str,
        _from: u64,
        _size: u64,
    ) -> BookingResult<Vec<BookingResponse>> {
        let state = parse_state(state)?;
        self.require_user(booker_id).await?;

        let bookings = self
            .bookings
            .list_for_booker(booker_id, state, Utc::now())
            .await?;

        self.to_responses(bookings).await
    }

    /// Bookings on the caller's items, newest start first. Owners with no
    /// items get a validation error rather than an empty list.
    pub async fn get_owner_bookings(
        &self,
        owner_id: i64,
        state: &str,
        _from: u64,
        _size: u64,
    ) -> BookingResult<Vec<BookingResponse>> {
        let state = parse_state(state)?;
        self.require_user(owner_id).await?;

        if self
            .items
            .count_by_owner(owner_id)
            .await
            .map_err(BookingError::from)?
            == 0
        {
            return Err(BookingError::Validation(format!(
                "User with id {} doesn't own any items",
                owner_id
            )));
        }

        let item_ids = self
            .items
            .list_by_owner(owner_id)
            .await
            .map_err(BookingError::from)?
            .into_iter()
            .map(|item| item.id)
            .collect();

        let bookings = self
            .bookings
            .list_for_items(item_ids, state, Utc::now())
            .await?;

        self.to_responses(bookings).await
    }

    async fn require_user(&self, id: i64) -> BookingResult<User> {
        self.users
            .get_by_id(id)
            .await
            .map_err(BookingError::from)?
            .ok_or_else(|| UserError::NotFound(id).into())
    }

    async fn require_item(&self, id: i64) -> BookingResult<Item> {
        self.items
            .get_by_id(id)
            .await
            .map_err(BookingError::from)?
            .ok_or_else(|| ItemError::NotFound(id).into())
    }

    async fn require_booking(&self, id: i64) -> BookingResult<Booking> {
        self.bookings
            .get_by_id(id)
            .await?
            .ok_or(BookingError::NotFound(id))
    }

    /// Resolves item and booker names with one batched lookup each.
    async fn to_responses(&self, bookings: Vec<Booking>) -> BookingResult<Vec<BookingResponse>> {
        let mut item_ids: Vec<i64> = bookings.iter().map(|b| b.item_id).collect();
        item_ids.sort_unstable();
        item_ids.dedup();
        let mut booker_ids: Vec<i64> = bookings.iter().map(|b| b.booker_id).collect();
        booker_ids.sort_unstable();
        booker_ids.dedup();

        let items: HashMap<i64, Item> = self
            .items
            .get_many(item_ids)
            .await
            .map_err(BookingError::from)?
            .into_iter()
            .map(|item| (item.id, item))
            .collect();
        let users: HashMap<i64, User> = self
            .users
            .get_many(booker_ids)
            .await
            .map_err(BookingError::from)?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        bookings
            .into_iter()
            .map(|booking| {
                let item = items
                    .get(&booking.item_id)
                    .ok_or_else(|| BookingError::from(ItemError::NotFound(booking.item_id)))?;
                let booker = users
                    .get(&booking.booker_id)
                    .ok_or_else(|| BookingError::from(UserError::NotFound(booking.booker_id)))?;
                Ok(to_response(booking, item, booker))
            })
            .collect()
    }
}

fn parse_state(state: &str) -> BookingResult<BookingStateQuery> {
    BookingStateQuery::from_str(state)
        .map_err(|_| BookingError::Validation("Unknown state".to_string()))
}

fn to_response(booking: Booking, item: &Item, booker: &User) -> BookingResponse {
    BookingResponse {
        id: booking.id,
        start: booking.start,
        end: booking.end,
        status: booking.status,
        item: ItemRef {
            id: item.id,
            name: item.name.clone(),
        },
        booker: UserRef {
            id: booker.id,
            name: booker.name.clone(),
        },
    }
}
