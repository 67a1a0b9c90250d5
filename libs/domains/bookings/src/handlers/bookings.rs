use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{SharerId, ValidatedJson};
use domain_items::ItemRepository;
use domain_users::UserRepository;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::BookingResult;
use crate::models::{BookingResponse, NewBooking};
use crate::repository::BookingRepository;
use crate::service::BookingService;

/// Create the bookings router with all HTTP endpoints
pub fn router<B, I, U>(service: BookingService<B, I, U>) -> Router
where
    B: BookingRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(get_user_bookings).post(create_booking))
        .route("/owner", get(get_owner_bookings))
        .route("/{id}", get(get_booking).patch(approve_booking))
        .with_state(shared_service)
}

#[derive(Debug, Deserialize)]
struct ApproveQuery {
    approved: bool,
}

#[derive(Debug, Deserialize)]
struct StateQuery {
    state: Option<String>,
    from: Option<u64>,
    size: Option<u64>,
}

impl StateQuery {
    fn state(&self) -> &str {
        self.state.as_deref().unwrap_or("ALL")
    }
}

/// Create a booking request for an item
///
/// POST /bookings
async fn create_booking<B, I, U>(
    State(service): State<Arc<BookingService<B, I, U>>>,
    SharerId(booker_id): SharerId,
    ValidatedJson(input): ValidatedJson<NewBooking>,
) -> BookingResult<impl IntoResponse>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    let booking = service.create_booking(booker_id, input).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Approve or reject a waiting booking, owner only
///
/// PATCH /bookings/:id?approved=true|false
async fn approve_booking<B, I, U>(
    State(service): State<Arc<BookingService<B, I, U>>>,
    SharerId(caller_id): SharerId,
    Path(id): Path<i64>,
    Query(query): Query<ApproveQuery>,
) -> BookingResult<Json<BookingResponse>>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    let booking = service.approve_booking(id, caller_id, query.approved).await?;
    Ok(Json(booking))
}

/// Get a booking, visible to its booker and the item owner
///
/// GET /bookings/:id
async fn get_booking<B, I, U>(
    State(service): State<Arc<BookingService<B, I, U>>>,
    SharerId(caller_id): SharerId,
    Path(id): Path<i64>,
) -> BookingResult<Json<BookingResponse>>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    let booking = service.get_booking(id, caller_id).await?;
    Ok(Json(booking))
}

/// List the caller's bookings, filtered by state
///
/// GET /bookings?state=ALL&from=0&size=10
async fn get_user_bookings<B, I, U>(
    State(service): State<Arc<BookingService<B, I, U>>>,
    SharerId(booker_id): SharerId,
    Query(query): Query<StateQuery>,
) -> BookingResult<Json<Vec<BookingResponse>>>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    let bookings = service
        .get_user_bookings(
            booker_id,
            query.state(),
            query.from.unwrap_or(0),
            query.size.unwrap_or(10),
        )
        .await?;
    Ok(Json(bookings))
}

/// List bookings on the caller's items, filtered by state
///
/// GET /bookings/owner?state=ALL&from=0&size=10
async fn get_owner_bookings<B, I, U>(
    State(service): State<Arc<BookingService<B, I, U>>>,
    SharerId(owner_id): SharerId,
    Query(query): Query<StateQuery>,
) -> BookingResult<Json<Vec<BookingResponse>>>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    let bookings = service
        .get_owner_bookings(
            owner_id,
            query.state(),
            query.from.unwrap_or(0),
            query.size.unwrap_or(10),
        )
        .await?;
    Ok(Json(bookings))
}
