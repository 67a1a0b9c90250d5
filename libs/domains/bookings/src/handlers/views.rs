use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{SharerId, ValidatedJson};
use domain_items::ItemRepository;
use domain_users::UserRepository;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::BookingResult;
use crate::models::{CreateComment, ItemView};
use crate::repository::{BookingRepository, CommentRepository};
use crate::views::ItemViewService;

/// Item read endpoints with the booking projection attached. Merged into the
/// same /items prefix as the catalog mutation router.
pub fn router<B, C, I, U>(service: ItemViewService<B, C, I, U>) -> Router
where
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(get_owner_items))
        .route("/search", get(search_items))
        .route("/{id}", get(get_item))
        .route("/{id}/comment", post(create_comment))
        .with_state(shared_service)
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    text: String,
}

/// Get one item with its projection, owner and non-owner views differ
///
/// GET /items/:id
async fn get_item<B, C, I, U>(
    State(service): State<Arc<ItemViewService<B, C, I, U>>>,
    SharerId(caller_id): SharerId,
    Path(id): Path<i64>,
) -> BookingResult<Json<ItemView>>
where
    B: BookingRepository,
    C: CommentRepository,
    I: ItemRepository,
    U: UserRepository,
{
    let view = service.get_item_view(id, caller_id).await?;
    Ok(Json(view))
}

/// List the caller's items with projections
///
/// GET /items
async fn get_owner_items<B, C, I, U>(
    State(service): State<Arc<ItemViewService<B, C, I, U>>>,
    SharerId(owner_id): SharerId,
) -> BookingResult<Json<Vec<ItemView>>>
where
    B: BookingRepository,
    C: CommentRepository,
    I: ItemRepository,
    U: UserRepository,
{
    let views = service.get_owner_item_views(owner_id).await?;
    Ok(Json(views))
}

/// Search available items by name or description
///
/// GET /items/search?text=
async fn search_items<B, C, I, U>(
    State(service): State<Arc<ItemViewService<B, C, I, U>>>,
    Query(query): Query<SearchQuery>,
) -> BookingResult<Json<Vec<ItemView>>>
where
    B: BookingRepository,
    C: CommentRepository,
    I: ItemRepository,
    U: UserRepository,
{
    let views = service.search_item_views(&query.text).await?;
    Ok(Json(views))
}

/// Comment on an item after a completed booking
///
/// POST /items/:id/comment
async fn create_comment<B, C, I, U>(
    State(service): State<Arc<ItemViewService<B, C, I, U>>>,
    SharerId(author_id): SharerId,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<CreateComment>,
) -> BookingResult<impl IntoResponse>
where
    B: BookingRepository,
    C: CommentRepository,
    I: ItemRepository,
    U: UserRepository,
{
    let comment = service.create_comment(author_id, id, input).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
