use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{patch, post},
};
use axum_helpers::{SharerId, ValidatedJson};
use domain_users::UserRepository;
use std::sync::Arc;

use crate::error::ItemResult;
use crate::models::{CreateItem, ItemResponse, UpdateItem};
use crate::repository::ItemRepository;
use crate::service::ItemService;

/// Catalog mutation endpoints. Read endpoints with the booking projection
/// live in the booking crate and are merged into the same /items prefix.
pub fn router<I, U>(service: ItemService<I, U>) -> Router
where
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(create_item))
        .route("/{id}", patch(update_item).delete(delete_item))
        .with_state(shared_service)
}

/// Create a new item owned by the calling user
///
/// POST /items
async fn create_item<I: ItemRepository, U: UserRepository>(
    State(service): State<Arc<ItemService<I, U>>>,
    SharerId(owner_id): SharerId,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> ItemResult<impl IntoResponse> {
    let item = service.create_item(owner_id, input).await?;
    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

/// Partially update an item, owner only
///
/// PATCH /items/:id
async fn update_item<I: ItemRepository, U: UserRepository>(
    State(service): State<Arc<ItemService<I, U>>>,
    SharerId(caller_id): SharerId,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> ItemResult<Json<ItemResponse>> {
    let item = service.update_item(caller_id, id, input).await?;
    Ok(Json(item.into()))
}

/// Delete an item
///
/// DELETE /items/:id
async fn delete_item<I: ItemRepository, U: UserRepository>(
    State(service): State<Arc<ItemService<I, U>>>,
    Path(id): Path<i64>,
) -> ItemResult<impl IntoResponse> {
    service.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
