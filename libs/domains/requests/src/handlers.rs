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

use crate::error::RequestResult;
use crate::models::{CreateRequest, RequestResponse};
use crate::repository::RequestRepository;
use crate::service::RequestService;

/// Create the requests router with all HTTP endpoints
pub fn router<R, I, U>(service: RequestService<R, I, U>) -> Router
where
    R: RequestRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(get_user_requests).post(create_request))
        .route("/all", get(get_all_requests))
        .route("/{id}", get(get_request))
        .with_state(shared_service)
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    from: Option<u64>,
    size: Option<u64>,
}

/// Post a new item request
///
/// POST /requests
async fn create_request<R, I, U>(
    State(service): State<Arc<RequestService<R, I, U>>>,
    SharerId(user_id): SharerId,
    ValidatedJson(input): ValidatedJson<CreateRequest>,
) -> RequestResult<impl IntoResponse>
where
    R: RequestRepository,
    I: ItemRepository,
    U: UserRepository,
{
    let request = service.create_request(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// List the caller's own requests with answering items
///
/// GET /requests
async fn get_user_requests<R, I, U>(
    State(service): State<Arc<RequestService<R, I, U>>>,
    SharerId(user_id): SharerId,
) -> RequestResult<Json<Vec<RequestResponse>>>
where
    R: RequestRepository,
    I: ItemRepository,
    U: UserRepository,
{
    let requests = service.get_user_requests(user_id).await?;
    Ok(Json(requests))
}

/// List other users' requests, paginated
///
/// GET /requests/all?from=0&size=10
async fn get_all_requests<R, I, U>(
    State(service): State<Arc<RequestService<R, I, U>>>,
    SharerId(user_id): SharerId,
    Query(page): Query<PageQuery>,
) -> RequestResult<Json<Vec<RequestResponse>>>
where
    R: RequestRepository,
    I: ItemRepository,
    U: UserRepository,
{
    let requests = service
        .get_all_requests(user_id, page.from.unwrap_or(0), page.size.unwrap_or(10))
        .await?;
    Ok(Json(requests))
}

/// Get one request with answering items
///
/// GET /requests/:id
async fn get_request<R, I, U>(
    State(service): State<Arc<RequestService<R, I, U>>>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> RequestResult<Json<RequestResponse>>
where
    R: RequestRepository,
    I: ItemRepository,
    U: UserRepository,
{
    let request = service.get_request(user_id, id).await?;
    Ok(Json(request))
}
