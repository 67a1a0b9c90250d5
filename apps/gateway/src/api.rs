use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{Method, Response, StatusCode},
    routing::get,
    Router,
};
use axum_helpers::{AppError, SharerId, ValidatedJson};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::client::ServerClient;
use crate::dto::{
    validate_state, BookItemRequest, CreateCommentRequest, CreateItemRequest, CreateRequestRequest,
    CreateUserRequest, UpdateItemRequest, UpdateUserRequest,
};

type GatewayResult = Result<Response<Body>, AppError>;

/// Mirrors the server's route table; every handler validates and forwards.
pub fn routes(client: ServerClient) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/items", get(get_owner_items).post(create_item))
        .route("/items/search", get(search_items))
        .route(
            "/items/{id}",
            get(get_item).patch(update_item).delete(delete_item),
        )
        .route("/items/{id}/comment", axum::routing::post(create_comment))
        .route("/bookings", get(get_user_bookings).post(create_booking))
        .route("/bookings/owner", get(get_owner_bookings))
        .route(
            "/bookings/{id}",
            get(get_booking).patch(approve_booking),
        )
        .route("/requests", get(get_user_requests).post(create_request))
        .route("/requests/all", get(get_all_requests))
        .route("/requests/{id}", get(get_request))
        .with_state(client)
}

/// Readiness probe backed by the server's liveness endpoint.
pub fn ready_router(client: ServerClient) -> Router {
    Router::new().route("/ready", get(ready)).with_state(client)
}

async fn ready(State(client): State<ServerClient>) -> StatusCode {
    match client.ping().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(value).map_err(|e| AppError::InternalServerError(e.to_string()))
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

#[derive(Debug, Deserialize)]
struct PageQuery {
    from: Option<u64>,
    size: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    text: String,
}

// Users

async fn create_user(
    State(client): State<ServerClient>,
    ValidatedJson(input): ValidatedJson<CreateUserRequest>,
) -> GatewayResult {
    client
        .forward(Method::POST, "/users", None, &[], Some(to_body(&input)?))
        .await
}

async fn list_users(State(client): State<ServerClient>) -> GatewayResult {
    client.forward(Method::GET, "/users", None, &[], None).await
}

async fn get_user(State(client): State<ServerClient>, Path(id): Path<i64>) -> GatewayResult {
    client
        .forward(Method::GET, &format!("/users/{}", id), None, &[], None)
        .await
}

async fn update_user(
    State(client): State<ServerClient>,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<UpdateUserRequest>,
) -> GatewayResult {
    client
        .forward(
            Method::PATCH,
            &format!("/users/{}", id),
            None,
            &[],
            Some(to_body(&input)?),
        )
        .await
}

async fn delete_user(State(client): State<ServerClient>, Path(id): Path<i64>) -> GatewayResult {
    client
        .forward(Method::DELETE, &format!("/users/{}", id), None, &[], None)
        .await
}

// Items

async fn create_item(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    ValidatedJson(input): ValidatedJson<CreateItemRequest>,
) -> GatewayResult {
    client
        .forward(
            Method::POST,
            "/items",
            Some(user_id),
            &[],
            Some(to_body(&input)?),
        )
        .await
}

async fn update_item(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<UpdateItemRequest>,
) -> GatewayResult {
    client
        .forward(
            Method::PATCH,
            &format!("/items/{}", id),
            Some(user_id),
            &[],
            Some(to_body(&input)?),
        )
        .await
}

async fn get_item(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> GatewayResult {
    client
        .forward(
            Method::GET,
            &format!("/items/{}", id),
            Some(user_id),
            &[],
            None,
        )
        .await
}

async fn get_owner_items(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
) -> GatewayResult {
    client
        .forward(Method::GET, "/items", Some(user_id), &[], None)
        .await
}

async fn search_items(
    State(client): State<ServerClient>,
    Query(query): Query<SearchQuery>,
) -> GatewayResult {
    client
        .forward(
            Method::GET,
            "/items/search",
            None,
            &[("text", query.text)],
            None,
        )
        .await
}

async fn delete_item(State(client): State<ServerClient>, Path(id): Path<i64>) -> GatewayResult {
    client
        .forward(Method::DELETE, &format!("/items/{}", id), None, &[], None)
        .await
}

async fn create_comment(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<CreateCommentRequest>,
) -> GatewayResult {
    client
        .forward(
            Method::POST,
            &format!("/items/{}/comment", id),
            Some(user_id),
            &[],
            Some(to_body(&input)?),
        )
        .await
}

// Bookings

async fn create_booking(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    ValidatedJson(input): ValidatedJson<BookItemRequest>,
) -> GatewayResult {
    input.ensure_period_valid(Utc::now())?;

    client
        .forward(
            Method::POST,
            "/bookings",
            Some(user_id),
            &[],
            Some(to_body(&input)?),
        )
        .await
}

async fn approve_booking(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
    Query(query): Query<ApproveQuery>,
) -> GatewayResult {
    client
        .forward(
            Method::PATCH,
            &format!("/bookings/{}", id),
            Some(user_id),
            &[("approved", query.approved.to_string())],
            None,
        )
        .await
}

async fn get_booking(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> GatewayResult {
    client
        .forward(
            Method::GET,
            &format!("/bookings/{}", id),
            Some(user_id),
            &[],
            None,
        )
        .await
}

fn state_query_params(query: StateQuery) -> Result<Vec<(&'static str, String)>, AppError> {
    let state = validate_state(query.state.as_deref().unwrap_or("ALL"))?;

    Ok(vec![
        ("state", state),
        ("from", query.from.unwrap_or(0).to_string()),
        ("size", query.size.unwrap_or(10).to_string()),
    ])
}

async fn get_user_bookings(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Query(query): Query<StateQuery>,
) -> GatewayResult {
    let params = state_query_params(query)?;
    client
        .forward(Method::GET, "/bookings", Some(user_id), &params, None)
        .await
}

async fn get_owner_bookings(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Query(query): Query<StateQuery>,
) -> GatewayResult {
    let params = state_query_params(query)?;
    client
        .forward(Method::GET, "/bookings/owner", Some(user_id), &params, None)
        .await
}

// Requests

async fn create_request(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    ValidatedJson(input): ValidatedJson<CreateRequestRequest>,
) -> GatewayResult {
    client
        .forward(
            Method::POST,
            "/requests",
            Some(user_id),
            &[],
            Some(to_body(&input)?),
        )
        .await
}

async fn get_user_requests(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
) -> GatewayResult {
    client
        .forward(Method::GET, "/requests", Some(user_id), &[], None)
        .await
}

async fn get_all_requests(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Query(page): Query<PageQuery>,
) -> GatewayResult {
    let params = [
        ("from", page.from.unwrap_or(0).to_string()),
        ("size", page.size.unwrap_or(10).to_string()),
    ];
    client
        .forward(Method::GET, "/requests/all", Some(user_id), &params, None)
        .await
}

async fn get_request(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> GatewayResult {
    client
        .forward(
            Method::GET,
            &format!("/requests/{}", id),
            Some(user_id),
            &[],
            None,
        )
        .await
}
