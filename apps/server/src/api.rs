use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use std::sync::Arc;

use domain_bookings::{BookingService, ItemViewService, PgBookingRepository, PgCommentRepository};
use domain_items::{ItemService, PgItemRepository};
use domain_requests::{PgRequestRepository, RequestService};
use domain_users::{PgUserRepository, UserService};

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Composes the domain routers. Each router owns its service; the item
/// prefix merges the catalog mutations with the projection reads.
pub fn routes(state: &AppState) -> Router {
    let users = Arc::new(PgUserRepository::new(state.db.clone()));
    let items = Arc::new(PgItemRepository::new(state.db.clone()));
    let bookings = Arc::new(PgBookingRepository::new(state.db.clone()));
    let comments = Arc::new(PgCommentRepository::new(state.db.clone()));
    let requests = Arc::new(PgRequestRepository::new(state.db.clone()));

    let user_service = UserService::new(Arc::clone(&users));
    let item_service = ItemService::new(Arc::clone(&items), Arc::clone(&users));
    let booking_service = BookingService::new(
        Arc::clone(&bookings),
        Arc::clone(&items),
        Arc::clone(&users),
    );
    let view_service = ItemViewService::new(bookings, comments, Arc::clone(&items), Arc::clone(&users));
    let request_service = RequestService::new(requests, items, users);

    Router::new()
        .nest("/users", domain_users::handlers::router(user_service))
        .nest(
            "/items",
            domain_items::handlers::router(item_service)
                .merge(domain_bookings::handlers::item_views_router(view_service)),
        )
        .nest(
            "/bookings",
            domain_bookings::handlers::bookings_router(booking_service),
        )
        .nest(
            "/requests",
            domain_requests::handlers::router(request_service),
        )
        .route("/api-docs/openapi.json", get(openapi_spec))
}

async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    use utoipa::OpenApi;
    Json(ApiDoc::openapi())
}

/// Readiness probe backed by a real database ping.
pub fn ready_router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}

async fn ready(State(state): State<AppState>) -> StatusCode {
    match database::postgres::check_health(&state.db).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
