//! OpenAPI document served at /api-docs/openapi.json.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LendHub Server API",
        description = "Business tier of the LendHub item-sharing marketplace"
    ),
    components(schemas(
        domain_users::UserResponse,
        domain_users::CreateUser,
        domain_users::UpdateUser,
        domain_items::ItemResponse,
        domain_items::CreateItem,
        domain_items::UpdateItem,
        domain_bookings::BookingResponse,
        domain_bookings::BookingStatus,
        domain_bookings::Booking,
        domain_bookings::models::BookingBrief,
        domain_bookings::models::ItemRef,
        domain_bookings::models::UserRef,
        domain_bookings::NewBooking,
        domain_bookings::CreateComment,
        domain_bookings::CommentResponse,
        domain_bookings::ItemView,
        domain_requests::CreateRequest,
        domain_requests::RequestResponse,
        axum_helpers::ErrorResponse,
    ))
)]
pub struct ApiDoc;
