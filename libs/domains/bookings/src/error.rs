use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_items::ItemError;
use domain_users::UserError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Booking with id {0} not found")]
    NotFound(i64),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Item(#[from] ItemError),

    #[error("Database error: {0}")]
    Database(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

/// Convert BookingError to AppError for standardized error responses
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::NotFound(id) => {
                AppError::NotFound(format!("Booking with id {} not found", id))
            }
            BookingError::Validation(msg) => AppError::BadRequest(msg),
            BookingError::User(err) => err.into(),
            BookingError::Item(err) => err.into(),
            BookingError::Database(msg) => {
                AppError::InternalServerError(format!("Database error: {}", msg))
            }
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for BookingError {
    fn from(err: sea_orm::DbErr) -> Self {
        BookingError::Database(err.to_string())
    }
}
