use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_items::ItemError;
use domain_users::UserError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Request with id {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Item(#[from] ItemError),

    #[error("Database error: {0}")]
    Database(String),
}

pub type RequestResult<T> = Result<T, RequestError>;

/// Convert RequestError to AppError for standardized error responses
impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::NotFound(id) => {
                AppError::NotFound(format!("Request with id {} not found", id))
            }
            RequestError::User(err) => err.into(),
            RequestError::Item(err) => err.into(),
            RequestError::Database(msg) => {
                AppError::InternalServerError(format!("Database error: {}", msg))
            }
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for RequestError {
    fn from(err: sea_orm::DbErr) -> Self {
        RequestError::Database(err.to_string())
    }
}
