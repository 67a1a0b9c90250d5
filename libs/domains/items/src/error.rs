use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_users::UserError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item with id {0} not found")]
    NotFound(i64),

    #[error("Item belongs to another owner")]
    Forbidden,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    User(#[from] UserError),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(id) => AppError::NotFound(format!("Item with id {} not found", id)),
            ItemError::Forbidden => AppError::Forbidden("Item belongs to another owner".to_string()),
            ItemError::Validation(msg) => AppError::BadRequest(msg),
            ItemError::User(err) => err.into(),
            ItemError::Database(msg) => {
                AppError::InternalServerError(format!("Database error: {}", msg))
            }
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for ItemError {
    fn from(err: sea_orm::DbErr) -> Self {
        ItemError::Database(err.to_string())
    }
}
