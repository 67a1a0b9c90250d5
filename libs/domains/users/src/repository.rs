use async_trait::async_trait;

use crate::error::UserResult;
use crate::models::{CreateUser, User};

/// Repository trait for User persistence
///
/// The booking core's user-existence checks go through this trait as well,
/// so implementations must stay cheap for `get_by_id`/`exists`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(&self, input: CreateUser) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>>;

    /// Fetch several users at once; missing ids are simply absent from the result
    async fn get_many(&self, ids: Vec<i64>) -> UserResult<Vec<User>>;

    /// List all users
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Persist an updated user
    async fn update(&self, user: User) -> UserResult<User>;

    /// Delete a user by ID, returning whether a row was removed
    async fn delete(&self, id: i64) -> UserResult<bool>;

    /// Check whether a user exists
    async fn exists(&self, id: i64) -> UserResult<bool>;

    /// Check whether an email is taken by a user other than `exclude_id`
    async fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> UserResult<bool>;
}
