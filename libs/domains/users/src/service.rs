use std::sync::Arc;

use crate::{
    error::{UserError, UserResult},
    models::{CreateUser, UpdateUser, User},
    repository::UserRepository,
};

/// Business logic for user accounts. Email uniqueness is enforced here so
/// callers get a conflict error instead of a raw database constraint failure.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        if self.repository.email_taken(&input.email, None).await? {
            return Err(UserError::DuplicateEmail(input.email));
        }

        self.repository.create(input).await
    }

    pub async fn get_user(&self, id: i64) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list().await
    }

    /// Applies only the fields present in the patch, keeping the rest intact.
    pub async fn update_user(&self, id: i64, patch: UpdateUser) -> UserResult<User> {
        let mut user = self.get_user(id).await?;

        if let Some(email) = &patch.email {
            if self.repository.email_taken(email, Some(id)).await? {
                return Err(UserError::DuplicateEmail(email.clone()));
            }
        }

        user.apply_update(patch);
        self.repository.update(user).await
    }

    pub async fn delete_user(&self, id: i64) -> UserResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use mockall::predicate::eq;

    fn sample_user() -> User {
        User {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn create_user_succeeds_when_email_is_free() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_taken()
            .with(eq("alice@example.com"), eq(None))
            .returning(|_, _| Ok(false));
        repo.expect_create().returning(|input| {
            Ok(User {
                id: 1,
                name: input.name,
                email: input.email,
            })
        });

        let service = UserService::new(Arc::new(repo));
        let user = service
            .create_user(CreateUser {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn create_user_rejects_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_taken().returning(|_, _| Ok(true));

        let service = UserService::new(Arc::new(repo));
        let result = service
            .create_user(CreateUser {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn get_user_returns_not_found_for_missing_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(eq(42))
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repo));
        let result = service.get_user(42).await;

        assert!(matches!(result, Err(UserError::NotFound(42))));
    }

    #[tokio::test]
    async fn update_user_applies_partial_patch() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(sample_user())));
        repo.expect_update().returning(Ok);

        let service = UserService::new(Arc::new(repo));
        let updated = service
            .update_user(
                1,
                UpdateUser {
                    name: Some("Alicia".to_string()),
                    email: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.email, "alice@example.com");
    }

    #[tokio::test]
    async fn update_user_rejects_email_taken_by_another_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(sample_user())));
        repo.expect_email_taken()
            .with(eq("bob@example.com"), eq(Some(1)))
            .returning(|_, _| Ok(true));

        let service = UserService::new(Arc::new(repo));
        let result = service
            .update_user(
                1,
                UpdateUser {
                    name: None,
                    email: Some("bob@example.com".to_string()),
                },
            )
            .await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn update_user_allows_keeping_own_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(sample_user())));
        repo.expect_email_taken()
            .with(eq("alice@example.com"), eq(Some(1)))
            .returning(|_, _| Ok(false));
        repo.expect_update().returning(Ok);

        let service = UserService::new(Arc::new(repo));
        let updated = service
            .update_user(
                1,
                UpdateUser {
                    name: None,
                    email: Some("alice@example.com".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.email, "alice@example.com");
    }

    #[tokio::test]
    async fn delete_user_returns_not_found_when_nothing_deleted() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().with(eq(9)).returning(|_| Ok(false));

        let service = UserService::new(Arc::new(repo));
        let result = service.delete_user(9).await;

        assert!(matches!(result, Err(UserError::NotFound(9))));
    }
}
