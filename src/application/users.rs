use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{User, UserId};
use crate::storage::UserRepository;

use super::AppError;

/// Registration and lookup of entry owners.
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Register a new user. Emails are unique.
    pub async fn register(&self, name: String, email: String) -> Result<User, AppError> {
        self.validate_email(&email).await?;

        let user = self.repo.create_user(&User::new(name, email)).await?;
        info!(user_id = ?user.id, email = %user.email, "registered user");
        Ok(user)
    }

    /// Fail if the email is already taken.
    pub async fn validate_email(&self, email: &str) -> Result<(), AppError> {
        if self.repo.exists_by_email(email).await? {
            debug!(email, "email already registered");
            return Err(AppError::UserAlreadyExists(email.to_string()));
        }
        Ok(())
    }

    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        Ok(self.repo.find_user(id).await?)
    }

    /// Like `find_by_id`, but absence is an error.
    pub async fn get(&self, id: UserId) -> Result<User, AppError> {
        self.find_by_id(id).await?.ok_or(AppError::UserNotFound(id))
    }
}
