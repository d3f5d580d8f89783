use thiserror::Error;

use crate::domain::{EntryId, PreconditionError, UserId, ValidationError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("A user is already registered with email {0}")]
    UserAlreadyExists(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
