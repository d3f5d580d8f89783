mod memory;
mod repository;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{EntryId, EntryTemplate, LedgerEntry, User, UserId};

pub use memory::*;
pub use repository::*;

/// SQL migration for initial schema
pub const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");

/// Persistence contract for ledger entries.
///
/// Implementations must make a single create/update/delete atomic. Errors are
/// returned as-is to the caller of the service layer.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Store a new entry and return it with its assigned id.
    /// An entry without status is stored as PENDING.
    async fn create(&self, entry: &LedgerEntry) -> Result<LedgerEntry>;

    /// Overwrite a stored entry. Fails if the id is unknown.
    async fn update(&self, entry: &LedgerEntry) -> Result<LedgerEntry>;

    /// Remove a stored entry. Fails if the id is unknown.
    async fn delete(&self, entry: &LedgerEntry) -> Result<()>;

    async fn find_by_id(&self, id: EntryId) -> Result<Option<LedgerEntry>>;

    /// Entries matching the template, ordered by id.
    async fn find_by_example(&self, template: &EntryTemplate) -> Result<Vec<LedgerEntry>>;
}

/// Persistence contract for entry owners.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: &User) -> Result<User>;

    async fn find_user(&self, id: UserId) -> Result<Option<User>>;

    async fn exists_by_email(&self, email: &str) -> Result<bool>;
}
