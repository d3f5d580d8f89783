use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    EntryId, EntryStatus, EntryTemplate, LedgerEntry, require_persisted, transition,
    validate_entry,
};
use crate::storage::EntryRepository;

use super::AppError;

/// Application service for ledger entries.
/// This is the primary interface for any client (CLI, API, TUI, etc.).
pub struct EntryService {
    repo: Arc<dyn EntryRepository>,
}

impl EntryService {
    /// Create a new entry service on top of the given repository.
    pub fn new(repo: Arc<dyn EntryRepository>) -> Self {
        Self { repo }
    }

    /// Validate and store a new entry. The returned entry carries its id.
    pub async fn save(&self, entry: LedgerEntry) -> Result<LedgerEntry, AppError> {
        if let Err(e) = validate_entry(&entry) {
            debug!(reason = %e, "rejected new entry");
            return Err(e.into());
        }

        let saved = self.repo.create(&entry).await?;
        info!(entry_id = ?saved.id, owner_id = ?saved.owner, "saved entry");
        Ok(saved)
    }

    /// Validate and overwrite a stored entry.
    ///
    /// The stored status is kept; use `update_status` to change it.
    pub async fn update(&self, entry: LedgerEntry) -> Result<LedgerEntry, AppError> {
        require_persisted(&entry)?;
        if let Err(e) = validate_entry(&entry) {
            debug!(entry_id = ?entry.id, reason = %e, "rejected entry update");
            return Err(e.into());
        }

        // Repositories keep the stored status when none is sent.
        let entry = LedgerEntry {
            status: None,
            ..entry
        };
        let updated = self.repo.update(&entry).await?;
        info!(entry_id = ?updated.id, "updated entry");
        Ok(updated)
    }

    /// Remove a stored entry. Fields are not validated.
    pub async fn delete(&self, entry: &LedgerEntry) -> Result<(), AppError> {
        require_persisted(entry)?;

        self.repo.delete(entry).await?;
        info!(entry_id = ?entry.id, "deleted entry");
        Ok(())
    }

    /// Move a stored entry to a new status and persist it.
    pub async fn update_status(
        &self,
        entry: LedgerEntry,
        status: EntryStatus,
    ) -> Result<LedgerEntry, AppError> {
        let previous = entry.status;
        let entry = transition(entry, status)?;

        let updated = self.repo.update(&entry).await?;
        info!(entry_id = ?updated.id, from = ?previous, to = %status, "changed entry status");
        Ok(updated)
    }

    /// Look up an entry. Absence is not an error.
    pub async fn find_by_id(&self, id: EntryId) -> Result<Option<LedgerEntry>, AppError> {
        Ok(self.repo.find_by_id(id).await?)
    }

    /// Like `find_by_id`, but absence is an error.
    pub async fn get(&self, id: EntryId) -> Result<LedgerEntry, AppError> {
        self.find_by_id(id)
            .await?
            .ok_or(AppError::EntryNotFound(id))
    }

    /// Entries matching every field set on the template, in storage order.
    pub async fn search(&self, template: &EntryTemplate) -> Result<Vec<LedgerEntry>, AppError> {
        let entries = self.repo.find_by_example(template).await?;
        debug!(?template, found = entries.len(), "searched entries");
        Ok(entries)
    }
}
