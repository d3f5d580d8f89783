use std::collections::BTreeMap;

use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::{EntryId, EntryStatus, EntryTemplate, LedgerEntry, User, UserId};

use super::{EntryRepository, UserRepository};

#[derive(Default)]
struct Tables {
    entries: BTreeMap<EntryId, LedgerEntry>,
    users: BTreeMap<UserId, User>,
    next_entry_id: EntryId,
    next_user_id: UserId,
}

/// Process-local repository. Mirrors the SQLite one for ids, default status,
/// registration date and ordering by id, but does not check that an entry's
/// owner is a stored user.
#[derive(Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryRepository for InMemoryRepository {
    async fn create(&self, entry: &LedgerEntry) -> Result<LedgerEntry> {
        let mut tables = self.tables.write();
        tables.next_entry_id += 1;
        let id = tables.next_entry_id;

        let mut stored = entry.clone();
        stored.id = Some(id);
        stored.status = Some(entry.status.unwrap_or(EntryStatus::Pending));
        stored.registration_date = Some(
            entry
                .registration_date
                .unwrap_or_else(|| Utc::now().date_naive()),
        );

        tables.entries.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, entry: &LedgerEntry) -> Result<LedgerEntry> {
        let Some(id) = entry.id else {
            bail!("Cannot update an entry without id");
        };

        let mut tables = self.tables.write();
        let Some(existing) = tables.entries.get_mut(&id) else {
            bail!("Entry {} does not exist", id);
        };

        let registration_date = existing.registration_date;
        let status = entry.status.or(existing.status);
        *existing = LedgerEntry {
            registration_date,
            status,
            ..entry.clone()
        };
        Ok(existing.clone())
    }

    async fn delete(&self, entry: &LedgerEntry) -> Result<()> {
        let Some(id) = entry.id else {
            bail!("Cannot delete an entry without id");
        };

        if self.tables.write().entries.remove(&id).is_none() {
            bail!("Entry {} does not exist", id);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: EntryId) -> Result<Option<LedgerEntry>> {
        Ok(self.tables.read().entries.get(&id).cloned())
    }

    async fn find_by_example(&self, template: &EntryTemplate) -> Result<Vec<LedgerEntry>> {
        Ok(self
            .tables
            .read()
            .entries
            .values()
            .filter(|entry| template.matches(entry))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn create_user(&self, user: &User) -> Result<User> {
        let mut tables = self.tables.write();
        if tables.users.values().any(|u| u.email == user.email) {
            bail!("UNIQUE constraint failed: users.email");
        }

        tables.next_user_id += 1;
        let id = tables.next_user_id;
        let stored = user.clone().with_id(id);
        tables.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.tables.read().users.get(&id).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        Ok(self.tables.read().users.values().any(|u| u.email == email))
    }
}
