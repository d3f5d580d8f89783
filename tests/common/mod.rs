// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use lancamentos::domain::{EntryId, EntryTemplate, EntryType, LedgerEntry, UserId};
use lancamentos::storage::{EntryRepository, InMemoryRepository, SqliteRepository};
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Helper to create a migrated SQLite repository in a temporary directory
pub async fn test_sqlite_repo() -> Result<(Arc<SqliteRepository>, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite:{}?mode=rwc", db_path.to_str().unwrap());
    let repo = SqliteRepository::init(&db_url).await?;
    Ok((Arc::new(repo), temp_dir))
}

/// A valid, not yet persisted entry
pub fn entry(
    description: &str,
    owner: UserId,
    amount: Decimal,
    entry_type: EntryType,
) -> LedgerEntry {
    LedgerEntry::new(description, 2, 2024, owner, amount, entry_type)
}

/// In-memory repository that counts calls, for asserting what reached storage.
#[derive(Default)]
pub struct RecordingRepository {
    inner: InMemoryRepository,
    pub creates: AtomicUsize,
    pub updates: AtomicUsize,
    pub deletes: AtomicUsize,
    pub finds: AtomicUsize,
    pub searches: AtomicUsize,
}

impl RecordingRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    /// Total number of writes of any kind
    pub fn writes(&self) -> usize {
        self.creates() + self.updates() + self.deletes()
    }
}

#[async_trait]
impl EntryRepository for RecordingRepository {
    async fn create(&self, entry: &LedgerEntry) -> Result<LedgerEntry> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create(entry).await
    }

    async fn update(&self, entry: &LedgerEntry) -> Result<LedgerEntry> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update(entry).await
    }

    async fn delete(&self, entry: &LedgerEntry) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(entry).await
    }

    async fn find_by_id(&self, id: EntryId) -> Result<Option<LedgerEntry>> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn find_by_example(&self, template: &EntryTemplate) -> Result<Vec<LedgerEntry>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_example(template).await
    }
}

/// Repository whose every call fails, to check errors pass through untouched.
pub struct FailingRepository;

#[async_trait]
impl EntryRepository for FailingRepository {
    async fn create(&self, _entry: &LedgerEntry) -> Result<LedgerEntry> {
        anyhow::bail!("storage unavailable")
    }

    async fn update(&self, _entry: &LedgerEntry) -> Result<LedgerEntry> {
        anyhow::bail!("storage unavailable")
    }

    async fn delete(&self, _entry: &LedgerEntry) -> Result<()> {
        anyhow::bail!("storage unavailable")
    }

    async fn find_by_id(&self, _id: EntryId) -> Result<Option<LedgerEntry>> {
        anyhow::bail!("storage unavailable")
    }

    async fn find_by_example(&self, _template: &EntryTemplate) -> Result<Vec<LedgerEntry>> {
        anyhow::bail!("storage unavailable")
    }
}
