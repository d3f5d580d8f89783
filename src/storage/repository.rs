use std::str::FromStr;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::domain::{
    EntryId, EntryStatus, EntryTemplate, EntryType, LedgerEntry, User, UserId,
};

use super::{EntryRepository, MIGRATION_001_INITIAL, UserRepository};

const ENTRY_COLUMNS: &str =
    "id, description, month, year, owner_id, amount, registration_date, entry_type, status";

/// SQLite-backed repository for entries and their owners.
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    fn row_to_entry(row: &sqlx::sqlite::SqliteRow) -> Result<LedgerEntry> {
        let month: Option<i64> = row.get("month");
        let year: Option<i64> = row.get("year");
        let amount_str: Option<String> = row.get("amount");
        let date_str: Option<String> = row.get("registration_date");
        let type_str: Option<String> = row.get("entry_type");
        let status_str: String = row.get("status");

        Ok(LedgerEntry {
            id: Some(row.get("id")),
            description: row.get("description"),
            month: month
                .map(u32::try_from)
                .transpose()
                .context("Invalid month")?,
            year: year.map(i32::try_from).transpose().context("Invalid year")?,
            owner: row.get("owner_id"),
            amount: amount_str
                .map(|s| Decimal::from_str(&s))
                .transpose()
                .context("Invalid amount")?,
            registration_date: date_str
                .map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d"))
                .transpose()
                .context("Invalid registration_date")?,
            entry_type: type_str
                .map(|s| {
                    EntryType::from_str(&s)
                        .ok_or_else(|| anyhow::anyhow!("Invalid entry type: {}", s))
                })
                .transpose()?,
            status: Some(
                EntryStatus::from_str(&status_str)
                    .ok_or_else(|| anyhow::anyhow!("Invalid status: {}", status_str))?,
            ),
        })
    }

    fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
        let created_at_str: String = row.get("created_at");

        Ok(User {
            id: Some(row.get("id")),
            name: row.get("name"),
            email: row.get("email"),
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .context("Invalid created_at timestamp")?
                .with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl EntryRepository for SqliteRepository {
    async fn create(&self, entry: &LedgerEntry) -> Result<LedgerEntry> {
        let mut stored = entry.clone();
        stored.status = Some(entry.status.unwrap_or(EntryStatus::Pending));
        stored.registration_date = Some(
            entry
                .registration_date
                .unwrap_or_else(|| Utc::now().date_naive()),
        );

        let row = sqlx::query(
            r#"
            INSERT INTO entries (description, month, year, owner_id, amount, registration_date, entry_type, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&stored.description)
        .bind(stored.month.map(i64::from))
        .bind(stored.year.map(i64::from))
        .bind(stored.owner)
        .bind(stored.amount.map(|a| a.to_string()))
        .bind(stored.registration_date.map(|d| d.to_string()))
        .bind(stored.entry_type.map(|t| t.as_str()))
        .bind(stored.status.map(|s| s.as_str()))
        .fetch_one(&self.pool)
        .await
        .context("Failed to save entry")?;

        stored.id = Some(row.get("id"));
        Ok(stored)
    }

    async fn update(&self, entry: &LedgerEntry) -> Result<LedgerEntry> {
        let Some(id) = entry.id else {
            bail!("Cannot update an entry without id");
        };

        let result = sqlx::query(
            r#"
            UPDATE entries
            SET description = ?, month = ?, year = ?, owner_id = ?, amount = ?,
                entry_type = ?, status = COALESCE(?, status)
            WHERE id = ?
            "#,
        )
        .bind(&entry.description)
        .bind(entry.month.map(i64::from))
        .bind(entry.year.map(i64::from))
        .bind(entry.owner)
        .bind(entry.amount.map(|a| a.to_string()))
        .bind(entry.entry_type.map(|t| t.as_str()))
        .bind(entry.status.map(|s| s.as_str()))
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update entry")?;

        if result.rows_affected() == 0 {
            bail!("Entry {} does not exist", id);
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Entry {} vanished after update", id))
    }

    async fn delete(&self, entry: &LedgerEntry) -> Result<()> {
        let Some(id) = entry.id else {
            bail!("Cannot delete an entry without id");
        };

        let result = sqlx::query("DELETE FROM entries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete entry")?;

        if result.rows_affected() == 0 {
            bail!("Entry {} does not exist", id);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: EntryId) -> Result<Option<LedgerEntry>> {
        let query = format!("SELECT {} FROM entries WHERE id = ?", ENTRY_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch entry")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_entry(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_example(&self, template: &EntryTemplate) -> Result<Vec<LedgerEntry>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM entries WHERE 1 = 1", ENTRY_COLUMNS));

        if let Some(description) = &template.description {
            builder.push(" AND description = ").push_bind(description.clone());
        }
        if let Some(month) = template.month {
            builder.push(" AND month = ").push_bind(i64::from(month));
        }
        if let Some(year) = template.year {
            builder.push(" AND year = ").push_bind(i64::from(year));
        }
        if let Some(owner) = template.owner {
            builder.push(" AND owner_id = ").push_bind(owner);
        }
        if let Some(entry_type) = template.entry_type {
            builder.push(" AND entry_type = ").push_bind(entry_type.as_str());
        }
        if let Some(status) = template.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        builder.push(" ORDER BY id");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .context("Failed to search entries")?;

        rows.iter().map(Self::row_to_entry).collect()
    }
}

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn create_user(&self, user: &User) -> Result<User> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (name, email, created_at)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.created_at.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .context("Failed to save user")?;

        Ok(user.clone().with_id(row.get("id")))
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, name, email, created_at FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch user")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .context("Failed to look up user email")?;

        let count: i64 = row.get("count");
        Ok(count > 0)
    }
}
