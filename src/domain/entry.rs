use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::UserId;

pub type EntryId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryType {
    /// Money coming in
    Income,
    /// Money going out
    Expense,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "INCOME",
            EntryType::Expense => "EXPENSE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "INCOME" => Some(EntryType::Income),
            "EXPENSE" => Some(EntryType::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryStatus {
    Pending,
    Settled,
    Canceled,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Pending => "PENDING",
            EntryStatus::Settled => "SETTLED",
            EntryStatus::Canceled => "CANCELED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PENDING" => Some(EntryStatus::Pending),
            "SETTLED" => Some(EntryStatus::Settled),
            "CANCELED" => Some(EntryStatus::Canceled),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single dated income or expense record owned by one user.
///
/// Fields are optional because entries arrive from callers partially filled;
/// `validate_entry` decides whether one is fit to persist. `id` is `None` until
/// the repository assigns it on first create.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: Option<EntryId>,
    pub description: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub owner: Option<UserId>,
    pub amount: Option<Decimal>,
    /// Set once when the entry is first stored
    pub registration_date: Option<NaiveDate>,
    pub entry_type: Option<EntryType>,
    pub status: Option<EntryStatus>,
}

impl LedgerEntry {
    /// Create a fully populated, not yet persisted entry.
    pub fn new(
        description: impl Into<String>,
        month: u32,
        year: i32,
        owner: UserId,
        amount: Decimal,
        entry_type: EntryType,
    ) -> Self {
        Self {
            id: None,
            description: Some(description.into()),
            month: Some(month),
            year: Some(year),
            owner: Some(owner),
            amount: Some(amount),
            registration_date: None,
            entry_type: Some(entry_type),
            status: None,
        }
    }

    pub fn with_id(mut self, id: EntryId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_registration_date(mut self, date: NaiveDate) -> Self {
        self.registration_date = Some(date);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Signed contribution of this entry to its owner's balance.
    /// Entries without an amount or a type contribute nothing.
    pub fn signed_amount(&self) -> Option<Decimal> {
        let amount = self.amount?;
        match self.entry_type? {
            EntryType::Income => Some(amount),
            EntryType::Expense => Some(-amount),
        }
    }
}

/// Example used to search entries. Every field that is set must equal the
/// candidate's field; unset fields match anything. Strings compare exactly.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntryTemplate {
    pub description: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub owner: Option<UserId>,
    pub entry_type: Option<EntryType>,
    pub status: Option<EntryStatus>,
}

impl EntryTemplate {
    pub fn for_owner(owner: UserId) -> Self {
        Self {
            owner: Some(owner),
            ..Self::default()
        }
    }

    pub fn is_wildcard(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        field_matches(&self.description, &entry.description)
            && field_matches(&self.month, &entry.month)
            && field_matches(&self.year, &entry.year)
            && field_matches(&self.owner, &entry.owner)
            && field_matches(&self.entry_type, &entry.entry_type)
            && field_matches(&self.status, &entry.status)
    }
}

impl From<&LedgerEntry> for EntryTemplate {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            description: entry.description.clone(),
            month: entry.month,
            year: entry.year,
            owner: entry.owner,
            entry_type: entry.entry_type,
            status: entry.status,
        }
    }
}

fn field_matches<T: PartialEq>(wanted: &Option<T>, actual: &Option<T>) -> bool {
    match wanted {
        None => true,
        Some(value) => actual.as_ref() == Some(value),
    }
}
