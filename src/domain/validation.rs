use rust_decimal::Decimal;
use thiserror::Error;

use super::LedgerEntry;

/// Reason an entry was rejected. Only the first failing rule is reported.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid description")]
    InvalidDescription,

    #[error("invalid month")]
    InvalidMonth,

    #[error("invalid year")]
    InvalidYear,

    #[error("missing user")]
    MissingUser,

    #[error("invalid amount")]
    InvalidAmount,

    #[error("missing entry type")]
    MissingEntryType,
}

/// Raised when an operation needs a stored entry but got a transient one.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("entry has not been persisted yet (missing id)")]
    NotPersisted,
}

/// Check an entry's fields before it is stored.
///
/// Rules run in a fixed order: description, month, year, owner, amount, type.
/// `status` and `registration_date` are not looked at.
pub fn validate_entry(entry: &LedgerEntry) -> Result<(), ValidationError> {
    if entry
        .description
        .as_deref()
        .is_none_or(|d| d.trim().is_empty())
    {
        return Err(ValidationError::InvalidDescription);
    }

    if !entry.month.is_some_and(|m| (1..=12).contains(&m)) {
        return Err(ValidationError::InvalidMonth);
    }

    if !entry.year.is_some_and(|y| (1000..=9999).contains(&y)) {
        return Err(ValidationError::InvalidYear);
    }

    if entry.owner.is_none() {
        return Err(ValidationError::MissingUser);
    }

    if !entry.amount.is_some_and(|a| a > Decimal::ZERO) {
        return Err(ValidationError::InvalidAmount);
    }

    if entry.entry_type.is_none() {
        return Err(ValidationError::MissingEntryType);
    }

    Ok(())
}

/// Fail unless the entry already carries a storage-assigned id.
pub fn require_persisted(entry: &LedgerEntry) -> Result<(), PreconditionError> {
    if entry.is_persisted() {
        Ok(())
    } else {
        Err(PreconditionError::NotPersisted)
    }
}
