use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{BalanceSummary, EntryTemplate, UserId, compute_balance, summarize};
use crate::storage::EntryRepository;

use super::AppError;

/// Folds a user's stored entries into a single net amount.
pub struct BalanceAggregator {
    repo: Arc<dyn EntryRepository>,
}

impl BalanceAggregator {
    pub fn new(repo: Arc<dyn EntryRepository>) -> Self {
        Self { repo }
    }

    /// Net balance of every entry owned by `user`: incomes minus expenses,
    /// whatever their status.
    pub async fn balance_for_user(&self, user: UserId) -> Result<Decimal, AppError> {
        let entries = self
            .repo
            .find_by_example(&EntryTemplate::for_owner(user))
            .await?;
        let balance = compute_balance(&entries);
        debug!(user_id = user, entries = entries.len(), %balance, "computed balance");
        Ok(balance)
    }

    /// Income and expense totals for `user`; `net` equals `balance_for_user`.
    pub async fn summary_for_user(&self, user: UserId) -> Result<BalanceSummary, AppError> {
        let entries = self
            .repo
            .find_by_example(&EntryTemplate::for_owner(user))
            .await?;
        Ok(summarize(&entries))
    }
}
