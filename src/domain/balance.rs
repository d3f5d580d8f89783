use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EntryType, LedgerEntry};

/// Compute the net balance of a list of entries.
/// Balance = sum of incomes - sum of expenses, regardless of status.
pub fn compute_balance(entries: &[LedgerEntry]) -> Decimal {
    entries.iter().fold(Decimal::ZERO, |balance, entry| {
        match entry.signed_amount() {
            Some(amount) => balance + amount,
            None => balance,
        }
    })
}

/// Income and expense totals alongside the net balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

pub fn summarize(entries: &[LedgerEntry]) -> BalanceSummary {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;

    for entry in entries {
        let Some(amount) = entry.amount else {
            continue;
        };
        match entry.entry_type {
            Some(EntryType::Income) => income += amount,
            Some(EntryType::Expense) => expense += amount,
            None => {}
        }
    }

    BalanceSummary {
        income,
        expense,
        net: income - expense,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::EntryStatus;

    fn make_entry(amount: Decimal, entry_type: EntryType) -> LedgerEntry {
        LedgerEntry::new("entry", 1, 2024, 1, amount, entry_type)
    }

    #[test]
    fn test_compute_balance_empty() {
        assert_eq!(compute_balance(&[]), dec!(0.00));
    }

    #[test]
    fn test_compute_balance_mixed() {
        let entries = vec![
            make_entry(dec!(100.00), EntryType::Income),
            make_entry(dec!(30.00), EntryType::Expense),
            make_entry(dec!(5.00), EntryType::Income),
        ];
        assert_eq!(compute_balance(&entries), dec!(75.00));
    }

    #[test]
    fn test_compute_balance_only_expense() {
        let entries = vec![make_entry(dec!(10.00), EntryType::Expense)];
        assert_eq!(compute_balance(&entries), dec!(-10.00));
    }

    #[test]
    fn test_status_does_not_filter() {
        let entries = vec![
            make_entry(dec!(10), EntryType::Income).with_status(EntryStatus::Pending),
            make_entry(dec!(10), EntryType::Income).with_status(EntryStatus::Settled),
            make_entry(dec!(10), EntryType::Income).with_status(EntryStatus::Canceled),
        ];
        assert_eq!(compute_balance(&entries), dec!(30));
    }

    #[test]
    fn test_untyped_entries_are_ignored() {
        let entries = vec![
            make_entry(dec!(10), EntryType::Income),
            LedgerEntry {
                amount: Some(dec!(99)),
                ..LedgerEntry::default()
            },
        ];
        assert_eq!(compute_balance(&entries), dec!(10));
    }

    #[test]
    fn test_no_rounding_drift() {
        let entries: Vec<_> = (0..1000)
            .map(|_| make_entry(dec!(0.10), EntryType::Income))
            .collect();
        assert_eq!(compute_balance(&entries), dec!(100.00));
    }

    #[test]
    fn test_summarize() {
        let entries = vec![
            make_entry(dec!(100.00), EntryType::Income),
            make_entry(dec!(30.00), EntryType::Expense),
            make_entry(dec!(5.00), EntryType::Income),
        ];
        let summary = summarize(&entries);
        assert_eq!(summary.income, dec!(105.00));
        assert_eq!(summary.expense, dec!(30.00));
        assert_eq!(summary.net, compute_balance(&entries));
    }
}
