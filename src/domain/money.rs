use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount with two decimal places.
/// Example: 50 -> "50.00", -12.345 -> "-12.35"
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Parse a decimal string into an exact amount.
/// Accepts "50", "50.00", ".5" and a comma as decimal separator ("12,34").
pub fn parse_amount(input: &str) -> Result<Decimal, ParseAmountError> {
    let input = input.trim().replace(',', ".");
    if input.is_empty() {
        return Err(ParseAmountError::InvalidFormat);
    }

    let normalized = if input.starts_with('.') {
        format!("0{}", input)
    } else if let Some(rest) = input.strip_prefix("-.") {
        format!("-0.{}", rest)
    } else {
        input
    };

    Decimal::from_str(&normalized).map_err(|_| ParseAmountError::InvalidFormat)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
