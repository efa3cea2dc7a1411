//! Expense models for CSV parsing and the group model.

use crate::amount::Amount;
use crate::error::ValidationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single logged expense. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    amount: Amount,
    #[serde(default)]
    label: String,
}

impl ExpenseEntry {
    /// Largest accepted single expense, in whole currency units.
    ///
    /// Settlement multiplies group totals by the participant count, so
    /// entries are capped far below the `Decimal` range.
    pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

    /// Creates an expense, rejecting negative and oversized amounts.
    pub fn new(amount: Amount, label: impl Into<String>) -> Result<Self, ValidationError> {
        Self::check_amount(amount)?;
        Ok(ExpenseEntry {
            amount,
            label: label.into().trim().to_string(),
        })
    }

    /// Parses and validates a raw amount string, as typed by a user.
    ///
    /// Only plain decimal notation is accepted; digit separators are not.
    pub fn parse(amount: &str, label: impl Into<String>) -> Result<Self, ValidationError> {
        let trimmed = amount.trim();
        let invalid = || ValidationError::InvalidAmount(trimmed.to_string());
        if trimmed.contains('_') {
            return Err(invalid());
        }
        let amount = Amount::from_str(trimmed).map_err(|_| invalid())?;
        Self::new(amount, label)
    }

    /// Checks the bounds every stored amount must satisfy.
    pub(crate) fn check_amount(amount: Amount) -> Result<(), ValidationError> {
        if amount.is_negative() {
            return Err(ValidationError::NegativeAmount(amount));
        }
        if amount.value() > Decimal::from(Self::MAX_AMOUNT) {
            return Err(ValidationError::AmountTooLarge(amount));
        }
        Ok(())
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Raw expense row as read from CSV.
///
/// Header is `name,amount,label`. `label` may be absent, and a row with a
/// name but no amount registers a participant who has paid nothing.
#[derive(Debug, Deserialize)]
pub struct ExpenseRecord {
    pub name: String,

    pub amount: Option<String>,

    pub label: Option<String>,
}

/// A validated row ready to be applied to a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedExpense {
    pub name: String,

    /// `None` when the row only registers the participant.
    pub entry: Option<ExpenseEntry>,
}

impl ExpenseRecord {
    /// Validates the raw row.
    pub fn parse(&self) -> Result<ParsedExpense, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let label = self.label.as_deref().unwrap_or_default();
        let entry = match self.amount.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(ExpenseEntry::parse(raw, label)?),
        };

        Ok(ParsedExpense {
            name: name.to_string(),
            entry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, amount: Option<&str>, label: Option<&str>) -> ExpenseRecord {
        ExpenseRecord {
            name: name.to_string(),
            amount: amount.map(str::to_string),
            label: label.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_expense_row() {
        let parsed = record("Alice", Some("10.5"), Some("groceries"))
            .parse()
            .unwrap();
        assert_eq!(parsed.name, "Alice");
        let entry = parsed.entry.unwrap();
        assert_eq!(entry.amount().to_string(), "10.50");
        assert_eq!(entry.label(), "groceries");
    }

    #[test]
    fn test_parse_handles_whitespace() {
        let parsed = record("  Bob  ", Some("  7.25 "), None).parse().unwrap();
        assert_eq!(parsed.name, "Bob");
        assert_eq!(parsed.entry.unwrap().amount().to_string(), "7.25");
    }

    #[test]
    fn test_parse_without_amount_registers_participant() {
        let parsed = record("Carol", None, None).parse().unwrap();
        assert!(parsed.entry.is_none());

        let parsed = record("Carol", Some("   "), None).parse().unwrap();
        assert!(parsed.entry.is_none());
    }

    #[test]
    fn test_parse_rejects_empty_name() {
        assert_eq!(
            record("   ", Some("1.0"), None).parse(),
            Err(ValidationError::EmptyName)
        );
    }

    #[test]
    fn test_parse_rejects_non_numeric_amount() {
        assert_eq!(
            record("Dan", Some("ten"), None).parse(),
            Err(ValidationError::InvalidAmount("ten".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_digit_separators() {
        assert_eq!(
            record("Dan", Some("1_000"), None).parse(),
            Err(ValidationError::InvalidAmount("1_000".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_oversized_amount() {
        let err = ExpenseEntry::parse("50000000000000000000000000000", "").unwrap_err();
        assert!(matches!(err, ValidationError::AmountTooLarge(_)));
        assert!(err.to_string().contains("exceeds the maximum"));

        assert!(ExpenseEntry::parse("1000000000000000", "").is_ok());
        assert!(matches!(
            ExpenseEntry::parse("1000000000000000.01", ""),
            Err(ValidationError::AmountTooLarge(_))
        ));
    }

    #[test]
    fn test_new_rejects_negative_amount() {
        let negative = Amount::from_str("-5").unwrap();
        assert_eq!(
            ExpenseEntry::new(negative, "refund"),
            Err(ValidationError::NegativeAmount(negative))
        );
    }

    #[test]
    fn test_zero_amount_is_accepted() {
        let entry = ExpenseEntry::parse("0", "").unwrap();
        assert!(entry.amount().is_zero());
    }
}
