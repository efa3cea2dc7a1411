//! Error types for expense settlement.

use crate::amount::Amount;
use thiserror::Error;

/// Result type alias for fallible operations at the I/O boundary.
pub type Result<T> = std::result::Result<T, SplitError>;

/// Input rejected before it reaches the group model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("participant name must not be empty")]
    EmptyName,

    #[error("amount {0:?} is not a number")]
    InvalidAmount(String),

    #[error("amount {0} must not be negative")]
    NegativeAmount(Amount),

    #[error(
        "amount {} exceeds the maximum of {}",
        .0.value(),
        crate::expense::ExpenseEntry::MAX_AMOUNT
    )]
    AmountTooLarge(Amount),

    #[error("group total is too large to settle")]
    GroupTotalTooLarge,

    #[error("participant {0:?} already exists")]
    DuplicateParticipant(String),

    #[error("unknown participant {0:?}")]
    UnknownParticipant(String),
}

/// Errors that can occur while reading, storing, or reporting a group.
#[derive(Error, Debug)]
pub enum SplitError {
    /// Failed to open, read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Stored snapshot could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rejected participant or expense
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Missing command line argument
    #[error("Missing argument. {}", crate::USAGE)]
    MissingArgument,

    /// Unrecognised subcommand
    #[error("Unknown command {0:?}. {}", crate::USAGE)]
    UnknownCommand(String),
}
