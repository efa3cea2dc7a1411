//! # Fair Split
//!
//! Settles a group's shared expenses: given what each participant has paid,
//! computes the pairwise transfers that bring everyone to the group average.
//!
//! ## Design Principles
//!
//! - **Exact arithmetic**: Amounts are `rust_decimal` values, rounded to
//!   cents only for presentation
//! - **Pure settlement**: The engine reads a [`Group`] snapshot and never
//!   mutates it; results are recomputed from scratch on every change
//! - **Deterministic output**: Transfers follow participant order
//! - **Validation at the boundary**: Bad names and amounts are rejected
//!   before they enter the model
//!
//! ## Example
//!
//! ```
//! use fair_split::{compute_transfers, ExpenseEntry, Group};
//!
//! let mut group = Group::new();
//! group.add_participant("A", Some(ExpenseEntry::parse("300", "hotel").unwrap())).unwrap();
//! group.add_participant("B", None).unwrap();
//! group.add_participant("C", None).unwrap();
//!
//! let lines: Vec<String> = compute_transfers(&group).iter().map(|t| t.to_string()).collect();
//! assert_eq!(lines, ["B pays A 100.00", "C pays A 100.00"]);
//! ```

pub mod amount;
pub mod error;
pub mod expense;
pub mod group;
pub mod ledger;
pub mod settlement;
pub mod store;

pub use amount::Amount;
pub use error::{Result, SplitError, ValidationError};
pub use expense::{ExpenseEntry, ExpenseRecord, ParsedExpense};
pub use group::{Group, Participant};
pub use ledger::{write_report, Ledger};
pub use settlement::{
    classify, compute_contributions, compute_summary, compute_transfers, fair_share, group_total,
    settle, total_paid, Contribution, ContributionLine, Report, Summary, Transfer,
};
pub use store::{GroupStore, JsonFileStore, MemoryStore};

/// Command line usage, shown on argument errors.
pub const USAGE: &str = "Usage: fair-split <expenses.csv> | \
    fair-split add <store.json> <name> [amount] [label] | \
    fair-split show <store.json> | \
    fair-split reset <store.json>";
