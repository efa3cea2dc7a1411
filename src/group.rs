//! Participant and group model.
//!
//! A group is append-only: participants are added, expenses are appended to
//! them, and the only removal is a full reset.

use crate::amount::Amount;
use crate::error::ValidationError;
use crate::expense::ExpenseEntry;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;

/// A member of the group and the expenses they have paid for.
///
/// # Invariants
///
/// - `name` is non-empty and unique within its group
/// - `expenses` only ever grows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    name: String,

    #[serde(default)]
    expenses: Vec<ExpenseEntry>,
}

impl Participant {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expenses(&self) -> &[ExpenseEntry] {
        &self.expenses
    }

    /// Sum of every logged expense.
    pub fn total_paid(&self) -> Amount {
        self.expenses.iter().map(ExpenseEntry::amount).sum()
    }
}

/// The ordered set of participants. Order is insertion order and is
/// significant for settlement.
///
/// # Capacity
///
/// Settlement works on `total * participant count`. Every mutation checks
/// that this product stays representable and is rejected with
/// [`ValidationError::GroupTotalTooLarge`] otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Participant>")]
pub struct Group {
    participants: Vec<Participant>,

    /// Running sum of every expense.
    total: Amount,
}

impl Group {
    /// Creates an empty group.
    pub fn new() -> Self {
        Group::default()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Sum of every participant's expenses.
    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn get(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }

    /// Adds a participant, optionally with their first expense.
    ///
    /// The name is trimmed. Fails on an empty or already used name, or when
    /// the group would grow past its capacity.
    pub fn add_participant(
        &mut self,
        name: &str,
        first_expense: Option<ExpenseEntry>,
    ) -> Result<(), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.get(name).is_some() {
            return Err(ValidationError::DuplicateParticipant(name.to_string()));
        }

        let added = first_expense.as_ref().map_or(Amount::ZERO, ExpenseEntry::amount);
        let total = checked_capacity(self.total, added, self.participants.len() + 1)?;

        self.participants.push(Participant {
            name: name.to_string(),
            expenses: first_expense.into_iter().collect(),
        });
        self.total = total;
        Ok(())
    }

    /// Appends an expense to an existing participant.
    pub fn add_expense(&mut self, name: &str, entry: ExpenseEntry) -> Result<(), ValidationError> {
        let name = name.trim();
        let total = checked_capacity(self.total, entry.amount(), self.participants.len())?;
        let participant = self
            .participants
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| ValidationError::UnknownParticipant(name.to_string()))?;
        participant.expenses.push(entry);
        self.total = total;
        Ok(())
    }

    /// Appends an expense, creating the participant first if needed.
    ///
    /// Returns `true` if a new participant was created.
    pub fn record(&mut self, name: &str, entry: Option<ExpenseEntry>) -> Result<bool, ValidationError> {
        if self.get(name.trim()).is_some() {
            if let Some(entry) = entry {
                self.add_expense(name, entry)?;
            }
            return Ok(false);
        }
        self.add_participant(name, entry)?;
        Ok(true)
    }

    /// Removes every participant.
    pub fn reset(&mut self) {
        self.participants.clear();
        self.total = Amount::ZERO;
    }

    /// Re-checks the model invariants, e.g. on a snapshot read from storage.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::with_capacity(self.participants.len());
        for participant in &self.participants {
            if participant.name.trim().is_empty() {
                return Err(ValidationError::EmptyName);
            }
            if !seen.insert(participant.name.as_str()) {
                return Err(ValidationError::DuplicateParticipant(
                    participant.name.clone(),
                ));
            }
            for entry in &participant.expenses {
                ExpenseEntry::check_amount(entry.amount())?;
            }
        }
        checked_capacity(self.total, Amount::ZERO, self.participants.len())?;
        Ok(())
    }
}

/// Returns `total + added` if it, scaled by `count`, is still representable.
fn checked_capacity(total: Amount, added: Amount, count: usize) -> Result<Amount, ValidationError> {
    total
        .checked_add(added)
        .filter(|total| total.checked_scaled_by(count).is_some())
        .ok_or(ValidationError::GroupTotalTooLarge)
}

impl TryFrom<Vec<Participant>> for Group {
    type Error = ValidationError;

    fn try_from(participants: Vec<Participant>) -> Result<Self, Self::Error> {
        let mut total = Amount::ZERO;
        for entry in participants.iter().flat_map(|p| &p.expenses) {
            total = total
                .checked_add(entry.amount())
                .ok_or(ValidationError::GroupTotalTooLarge)?;
        }
        Ok(Group {
            participants,
            total,
        })
    }
}

impl Serialize for Group {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.participants.serialize(serializer)
    }
}
