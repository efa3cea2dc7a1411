//! Settlement of a group's expenses into pairwise transfers.
//!
//! Every function here is a pure read of a [`Group`] snapshot and is
//! recomputed from scratch on each call.
//!
//! # Exactness
//!
//! The fair share `total / n` is often not a finite decimal. Classification
//! and the solver therefore compare `paid * n` against `total`, which is
//! exact, and only divide by `n` when a transfer is emitted.

use crate::amount::Amount;
use crate::group::{Group, Participant};
use log::debug;
use std::fmt;

/// A participant's paid total next to the group's fair share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub name: String,
    pub paid: Amount,
    pub fair_share: Amount,
}

/// A directed payment instruction: `from` owes `to` the given amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub from: String,
    pub to: String,
    pub amount: Amount,
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} {}", self.from, self.to, self.amount)
    }
}

/// Group total and the average contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: Amount,
    pub average: Amount,
}

/// Per-participant balance. A positive `delta` is owed to the participant,
/// a negative one is owed by them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionLine {
    pub name: String,
    pub paid: Amount,
    pub delta: Amount,
}

/// Everything a presentation layer needs, computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub summary: Summary,
    pub contributions: Vec<ContributionLine>,
    pub transfers: Vec<Transfer>,
}

impl Report {
    pub fn from_group(group: &Group) -> Self {
        Report {
            summary: compute_summary(group),
            contributions: compute_contributions(group),
            transfers: compute_transfers(group),
        }
    }
}

pub fn total_paid(participant: &Participant) -> Amount {
    participant.total_paid()
}

pub fn group_total(group: &Group) -> Amount {
    group.total()
}

/// Group total divided by participant count, or zero for an empty group.
pub fn fair_share(group: &Group) -> Amount {
    group_total(group).divided_by(group.len())
}

/// Splits the group into payers (paid above fair share) and receivers
/// (paid below it), each in group order. Participants exactly at the fair
/// share are in neither list.
pub fn classify(group: &Group) -> (Vec<Contribution>, Vec<Contribution>) {
    let count = group.len();
    let total = group_total(group);
    let fair_share = total.divided_by(count);

    let mut payers = Vec::new();
    let mut receivers = Vec::new();
    for participant in group.participants() {
        let paid = participant.total_paid();
        let contribution = Contribution {
            name: participant.name().to_string(),
            paid,
            fair_share,
        };

        let deviation = paid.scaled_by(count) - total;
        if deviation.is_positive() {
            payers.push(contribution);
        } else if deviation.is_negative() {
            receivers.push(contribution);
        }
    }

    (payers, receivers)
}

/// Greedily matches payers against receivers in group order.
///
/// Each payer's excess is handed out to receivers in order until it is
/// exhausted. The result depends on participant order and is not a minimal
/// transfer count, but it never has more than `payers + receivers - 1`
/// entries. Amounts are unrounded; see [`compute_transfers`].
pub fn settle(group: &Group) -> Vec<Transfer> {
    let count = group.len();
    let total = group_total(group);
    let (payers, receivers) = classify(group);

    // Deviations scaled by `count` so that no division happens in the loop.
    let mut receivers: Vec<(Contribution, Amount)> = receivers
        .into_iter()
        .map(|receiver| {
            let deficit = total - receiver.paid.scaled_by(count);
            (receiver, deficit)
        })
        .collect();

    let mut transfers = Vec::new();
    for payer in &payers {
        let mut excess = payer.paid.scaled_by(count) - total;

        for (receiver, deficit) in receivers.iter_mut() {
            if !excess.is_positive() || !deficit.is_positive() {
                continue;
            }

            let scaled = excess.min(*deficit);
            excess -= scaled;
            *deficit -= scaled;

            let amount = scaled.divided_by(count);
            if !amount.is_positive() {
                continue;
            }

            let transfer = Transfer {
                from: receiver.name.clone(),
                to: payer.name.clone(),
                amount,
            };
            debug!("Settlement: {}", transfer);
            transfers.push(transfer);
        }
    }

    transfers
}

pub fn compute_summary(group: &Group) -> Summary {
    Summary {
        total: group_total(group),
        average: fair_share(group),
    }
}

/// Paid totals and deviation from the average, in group order.
pub fn compute_contributions(group: &Group) -> Vec<ContributionLine> {
    let average = fair_share(group);
    group
        .participants()
        .iter()
        .map(|participant| {
            let paid = participant.total_paid();
            ContributionLine {
                name: participant.name().to_string(),
                paid,
                delta: paid - average,
            }
        })
        .collect()
}

/// [`settle`] with every amount rounded to cents.
pub fn compute_transfers(group: &Group) -> Vec<Transfer> {
    settle(group)
        .into_iter()
        .map(|transfer| Transfer {
            amount: transfer.amount.round_cents(),
            ..transfer
        })
        .collect()
}
