//! Recovery ledger entries and the partial-collection arithmetic.
//!
//! The ledger is append-only: each accepted collection event adds an entry
//! and decreases the owning checklist item's remaining amount. The functions
//! here are pure; persistence and atomicity live in the repository layer.

use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

use crate::domain::types::Money;
use crate::domain::visit::VisitStatus;

/// One partial-collection event recorded against a visit.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RecoveryEntry {
    pub id: i32,
    pub visit_id: i32,
    pub amount_collected: Money,
    pub collection_date: NaiveDateTime,
    pub notes: String,
}

/// Rejection reasons for a collection event. No state is touched when one of
/// these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CollectionError {
    #[error("collected amount cannot be negative")]
    NegativeAmount,
    #[error("collected amount exceeds remaining recovery amount ({remaining})")]
    ExceedsRemaining { remaining: Money },
}

/// Result of applying one collection event to a Recovery checklist item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollectionOutcome {
    pub new_remaining: Money,
    pub completed: bool,
}

/// Applies a collection of `amount` against a Recovery item.
///
/// The remaining amount is lazily initialized from `expected` on the first
/// collection. A zero amount is accepted and still counts as an event. The
/// invariant `0 <= remaining <= expected` holds for every accepted call.
pub fn apply_collection(
    expected: Money,
    remaining: Option<Money>,
    amount: Money,
) -> Result<CollectionOutcome, CollectionError> {
    if amount.is_negative() {
        return Err(CollectionError::NegativeAmount);
    }

    let baseline = remaining.unwrap_or(expected);
    if amount > baseline {
        return Err(CollectionError::ExceedsRemaining {
            remaining: baseline,
        });
    }

    // amount <= baseline and both are non-negative, so this is exact.
    let new_remaining = baseline.saturating_sub(amount);
    Ok(CollectionOutcome {
        new_remaining,
        completed: new_remaining <= Money::ZERO,
    })
}

/// Default ledger note summarizing the running totals after a collection.
pub fn auto_note(
    amount: Money,
    total_collected: Money,
    remaining: Money,
    at: NaiveDateTime,
) -> String {
    format!("Collected {amount} on {at}. Total collected: {total_collected}. Remaining: {remaining}")
}

/// Aggregated view of a collection event, combining the ledger entry with
/// the checklist item's state after the event.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CollectionReport {
    pub entry: RecoveryEntry,
    pub expected_amount: Money,
    pub remaining_amount: Money,
    pub total_collected: Money,
}

/// One row of the per-commercial recovery report.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RecoveryReportRow {
    pub visit_id: i32,
    pub checklist_id: i32,
    pub client_name: String,
    pub commercial_cref: String,
    pub expected_amount: Money,
    pub remaining_amount: Money,
    pub collected_amount: Money,
    pub visit_status: VisitStatus,
    pub last_collection_date: Option<NaiveDateTime>,
}

impl RecoveryReportRow {
    /// Builds a report row, falling back to `expected - collected` when the
    /// item was never collected against and clamping negative remainders to
    /// zero for display.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        visit_id: i32,
        checklist_id: i32,
        client_name: String,
        commercial_cref: String,
        expected: Money,
        remaining: Option<Money>,
        collected: Money,
        visit_status: VisitStatus,
        last_collection_date: Option<NaiveDateTime>,
    ) -> Self {
        let remaining = remaining
            .unwrap_or_else(|| expected.saturating_sub(collected))
            .clamp_to_zero();
        Self {
            visit_id,
            checklist_id,
            client_name,
            commercial_cref,
            expected_amount: expected,
            remaining_amount: remaining,
            collected_amount: collected,
            visit_status,
            last_collection_date,
        }
    }
}
