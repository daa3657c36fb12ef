use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::recovery::{CollectionReport, RecoveryEntry};
use crate::domain::types::Money;

#[derive(Deserialize)]
/// Payload for recording a collection event against a visit.
pub struct CreateRecoveryRequest {
    pub amount_collected: Money,
    /// Free-form note; a summary of the running totals is generated when
    /// omitted.
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct ReportQuery {
    pub commercial_cref: String,
}

#[derive(Serialize)]
pub struct RecoveryResponse {
    pub id: i32,
    pub visit_id: i32,
    pub amount_collected: Money,
    pub collection_date: NaiveDateTime,
    pub notes: String,
}

impl From<RecoveryEntry> for RecoveryResponse {
    fn from(entry: RecoveryEntry) -> Self {
        Self {
            id: entry.id,
            visit_id: entry.visit_id,
            amount_collected: entry.amount_collected,
            collection_date: entry.collection_date,
            notes: entry.notes,
        }
    }
}

#[derive(Serialize)]
/// Response for a collection event: the ledger entry plus the reconciliation
/// state it produced.
pub struct CollectionResponse {
    pub id: i32,
    pub visit_id: i32,
    pub amount_collected: Money,
    pub collection_date: NaiveDateTime,
    pub notes: String,
    pub expected_amount: Money,
    pub remaining_amount: Money,
    pub total_collected: Money,
}

impl From<CollectionReport> for CollectionResponse {
    fn from(report: CollectionReport) -> Self {
        Self {
            id: report.entry.id,
            visit_id: report.entry.visit_id,
            amount_collected: report.entry.amount_collected,
            collection_date: report.entry.collection_date,
            notes: report.entry.notes,
            expected_amount: report.expected_amount,
            remaining_amount: report.remaining_amount,
            total_collected: report.total_collected,
        }
    }
}
