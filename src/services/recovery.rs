use crate::domain::recovery::{CollectionReport, RecoveryEntry, RecoveryReportRow};
use crate::domain::types::Money;
use crate::repository::{RecoveryReader, RecoveryWriter, VisitReader};
use crate::services::{ServiceError, ServiceResult};

/// Records a partial or full collection against the visit's Recovery
/// objective. Negative amounts, unknown visits and over-collection are
/// rejected before any state changes; completion of the objective may flip
/// the visit status.
pub fn record_collection<R>(
    repo: &R,
    visit_id: i32,
    amount: Money,
    notes: Option<&str>,
) -> ServiceResult<CollectionReport>
where
    R: VisitReader + RecoveryWriter + ?Sized,
{
    if amount.is_negative() {
        return Err(ServiceError::Validation(
            "collected amount cannot be negative".to_string(),
        ));
    }
    if !repo.visit_exists(visit_id)? {
        return Err(ServiceError::NotFound);
    }
    repo.apply_collection(visit_id, amount, notes)
        .map_err(ServiceError::from)
}

/// Same as [`record_collection`], addressed by the checklist item id.
pub fn record_collection_for_checklist<R>(
    repo: &R,
    checklist_id: i32,
    amount: Money,
) -> ServiceResult<CollectionReport>
where
    R: RecoveryWriter + ?Sized,
{
    if amount.is_negative() {
        return Err(ServiceError::Validation(
            "collected amount cannot be negative".to_string(),
        ));
    }
    repo.apply_collection_by_checklist(checklist_id, amount)
        .map_err(ServiceError::from)
}

pub fn get_recovery<R>(repo: &R, recovery_id: i32) -> ServiceResult<RecoveryEntry>
where
    R: RecoveryReader + ?Sized,
{
    repo.get_recovery_by_id(recovery_id)?
        .ok_or(ServiceError::NotFound)
}

/// Ledger entries across all visits of a commercial, most recent first.
pub fn list_collections_by_commercial<R>(repo: &R, cref: &str) -> ServiceResult<Vec<RecoveryEntry>>
where
    R: RecoveryReader + ?Sized,
{
    repo.list_recoveries_by_commercial(cref)
        .map_err(ServiceError::from)
}

/// Builds the per-commercial reconciliation report: one row per Recovery
/// objective with expected, collected and remaining amounts.
pub fn build_recovery_report<R>(repo: &R, cref: &str) -> ServiceResult<Vec<RecoveryReportRow>>
where
    R: RecoveryReader + ?Sized,
{
    repo.recovery_report(cref).map_err(ServiceError::from)
}
