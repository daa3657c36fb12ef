//! Repository implementation for the recovery ledger.
//!
//! `apply_collection` is the write path of the reconciliation engine: the
//! checklist update, the ledger append and the visit status refresh commit
//! together or not at all.

use std::collections::HashMap;

use chrono::{NaiveDateTime, Utc};
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Nullable};

use crate::domain::checklist::{ChecklistCategory, ChecklistDetail, ChecklistItem};
use crate::domain::recovery::{self, CollectionReport, RecoveryEntry, RecoveryReportRow};
use crate::domain::types::Money;
use crate::domain::visit::Visit;
use crate::models::checklist::Checklist as DbChecklist;
use crate::models::directory::Tiers as DbTiers;
use crate::models::recovery::{NewRecovery as DbNewRecovery, Recovery as DbRecovery};
use crate::models::visit::Visit as DbVisit;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::visit::refresh_visit_status;
use crate::repository::{DieselRepository, RecoveryReader, RecoveryWriter};

/// Applies one collection event to the given Recovery checklist row.
///
/// Must run inside a transaction; every check happens before any write so a
/// rejected collection leaves no trace.
fn collect_against_item(
    conn: &mut SqliteConnection,
    row: DbChecklist,
    amount: Money,
    notes: Option<&str>,
) -> Result<CollectionReport, RepositoryError> {
    use crate::schema::{recoveries, visit_checklists};

    let item = ChecklistItem::try_from(row).map_err(RepositoryError::from)?;
    let ChecklistDetail::Recovery {
        expected,
        remaining,
    } = item.detail
    else {
        return Err(RepositoryError::ValidationError(
            "checklist item is not a Recovery objective".to_string(),
        ));
    };

    let outcome = recovery::apply_collection(expected, remaining, amount)
        .map_err(|e| RepositoryError::ValidationError(e.to_string()))?;

    // Optimistic version check: a concurrent collection that committed first
    // leaves no matching row and the whole transaction rolls back.
    let affected = diesel::update(
        visit_checklists::table
            .find(item.id)
            .filter(visit_checklists::version.eq(item.version)),
    )
    .set((
        visit_checklists::remaining_amount.eq(Some(outcome.new_remaining.minor())),
        visit_checklists::is_completed.eq(outcome.completed),
        visit_checklists::version.eq(item.version + 1),
    ))
    .execute(conn)?;
    if affected == 0 {
        return Err(RepositoryError::ConcurrencyConflict);
    }

    let prior: Option<i64> = recoveries::table
        .filter(recoveries::visit_id.eq(item.visit_id))
        .select(sql::<Nullable<BigInt>>("SUM(amount_collected)"))
        .first(conn)?;
    let total_collected = Money::from_minor(prior.unwrap_or(0))
        .checked_add(amount)
        .ok_or_else(|| RepositoryError::Unexpected("collected total overflows".to_string()))?;

    let now = Utc::now().naive_utc();
    let note = match notes {
        Some(notes) => notes.to_string(),
        None => recovery::auto_note(amount, total_collected, outcome.new_remaining, now),
    };

    let db_entry = diesel::insert_into(recoveries::table)
        .values(DbNewRecovery {
            visit_id: item.visit_id,
            amount_collected: amount.minor(),
            collection_date: now,
            notes: &note,
        })
        .get_result::<DbRecovery>(conn)?;

    refresh_visit_status(conn, item.visit_id)?;

    Ok(CollectionReport {
        entry: db_entry.into(),
        expected_amount: expected,
        remaining_amount: outcome.new_remaining,
        total_collected,
    })
}

impl RecoveryWriter for DieselRepository {
    fn apply_collection(
        &self,
        visit_id: i32,
        amount: Money,
        notes: Option<&str>,
    ) -> RepositoryResult<CollectionReport> {
        use crate::schema::{visit_checklists, visits};

        let mut conn = self.conn()?;
        conn.transaction::<CollectionReport, RepositoryError, _>(|conn| {
            let exists: i64 = visits::table.find(visit_id).count().get_result(conn)?;
            if exists == 0 {
                return Err(RepositoryError::NotFound);
            }

            let mut rows = visit_checklists::table
                .filter(visit_checklists::visit_id.eq(visit_id))
                .filter(
                    visit_checklists::category.eq(ChecklistCategory::Recovery.to_string()),
                )
                .load::<DbChecklist>(conn)?;

            let row = match rows.len() {
                0 => return Err(RepositoryError::NotFound),
                1 => rows.remove(0),
                _ => {
                    return Err(RepositoryError::PreconditionFailed(
                        "visit has more than one Recovery checklist item".to_string(),
                    ));
                }
            };

            collect_against_item(conn, row, amount, notes)
        })
    }

    fn apply_collection_by_checklist(
        &self,
        checklist_id: i32,
        amount: Money,
    ) -> RepositoryResult<CollectionReport> {
        use crate::schema::visit_checklists;

        let mut conn = self.conn()?;
        conn.transaction::<CollectionReport, RepositoryError, _>(|conn| {
            let row = visit_checklists::table
                .find(checklist_id)
                .first::<DbChecklist>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            collect_against_item(conn, row, amount, None)
        })
    }
}

impl RecoveryReader for DieselRepository {
    fn get_recovery_by_id(&self, id: i32) -> RepositoryResult<Option<RecoveryEntry>> {
        use crate::schema::recoveries;

        let mut conn = self.conn()?;
        let row = recoveries::table
            .find(id)
            .first::<DbRecovery>(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn running_total(&self, visit_id: i32) -> RepositoryResult<Money> {
        use crate::schema::recoveries;

        let mut conn = self.conn()?;
        let total: Option<i64> = recoveries::table
            .filter(recoveries::visit_id.eq(visit_id))
            .select(sql::<Nullable<BigInt>>("SUM(amount_collected)"))
            .first(&mut conn)?;
        Ok(Money::from_minor(total.unwrap_or(0)))
    }

    fn latest_entry(&self, visit_id: i32) -> RepositoryResult<Option<RecoveryEntry>> {
        use crate::schema::recoveries;

        let mut conn = self.conn()?;
        let row = recoveries::table
            .filter(recoveries::visit_id.eq(visit_id))
            .order(recoveries::collection_date.desc())
            .first::<DbRecovery>(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn list_recoveries_by_commercial(&self, cref: &str) -> RepositoryResult<Vec<RecoveryEntry>> {
        use crate::schema::{recoveries, visits};

        let mut conn = self.conn()?;
        let rows = recoveries::table
            .inner_join(visits::table)
            .filter(visits::commercial_cref.eq(cref))
            .order(recoveries::collection_date.desc())
            .select(recoveries::all_columns)
            .load::<DbRecovery>(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn recovery_report(&self, cref: &str) -> RepositoryResult<Vec<RecoveryReportRow>> {
        use crate::schema::{recoveries, tiers, visit_checklists, visits};

        let mut conn = self.conn()?;

        let rows: Vec<(DbChecklist, (DbVisit, DbTiers))> = visit_checklists::table
            .inner_join(visits::table.inner_join(tiers::table))
            .filter(visits::commercial_cref.eq(cref))
            .filter(visit_checklists::category.eq(ChecklistCategory::Recovery.to_string()))
            .order(visit_checklists::id.asc())
            .load(&mut conn)?;

        let visit_ids: Vec<i32> = rows.iter().map(|(_, (visit, _))| visit.id).collect();
        let ledger = recoveries::table
            .filter(recoveries::visit_id.eq_any(&visit_ids))
            .load::<DbRecovery>(&mut conn)?;

        // (total collected, last collection date) per visit.
        let mut aggregates: HashMap<i32, (i64, NaiveDateTime)> = HashMap::new();
        for entry in ledger {
            aggregates
                .entry(entry.visit_id)
                .and_modify(|(total, last)| {
                    *total += entry.amount_collected;
                    *last = (*last).max(entry.collection_date);
                })
                .or_insert((entry.amount_collected, entry.collection_date));
        }

        rows.into_iter()
            .map(|(checklist, (db_visit, db_tiers))| {
                let item = ChecklistItem::try_from(checklist).map_err(RepositoryError::from)?;
                let visit = Visit::try_from(db_visit).map_err(RepositoryError::from)?;
                let ChecklistDetail::Recovery {
                    expected,
                    remaining,
                } = item.detail
                else {
                    return Err(RepositoryError::Unexpected(
                        "non-Recovery row in recovery report".to_string(),
                    ));
                };
                let (collected, last_collection_date) = aggregates
                    .get(&visit.id)
                    .map(|(total, last)| (Money::from_minor(*total), Some(*last)))
                    .unwrap_or((Money::ZERO, None));

                Ok(RecoveryReportRow::build(
                    visit.id,
                    item.id,
                    db_tiers.name,
                    visit.commercial_cref,
                    expected,
                    remaining,
                    collected,
                    visit.status,
                    last_collection_date,
                ))
            })
            .collect()
    }
}
