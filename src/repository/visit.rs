//! Repository implementation for visits and their lifecycle status.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::checklist::ChecklistItem;
use crate::domain::visit::{NewVisit, Visit, VisitStatus, resolve_status};
use crate::models::checklist::{Checklist as DbChecklist, NewChecklist as DbNewChecklist};
use crate::models::visit::{NewVisit as DbNewVisit, Visit as DbVisit};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, VisitReader, VisitWriter};

/// Re-derives and persists the visit's status from its current checklist.
///
/// Cancelled is terminal: the resolver is short-circuited before recompute so
/// no later mutation can move a visit out of that state. Runs on the caller's
/// connection so it participates in the surrounding transaction.
pub(crate) fn refresh_visit_status(
    conn: &mut SqliteConnection,
    visit_id: i32,
) -> Result<VisitStatus, RepositoryError> {
    use crate::schema::{visit_checklists, visits};

    let status: String = visits::table
        .find(visit_id)
        .select(visits::status)
        .first(conn)?;
    let current: VisitStatus = status.parse().map_err(RepositoryError::from)?;
    if current == VisitStatus::Cancelled {
        return Ok(VisitStatus::Cancelled);
    }

    let rows = visit_checklists::table
        .filter(visit_checklists::visit_id.eq(visit_id))
        .load::<DbChecklist>(conn)?;
    let items = rows
        .into_iter()
        .map(ChecklistItem::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(RepositoryError::from)?;

    let resolved = resolve_status(&items);
    if resolved != current {
        diesel::update(visits::table.find(visit_id))
            .set(visits::status.eq(resolved.to_string()))
            .execute(conn)?;
    }
    Ok(resolved)
}

impl VisitReader for DieselRepository {
    fn get_visit_by_id(&self, id: i32) -> RepositoryResult<Option<Visit>> {
        use crate::schema::visits;

        let mut conn = self.conn()?;
        let db_visit = visits::table
            .find(id)
            .first::<DbVisit>(&mut conn)
            .optional()?;

        match db_visit {
            Some(db_visit) => Ok(Some(
                Visit::try_from(db_visit).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn visit_exists(&self, id: i32) -> RepositoryResult<bool> {
        use crate::schema::visits;

        let mut conn = self.conn()?;
        let count: i64 = visits::table
            .find(id)
            .count()
            .get_result(&mut conn)?;
        Ok(count > 0)
    }

    fn list_visits_by_commercial(&self, cref: &str) -> RepositoryResult<Vec<Visit>> {
        use crate::schema::visits;

        let mut conn = self.conn()?;
        visits::table
            .filter(visits::commercial_cref.eq(cref))
            .order(visits::visit_date.asc())
            .load::<DbVisit>(&mut conn)?
            .into_iter()
            .map(|db_visit| Visit::try_from(db_visit).map_err(RepositoryError::from))
            .collect()
    }

    fn list_upcoming_visits(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> RepositoryResult<Vec<Visit>> {
        use crate::schema::visits;

        let mut conn = self.conn()?;
        visits::table
            .filter(visits::visit_date.gt(from))
            .filter(visits::visit_date.le(to))
            .filter(visits::status.ne(VisitStatus::Cancelled.to_string()))
            .order(visits::visit_date.asc())
            .load::<DbVisit>(&mut conn)?
            .into_iter()
            .map(|db_visit| Visit::try_from(db_visit).map_err(RepositoryError::from))
            .collect()
    }
}

impl VisitWriter for DieselRepository {
    fn create_visit(&self, new_visit: &NewVisit) -> RepositoryResult<Visit> {
        use crate::schema::{visit_checklists, visits};

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        conn.transaction::<Visit, RepositoryError, _>(|conn| {
            let db_visit = diesel::insert_into(visits::table)
                .values(DbNewVisit::from_domain(new_visit, now))
                .get_result::<DbVisit>(conn)?;

            let rows: Vec<DbNewChecklist> = new_visit
                .checklist
                .iter()
                .map(|item| DbNewChecklist::from_domain(db_visit.id, item))
                .collect();
            diesel::insert_into(visit_checklists::table)
                .values(&rows)
                .execute(conn)?;

            Visit::try_from(db_visit).map_err(RepositoryError::from)
        })
    }

    fn cancel_visit(&self, visit_id: i32) -> RepositoryResult<()> {
        use crate::schema::visits;

        let mut conn = self.conn()?;
        let affected = diesel::update(visits::table.find(visit_id))
            .set(visits::status.eq(VisitStatus::Cancelled.to_string()))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
