//! Repository implementation for visit checklist items.

use diesel::prelude::*;

use crate::domain::checklist::ChecklistItem;
use crate::models::checklist::Checklist as DbChecklist;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::visit::refresh_visit_status;
use crate::repository::{ChecklistReader, ChecklistWriter, DieselRepository};

impl ChecklistReader for DieselRepository {
    fn get_checklist_by_id(&self, id: i32) -> RepositoryResult<Option<ChecklistItem>> {
        use crate::schema::visit_checklists;

        let mut conn = self.conn()?;
        let row = visit_checklists::table
            .find(id)
            .first::<DbChecklist>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(Some(
                ChecklistItem::try_from(row).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_checklist_by_visit(&self, visit_id: i32) -> RepositoryResult<Vec<ChecklistItem>> {
        use crate::schema::visit_checklists;

        let mut conn = self.conn()?;
        visit_checklists::table
            .filter(visit_checklists::visit_id.eq(visit_id))
            .order(visit_checklists::id.asc())
            .load::<DbChecklist>(&mut conn)?
            .into_iter()
            .map(|row| ChecklistItem::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl ChecklistWriter for DieselRepository {
    fn set_checklist_completion(
        &self,
        checklist_id: i32,
        completed: bool,
    ) -> RepositoryResult<ChecklistItem> {
        use crate::schema::visit_checklists;

        let mut conn = self.conn()?;
        conn.transaction::<ChecklistItem, RepositoryError, _>(|conn| {
            let row = visit_checklists::table
                .find(checklist_id)
                .first::<DbChecklist>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            // Direct override of the completion flag; recovery amounts are
            // only mutated by collection events.
            let affected = diesel::update(
                visit_checklists::table
                    .find(checklist_id)
                    .filter(visit_checklists::version.eq(row.version)),
            )
            .set((
                visit_checklists::is_completed.eq(completed),
                visit_checklists::version.eq(row.version + 1),
            ))
            .execute(conn)?;
            if affected == 0 {
                return Err(RepositoryError::ConcurrencyConflict);
            }

            refresh_visit_status(conn, row.visit_id)?;

            let updated = visit_checklists::table
                .find(checklist_id)
                .first::<DbChecklist>(conn)?;
            ChecklistItem::try_from(updated).map_err(RepositoryError::from)
        })
    }
}
