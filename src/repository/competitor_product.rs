use diesel::prelude::*;

use crate::domain::checklist::ChecklistCategory;
use crate::domain::competitor_product::{CompetitorProduct, NewCompetitorProduct};
use crate::models::competitor_product::{
    CompetitorProduct as DbCompetitorProduct, NewCompetitorProduct as DbNewCompetitorProduct,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::order::checklist_has_category;
use crate::repository::{CompetitorProductWriter, DieselRepository};

impl CompetitorProductWriter for DieselRepository {
    fn create_competitor_product(
        &self,
        new_product: &NewCompetitorProduct,
    ) -> RepositoryResult<CompetitorProduct> {
        use crate::schema::{competitor_products, visits};

        let mut conn = self.conn()?;
        conn.transaction::<CompetitorProduct, RepositoryError, _>(|conn| {
            let exists: i64 = visits::table
                .find(new_product.visit_id)
                .count()
                .get_result(conn)?;
            if exists == 0 {
                return Err(RepositoryError::NotFound);
            }
            if !checklist_has_category(
                conn,
                new_product.visit_id,
                ChecklistCategory::CompetitorProduct,
            )? {
                return Err(RepositoryError::PreconditionFailed(
                    "visit has no CompetitorProduct checklist item".to_string(),
                ));
            }

            let row = diesel::insert_into(competitor_products::table)
                .values(DbNewCompetitorProduct::from(new_product))
                .get_result::<DbCompetitorProduct>(conn)?;
            Ok(row.into())
        })
    }
}
