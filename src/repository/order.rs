use chrono::Utc;
use diesel::prelude::*;

use crate::domain::checklist::ChecklistCategory;
use crate::domain::order::{NewOrder, Order};
use crate::models::order::{
    NewOrder as DbNewOrder, NewOrderLine as DbNewOrderLine, Order as DbOrder,
    OrderLine as DbOrderLine,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, OrderReader, OrderWriter};

pub(crate) fn checklist_has_category(
    conn: &mut SqliteConnection,
    visit_id: i32,
    category: ChecklistCategory,
) -> Result<bool, RepositoryError> {
    use crate::schema::visit_checklists;

    let count: i64 = visit_checklists::table
        .filter(visit_checklists::visit_id.eq(visit_id))
        .filter(visit_checklists::category.eq(category.to_string()))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>> {
        use crate::schema::{order_lines, orders};

        let mut conn = self.conn()?;
        let Some(order) = orders::table
            .find(id)
            .first::<DbOrder>(&mut conn)
            .optional()?
        else {
            return Ok(None);
        };
        let lines = order_lines::table
            .filter(order_lines::order_id.eq(order.id))
            .order(order_lines::id.asc())
            .load::<DbOrderLine>(&mut conn)?;
        Ok(Some(order.into_domain(lines)))
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order> {
        use crate::schema::{order_lines, orders, visits};

        let mut conn = self.conn()?;
        conn.transaction::<Order, RepositoryError, _>(|conn| {
            let exists: i64 = visits::table
                .find(new_order.visit_id)
                .count()
                .get_result(conn)?;
            if exists == 0 {
                return Err(RepositoryError::NotFound);
            }
            if !checklist_has_category(conn, new_order.visit_id, ChecklistCategory::PlaceOrder)? {
                return Err(RepositoryError::PreconditionFailed(
                    "visit has no PlaceOrder checklist item".to_string(),
                ));
            }

            let order = diesel::insert_into(orders::table)
                .values(DbNewOrder {
                    visit_id: new_order.visit_id,
                    order_ref: &new_order.order_ref,
                    total_amount: new_order.total.minor(),
                    order_date: Utc::now().naive_utc(),
                })
                .get_result::<DbOrder>(conn)?;

            let line_rows: Vec<DbNewOrderLine> = new_order
                .lines
                .iter()
                .map(|line| DbNewOrderLine {
                    order_id: order.id,
                    article_ref: &line.article_ref,
                    quantity: line.quantity,
                    unit_price: line.unit_price.minor(),
                })
                .collect();
            diesel::insert_into(order_lines::table)
                .values(&line_rows)
                .execute(conn)?;

            let lines = order_lines::table
                .filter(order_lines::order_id.eq(order.id))
                .order(order_lines::id.asc())
                .load::<DbOrderLine>(conn)?;
            Ok(order.into_domain(lines))
        })
    }
}
