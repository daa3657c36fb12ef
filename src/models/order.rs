use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{Order as DomainOrder, OrderLine as DomainOrderLine};
use crate::domain::types::Money;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
/// Diesel model for [`crate::domain::order::Order`] (lines loaded separately).
pub struct Order {
    pub id: i32,
    pub visit_id: i32,
    pub order_ref: String,
    pub total_amount: i64,
    pub order_date: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub visit_id: i32,
    pub order_ref: &'a str,
    pub total_amount: i64,
    pub order_date: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::order_lines)]
#[diesel(belongs_to(Order, foreign_key = order_id))]
pub struct OrderLine {
    pub id: i32,
    pub order_id: i32,
    pub article_ref: String,
    pub quantity: i32,
    pub unit_price: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::order_lines)]
pub struct NewOrderLine<'a> {
    pub order_id: i32,
    pub article_ref: &'a str,
    pub quantity: i32,
    pub unit_price: i64,
}

impl Order {
    pub fn into_domain(self, lines: Vec<OrderLine>) -> DomainOrder {
        DomainOrder {
            id: self.id,
            visit_id: self.visit_id,
            order_ref: self.order_ref,
            total_amount: Money::from_minor(self.total_amount),
            order_date: self.order_date,
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<OrderLine> for DomainOrderLine {
    fn from(row: OrderLine) -> Self {
        Self {
            id: row.id,
            order_id: row.order_id,
            article_ref: row.article_ref,
            quantity: row.quantity,
            unit_price: Money::from_minor(row.unit_price),
        }
    }
}
