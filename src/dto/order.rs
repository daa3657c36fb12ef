use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::order::{NewOrder, NewOrderLine, Order, OrderLine};
use crate::domain::types::{Money, TypeConstraintError};

#[derive(Deserialize, Validate)]
/// Payload for attaching an order to a visit.
pub struct CreateOrderRequest {
    #[validate(length(min = 1))]
    pub order_ref: String,
    #[validate(length(min = 1))]
    pub lines: Vec<OrderLineRequest>,
}

#[derive(Deserialize, Serialize)]
pub struct OrderLineRequest {
    pub article_ref: String,
    pub quantity: i32,
    pub unit_price: Money,
}

impl CreateOrderRequest {
    pub fn into_domain(self, visit_id: i32) -> Result<NewOrder, TypeConstraintError> {
        let lines = self
            .lines
            .into_iter()
            .map(|line| NewOrderLine {
                article_ref: line.article_ref,
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();
        NewOrder::new(visit_id, self.order_ref, lines)
    }
}

#[derive(Serialize)]
pub struct OrderLineResponse {
    pub id: i32,
    pub article_ref: String,
    pub quantity: i32,
    pub unit_price: Money,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            id: line.id,
            article_ref: line.article_ref,
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: i32,
    pub visit_id: i32,
    pub order_ref: String,
    pub total_amount: Money,
    pub order_date: NaiveDateTime,
    pub lines: Vec<OrderLineResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            visit_id: order.visit_id,
            order_ref: order.order_ref,
            total_amount: order.total_amount,
            order_date: order.order_date,
            lines: order.lines.into_iter().map(Into::into).collect(),
        }
    }
}
