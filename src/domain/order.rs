//! Orders attached to a visit through the PlaceOrder objective.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{Money, TypeConstraintError};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct OrderLine {
    pub id: i32,
    pub order_id: i32,
    pub article_ref: String,
    pub quantity: i32,
    pub unit_price: Money,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Order {
    pub id: i32,
    pub visit_id: i32,
    pub order_ref: String,
    pub total_amount: Money,
    pub order_date: NaiveDateTime,
    pub lines: Vec<OrderLine>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewOrderLine {
    pub article_ref: String,
    pub quantity: i32,
    pub unit_price: Money,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewOrder {
    pub visit_id: i32,
    pub order_ref: String,
    pub lines: Vec<NewOrderLine>,
    /// Sum of quantity times unit price over all lines, fixed at creation.
    pub total: Money,
}

impl NewOrder {
    /// An order carries at least one line with positive quantity and
    /// non-negative unit price. The total is computed here with checked
    /// arithmetic so an unrepresentable order never reaches the database.
    pub fn new(
        visit_id: i32,
        order_ref: String,
        lines: Vec<NewOrderLine>,
    ) -> Result<Self, TypeConstraintError> {
        if lines.is_empty() {
            return Err(TypeConstraintError::InvalidValue(
                "at least one order line is required".to_string(),
            ));
        }
        let mut total = Money::ZERO;
        for line in &lines {
            if line.quantity <= 0 {
                return Err(TypeConstraintError::InvalidValue(format!(
                    "quantity must be positive for article {}",
                    line.article_ref
                )));
            }
            if line.unit_price.is_negative() {
                return Err(TypeConstraintError::InvalidAmount(format!(
                    "unit price cannot be negative for article {}",
                    line.article_ref
                )));
            }
            total = line
                .unit_price
                .checked_mul(i64::from(line.quantity))
                .and_then(|line_total| total.checked_add(line_total))
                .ok_or_else(|| {
                    TypeConstraintError::InvalidAmount(format!(
                        "order total overflows at article {}",
                        line.article_ref
                    ))
                })?;
        }
        Ok(Self {
            visit_id,
            order_ref,
            lines,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(article: &str, quantity: i32, unit_price_minor: i64) -> NewOrderLine {
        NewOrderLine {
            article_ref: article.to_string(),
            quantity,
            unit_price: Money::from_minor(unit_price_minor),
        }
    }

    #[test]
    fn total_sums_quantity_times_unit_price() {
        let order = NewOrder::new(
            1,
            "ORD-1".to_string(),
            vec![line("A-10", 3, 2_50), line("A-11", 2, 10_00)],
        )
        .unwrap();
        assert_eq!(order.total, Money::from_minor(27_50));
    }

    #[test]
    fn order_total_overflow_is_rejected() {
        let result = NewOrder::new(
            1,
            "ORD-X".to_string(),
            vec![line("A-10", i32::MAX, i64::MAX / 2)],
        );
        assert!(matches!(
            result,
            Err(TypeConstraintError::InvalidAmount(_))
        ));
    }

    #[test]
    fn empty_order_is_rejected() {
        assert!(NewOrder::new(1, String::new(), vec![]).is_err());
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        assert!(NewOrder::new(1, String::new(), vec![line("A-10", 0, 100)]).is_err());
        assert!(NewOrder::new(1, String::new(), vec![line("A-10", -2, 100)]).is_err());
    }
}
