//! Competitor products scouted during a visit.

use serde::Serialize;

use crate::domain::types::{Money, TypeConstraintError};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CompetitorProduct {
    pub id: i32,
    pub visit_id: i32,
    pub product_name: String,
    pub price: Money,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewCompetitorProduct {
    pub visit_id: i32,
    pub product_name: String,
    pub price: Money,
    pub notes: Option<String>,
}

impl NewCompetitorProduct {
    pub fn new(
        visit_id: i32,
        product_name: String,
        price: Money,
        notes: Option<String>,
    ) -> Result<Self, TypeConstraintError> {
        let product_name = product_name.trim().to_string();
        if product_name.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        if price.is_negative() {
            return Err(TypeConstraintError::InvalidAmount(
                "price cannot be negative".to_string(),
            ));
        }
        Ok(Self {
            visit_id,
            product_name,
            price,
            notes,
        })
    }
}
