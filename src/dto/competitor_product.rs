use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::competitor_product::{CompetitorProduct, NewCompetitorProduct};
use crate::domain::types::{Money, TypeConstraintError};

#[derive(Deserialize, Validate)]
/// Payload for recording a competitor product seen during a visit.
pub struct CreateCompetitorProductRequest {
    #[validate(length(min = 1))]
    pub product_name: String,
    pub price: Money,
    pub notes: Option<String>,
}

impl CreateCompetitorProductRequest {
    pub fn into_domain(self, visit_id: i32) -> Result<NewCompetitorProduct, TypeConstraintError> {
        NewCompetitorProduct::new(visit_id, self.product_name, self.price, self.notes)
    }
}

#[derive(Serialize)]
pub struct CompetitorProductResponse {
    pub id: i32,
    pub visit_id: i32,
    pub product_name: String,
    pub price: Money,
    pub notes: Option<String>,
}

impl From<CompetitorProduct> for CompetitorProductResponse {
    fn from(product: CompetitorProduct) -> Self {
        Self {
            id: product.id,
            visit_id: product.visit_id,
            product_name: product.product_name,
            price: product.price,
            notes: product.notes,
        }
    }
}
