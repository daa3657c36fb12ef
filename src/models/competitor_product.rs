use diesel::prelude::*;

use crate::domain::competitor_product::{
    CompetitorProduct as DomainCompetitorProduct, NewCompetitorProduct as DomainNewCompetitorProduct,
};
use crate::domain::types::Money;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::competitor_products)]
/// Diesel model for [`crate::domain::competitor_product::CompetitorProduct`].
pub struct CompetitorProduct {
    pub id: i32,
    pub visit_id: i32,
    pub product_name: String,
    pub price: i64,
    pub notes: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::competitor_products)]
pub struct NewCompetitorProduct<'a> {
    pub visit_id: i32,
    pub product_name: &'a str,
    pub price: i64,
    pub notes: Option<&'a str>,
}

impl From<CompetitorProduct> for DomainCompetitorProduct {
    fn from(row: CompetitorProduct) -> Self {
        Self {
            id: row.id,
            visit_id: row.visit_id,
            product_name: row.product_name,
            price: Money::from_minor(row.price),
            notes: row.notes,
        }
    }
}

impl<'a> From<&'a DomainNewCompetitorProduct> for NewCompetitorProduct<'a> {
    fn from(product: &'a DomainNewCompetitorProduct) -> Self {
        Self {
            visit_id: product.visit_id,
            product_name: &product.product_name,
            price: product.price.minor(),
            notes: product.notes.as_deref(),
        }
    }
}
