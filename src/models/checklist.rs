use diesel::prelude::*;

use crate::domain::checklist::{
    ChecklistCategory, ChecklistDetail, ChecklistItem as DomainChecklistItem, NewChecklistItem,
};
use crate::domain::types::{Money, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::visit_checklists)]
/// Diesel model for [`crate::domain::checklist::ChecklistItem`].
pub struct Checklist {
    pub id: i32,
    pub visit_id: i32,
    pub category: String,
    pub comment: String,
    pub is_completed: bool,
    pub expected_amount: Option<i64>,
    pub remaining_amount: Option<i64>,
    pub version: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::visit_checklists)]
/// Insertable form of [`Checklist`].
pub struct NewChecklist<'a> {
    pub visit_id: i32,
    pub category: String,
    pub comment: &'a str,
    pub is_completed: bool,
    pub expected_amount: Option<i64>,
}

impl TryFrom<Checklist> for DomainChecklistItem {
    type Error = TypeConstraintError;

    /// A Recovery row without an expected amount is inconsistent with the
    /// creation-time rule and is rejected rather than silently coerced.
    fn try_from(row: Checklist) -> Result<Self, Self::Error> {
        let category: ChecklistCategory = row.category.parse()?;
        let detail = match category {
            ChecklistCategory::Recovery => {
                let expected = row.expected_amount.ok_or_else(|| {
                    TypeConstraintError::InvalidAmount(
                        "recovery checklist has no expected amount".to_string(),
                    )
                })?;
                ChecklistDetail::Recovery {
                    expected: Money::from_minor(expected),
                    remaining: row.remaining_amount.map(Money::from_minor),
                }
            }
            ChecklistCategory::PlaceOrder => ChecklistDetail::PlaceOrder,
            ChecklistCategory::CompetitorProduct => ChecklistDetail::CompetitorProduct,
        };

        Ok(Self {
            id: row.id,
            visit_id: row.visit_id,
            comment: row.comment,
            is_completed: row.is_completed,
            detail,
            version: row.version,
        })
    }
}

impl<'a> NewChecklist<'a> {
    pub fn from_domain(visit_id: i32, item: &'a NewChecklistItem) -> Self {
        let expected_amount = match &item.detail {
            ChecklistDetail::Recovery { expected, .. } => Some(expected.minor()),
            _ => None,
        };
        Self {
            visit_id,
            category: item.detail.category().to_string(),
            comment: &item.comment,
            is_completed: false,
            expected_amount,
        }
    }
}
