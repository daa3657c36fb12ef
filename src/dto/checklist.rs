use serde::Serialize;

use crate::domain::checklist::{ChecklistCategory, ChecklistDetail, ChecklistItem};
use crate::domain::types::Money;

#[derive(Serialize)]
pub struct ChecklistResponse {
    pub id: i32,
    pub visit_id: i32,
    pub category: ChecklistCategory,
    pub comment: String,
    pub is_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_amount: Option<Money>,
}

impl From<ChecklistItem> for ChecklistResponse {
    fn from(item: ChecklistItem) -> Self {
        let category = item.category();
        let (expected_amount, remaining_amount) = match item.detail {
            ChecklistDetail::Recovery {
                expected,
                remaining,
            } => (Some(expected), remaining),
            _ => (None, None),
        };
        Self {
            id: item.id,
            visit_id: item.visit_id,
            category,
            comment: item.comment,
            is_completed: item.is_completed,
            expected_amount,
            remaining_amount,
        }
    }
}
