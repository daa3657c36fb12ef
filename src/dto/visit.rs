use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::checklist::{ChecklistCategory, ChecklistItem, NewChecklistItem};
use crate::domain::types::{Cref, Money, TypeConstraintError};
use crate::domain::visit::{NewVisit, Visit, VisitStatus};
use crate::dto::checklist::ChecklistResponse;

#[derive(Deserialize, Validate)]
/// Payload for creating a visit together with its initial checklist.
pub struct CreateVisitRequest {
    pub tiers_id: i32,
    #[validate(length(min = 1))]
    pub commercial_cref: String,
    pub visit_date: NaiveDateTime,
    #[serde(default)]
    pub note: String,
    #[validate(length(min = 1))]
    pub checklist: Vec<ChecklistCreateRequest>,
}

#[derive(Deserialize, Serialize)]
pub struct ChecklistCreateRequest {
    pub category: String,
    #[serde(default)]
    pub comment: String,
    /// Required when `category` is `Recovery`, ignored otherwise.
    pub expected_amount: Option<Money>,
}

impl TryFrom<&CreateVisitRequest> for NewVisit {
    type Error = TypeConstraintError;

    fn try_from(req: &CreateVisitRequest) -> Result<Self, Self::Error> {
        let checklist = req
            .checklist
            .iter()
            .map(|item| {
                let category: ChecklistCategory = item.category.parse()?;
                NewChecklistItem::new(category, item.comment.clone(), item.expected_amount)
            })
            .collect::<Result<Vec<_>, _>>()?;

        NewVisit::new(
            req.tiers_id,
            Cref::new(req.commercial_cref.clone())?,
            req.visit_date,
            req.note.clone(),
            checklist,
        )
    }
}

#[derive(Serialize)]
pub struct VisitResponse {
    pub id: i32,
    pub tiers_id: i32,
    pub commercial_cref: String,
    pub visit_date: NaiveDateTime,
    pub note: String,
    pub status: VisitStatus,
    pub created_at: NaiveDateTime,
    pub checklist: Vec<ChecklistResponse>,
}

impl VisitResponse {
    pub fn from_parts(visit: Visit, checklist: Vec<ChecklistItem>) -> Self {
        Self {
            id: visit.id,
            tiers_id: visit.tiers_id,
            commercial_cref: visit.commercial_cref,
            visit_date: visit.visit_date,
            note: visit.note,
            status: visit.status,
            created_at: visit.created_at,
            checklist: checklist.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize)]
/// Visit summary without the checklist, for list endpoints.
pub struct VisitSummaryResponse {
    pub id: i32,
    pub tiers_id: i32,
    pub commercial_cref: String,
    pub visit_date: NaiveDateTime,
    pub status: VisitStatus,
}

impl From<Visit> for VisitSummaryResponse {
    fn from(visit: Visit) -> Self {
        Self {
            id: visit.id,
            tiers_id: visit.tiers_id,
            commercial_cref: visit.commercial_cref,
            visit_date: visit.visit_date,
            status: visit.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checklist::ChecklistDetail;

    fn base_request(category: &str, expected: Option<f64>) -> CreateVisitRequest {
        CreateVisitRequest {
            tiers_id: 1,
            commercial_cref: "C001".to_string(),
            visit_date: chrono::NaiveDate::from_ymd_opt(2026, 9, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            note: String::new(),
            checklist: vec![ChecklistCreateRequest {
                category: category.to_string(),
                comment: String::new(),
                expected_amount: expected.map(|v| Money::try_from_decimal(v).unwrap()),
            }],
        }
    }

    #[test]
    fn recovery_without_expected_amount_is_rejected() {
        let req = base_request("Recovery", None);
        assert!(NewVisit::try_from(&req).is_err());
    }

    #[test]
    fn unknown_category_is_rejected() {
        let req = base_request("Lunch", None);
        assert!(NewVisit::try_from(&req).is_err());
    }

    #[test]
    fn valid_request_converts() {
        let req = base_request("Recovery", Some(1000.0));
        let new_visit = NewVisit::try_from(&req).unwrap();
        assert_eq!(new_visit.checklist.len(), 1);
        assert!(matches!(
            new_visit.checklist[0].detail,
            ChecklistDetail::Recovery { .. }
        ));
    }
}
