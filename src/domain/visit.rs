//! Visit aggregate and the checklist-driven status resolver.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::checklist::{ChecklistCategory, ChecklistItem, NewChecklistItem};
use crate::domain::types::{Cref, TypeConstraintError};

/// Overall state of a visit, derived from its checklist except for the
/// terminal `Cancelled` state.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VisitStatus {
    Incomplete,
    Completed,
    Cancelled,
}

impl Display for VisitStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VisitStatus::Incomplete => write!(f, "Incomplete"),
            VisitStatus::Completed => write!(f, "Completed"),
            VisitStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl FromStr for VisitStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Incomplete" => Ok(VisitStatus::Incomplete),
            "Completed" => Ok(VisitStatus::Completed),
            "Cancelled" => Ok(VisitStatus::Cancelled),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown visit status: {other}"
            ))),
        }
    }
}

/// Derives a visit's status from the completion state of its checklist.
///
/// `Completed` iff the checklist is non-empty and every item is completed.
/// `Cancelled` is never derived here; callers must short-circuit before
/// invoking the resolver on a cancelled visit.
pub fn resolve_status(items: &[ChecklistItem]) -> VisitStatus {
    if !items.is_empty() && items.iter().all(|item| item.is_completed) {
        VisitStatus::Completed
    } else {
        VisitStatus::Incomplete
    }
}

/// A scheduled interaction between a commercial agent and a client (Tiers).
#[derive(Clone, Debug, PartialEq)]
pub struct Visit {
    pub id: i32,
    pub tiers_id: i32,
    pub commercial_cref: String,
    pub visit_date: NaiveDateTime,
    pub note: String,
    pub status: VisitStatus,
    pub created_at: NaiveDateTime,
}

/// Payload for creating a visit together with its initial checklist.
#[derive(Clone, Debug)]
pub struct NewVisit {
    pub tiers_id: i32,
    pub commercial_cref: Cref,
    pub visit_date: NaiveDateTime,
    pub note: String,
    pub checklist: Vec<NewChecklistItem>,
}

impl NewVisit {
    /// A visit is created with at least one checklist item and at most one
    /// Recovery objective, so collections against the visit are unambiguous.
    pub fn new(
        tiers_id: i32,
        commercial_cref: Cref,
        visit_date: NaiveDateTime,
        note: String,
        checklist: Vec<NewChecklistItem>,
    ) -> Result<Self, TypeConstraintError> {
        if checklist.is_empty() {
            return Err(TypeConstraintError::InvalidValue(
                "a visit requires at least one checklist item".to_string(),
            ));
        }
        let recovery_items = checklist
            .iter()
            .filter(|item| item.detail.category() == ChecklistCategory::Recovery)
            .count();
        if recovery_items > 1 {
            return Err(TypeConstraintError::InvalidValue(
                "a visit carries at most one Recovery checklist item".to_string(),
            ));
        }
        Ok(Self {
            tiers_id,
            commercial_cref,
            visit_date,
            note,
            checklist,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checklist::ChecklistDetail;
    use crate::domain::types::Money;

    fn item(id: i32, category: ChecklistCategory, completed: bool) -> ChecklistItem {
        let detail = match category {
            ChecklistCategory::PlaceOrder => ChecklistDetail::PlaceOrder,
            ChecklistCategory::CompetitorProduct => ChecklistDetail::CompetitorProduct,
            ChecklistCategory::Recovery => ChecklistDetail::Recovery {
                expected: Money::from_minor(50_000),
                remaining: completed.then_some(Money::ZERO),
            },
        };
        ChecklistItem {
            id,
            visit_id: 1,
            comment: String::new(),
            is_completed: completed,
            detail,
            version: 0,
        }
    }

    #[test]
    fn empty_checklist_is_incomplete() {
        assert_eq!(resolve_status(&[]), VisitStatus::Incomplete);
    }

    #[test]
    fn all_items_completed_resolves_completed() {
        let items = vec![
            item(1, ChecklistCategory::PlaceOrder, true),
            item(2, ChecklistCategory::Recovery, true),
        ];
        assert_eq!(resolve_status(&items), VisitStatus::Completed);
    }

    #[test]
    fn completed_recovery_alone_does_not_complete_mixed_checklist() {
        let items = vec![
            item(1, ChecklistCategory::PlaceOrder, false),
            item(2, ChecklistCategory::Recovery, true),
        ];
        assert_eq!(resolve_status(&items), VisitStatus::Incomplete);
    }

    #[test]
    fn adding_incomplete_item_reverts_to_incomplete() {
        let mut items = vec![item(1, ChecklistCategory::Recovery, true)];
        assert_eq!(resolve_status(&items), VisitStatus::Completed);

        items.push(item(2, ChecklistCategory::CompetitorProduct, false));
        assert_eq!(resolve_status(&items), VisitStatus::Incomplete);
    }

    #[test]
    fn status_parse_round_trip() {
        for status in [
            VisitStatus::Incomplete,
            VisitStatus::Completed,
            VisitStatus::Cancelled,
        ] {
            assert_eq!(status.to_string().parse::<VisitStatus>(), Ok(status));
        }
        assert!("Validated".parse::<VisitStatus>().is_err());
    }

    #[test]
    fn visit_requires_non_empty_checklist() {
        let result = NewVisit::new(
            1,
            Cref::new("C001").unwrap(),
            chrono::Utc::now().naive_utc(),
            String::new(),
            vec![],
        );
        assert!(result.is_err());
    }

    #[test]
    fn visit_rejects_a_second_recovery_objective() {
        let recovery = || {
            NewChecklistItem::new(
                ChecklistCategory::Recovery,
                String::new(),
                Some(Money::from_minor(10_000)),
            )
            .unwrap()
        };
        let result = NewVisit::new(
            1,
            Cref::new("C001").unwrap(),
            chrono::Utc::now().naive_utc(),
            String::new(),
            vec![recovery(), recovery()],
        );
        assert_eq!(
            result.unwrap_err(),
            TypeConstraintError::InvalidValue(
                "a visit carries at most one Recovery checklist item".to_string()
            )
        );
    }
}
