//! Visit checklist items and their category-specific payloads.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::{Money, TypeConstraintError};

/// Closed set of objective categories a checklist item can carry.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ChecklistCategory {
    PlaceOrder,
    Recovery,
    CompetitorProduct,
}

impl Display for ChecklistCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ChecklistCategory::PlaceOrder => write!(f, "PlaceOrder"),
            ChecklistCategory::Recovery => write!(f, "Recovery"),
            ChecklistCategory::CompetitorProduct => write!(f, "CompetitorProduct"),
        }
    }
}

impl FromStr for ChecklistCategory {
    type Err = TypeConstraintError;

    /// Validated parse; unknown categories are rejected instead of panicking.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PlaceOrder" => Ok(ChecklistCategory::PlaceOrder),
            "Recovery" => Ok(ChecklistCategory::Recovery),
            "CompetitorProduct" => Ok(ChecklistCategory::CompetitorProduct),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown checklist category: {other}"
            ))),
        }
    }
}

/// Category-specific payload. Only the Recovery variant carries monetary
/// amounts, so a non-Recovery item cannot hold recovery state by
/// construction.
#[derive(Clone, Debug, PartialEq)]
pub enum ChecklistDetail {
    PlaceOrder,
    Recovery {
        expected: Money,
        /// Remaining receivable; `None` until the first collection event.
        remaining: Option<Money>,
    },
    CompetitorProduct,
}

impl ChecklistDetail {
    pub fn category(&self) -> ChecklistCategory {
        match self {
            ChecklistDetail::PlaceOrder => ChecklistCategory::PlaceOrder,
            ChecklistDetail::Recovery { .. } => ChecklistCategory::Recovery,
            ChecklistDetail::CompetitorProduct => ChecklistCategory::CompetitorProduct,
        }
    }
}

/// One objective attached to a visit.
#[derive(Clone, Debug, PartialEq)]
pub struct ChecklistItem {
    pub id: i32,
    pub visit_id: i32,
    pub comment: String,
    pub is_completed: bool,
    pub detail: ChecklistDetail,
    /// Optimistic-lock counter bumped on every update.
    pub version: i32,
}

impl ChecklistItem {
    pub fn category(&self) -> ChecklistCategory {
        self.detail.category()
    }
}

/// Payload for creating a checklist item together with its visit.
#[derive(Clone, Debug, PartialEq)]
pub struct NewChecklistItem {
    pub comment: String,
    pub detail: ChecklistDetail,
}

impl NewChecklistItem {
    /// Builds a new checklist item, enforcing that a Recovery objective
    /// carries a positive expected amount at creation time.
    pub fn new(
        category: ChecklistCategory,
        comment: String,
        expected_amount: Option<Money>,
    ) -> Result<Self, TypeConstraintError> {
        let detail = match category {
            ChecklistCategory::Recovery => {
                let expected = expected_amount.ok_or_else(|| {
                    TypeConstraintError::InvalidAmount(
                        "expected amount is required for a Recovery checklist".to_string(),
                    )
                })?;
                if expected <= Money::ZERO {
                    return Err(TypeConstraintError::InvalidAmount(
                        "expected amount must be greater than zero".to_string(),
                    ));
                }
                ChecklistDetail::Recovery {
                    expected,
                    remaining: None,
                }
            }
            ChecklistCategory::PlaceOrder => ChecklistDetail::PlaceOrder,
            ChecklistCategory::CompetitorProduct => ChecklistDetail::CompetitorProduct,
        };

        Ok(Self { comment, detail })
    }
}
