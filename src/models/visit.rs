use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::TypeConstraintError;
use crate::domain::visit::{NewVisit as DomainNewVisit, Visit as DomainVisit, VisitStatus};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::visits)]
/// Diesel model for [`crate::domain::visit::Visit`].
pub struct Visit {
    pub id: i32,
    pub tiers_id: i32,
    pub commercial_cref: String,
    pub visit_date: NaiveDateTime,
    pub note: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::visits)]
/// Insertable form of [`Visit`].
pub struct NewVisit<'a> {
    pub tiers_id: i32,
    pub commercial_cref: &'a str,
    pub visit_date: NaiveDateTime,
    pub note: &'a str,
    pub status: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Visit> for DomainVisit {
    type Error = TypeConstraintError;

    fn try_from(visit: Visit) -> Result<Self, Self::Error> {
        Ok(Self {
            id: visit.id,
            tiers_id: visit.tiers_id,
            commercial_cref: visit.commercial_cref,
            visit_date: visit.visit_date,
            note: visit.note,
            status: visit.status.parse()?,
            created_at: visit.created_at,
        })
    }
}

impl<'a> NewVisit<'a> {
    /// Builds the insertable row; the status of a fresh visit is always
    /// `Incomplete` until the resolver first runs.
    pub fn from_domain(visit: &'a DomainNewVisit, now: NaiveDateTime) -> Self {
        Self {
            tiers_id: visit.tiers_id,
            commercial_cref: visit.commercial_cref.as_str(),
            visit_date: visit.visit_date,
            note: &visit.note,
            status: VisitStatus::Incomplete.to_string(),
            created_at: now,
        }
    }
}
