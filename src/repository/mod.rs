use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool};
use crate::domain::checklist::ChecklistItem;
use crate::domain::competitor_product::{CompetitorProduct, NewCompetitorProduct};
use crate::domain::directory::Tiers;
use crate::domain::order::{NewOrder, Order};
use crate::domain::recovery::{CollectionReport, RecoveryEntry, RecoveryReportRow};
use crate::domain::types::Money;
use crate::domain::visit::{NewVisit, Visit};
use crate::repository::errors::RepositoryResult;

pub mod checklist;
pub mod competitor_product;
pub mod directory;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod order;
pub mod recovery;
pub mod visit;

/// Diesel-backed repository; cloneable handle over the connection pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(crate::db::get_connection(&self.pool)?)
    }
}

pub trait DirectoryReader {
    fn tiers_exists(&self, tiers_id: i32) -> RepositoryResult<bool>;
    fn get_tiers_by_id(&self, tiers_id: i32) -> RepositoryResult<Option<Tiers>>;
    fn commercial_exists(&self, cref: &str) -> RepositoryResult<bool>;
}

pub trait VisitReader {
    fn get_visit_by_id(&self, id: i32) -> RepositoryResult<Option<Visit>>;
    fn visit_exists(&self, id: i32) -> RepositoryResult<bool>;
    fn list_visits_by_commercial(&self, cref: &str) -> RepositoryResult<Vec<Visit>>;
    /// Visits scheduled inside the `(from, to]` window, skipping terminal ones.
    fn list_upcoming_visits(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> RepositoryResult<Vec<Visit>>;
}

pub trait VisitWriter {
    /// Inserts the visit together with its initial checklist in one
    /// transaction.
    fn create_visit(&self, new_visit: &NewVisit) -> RepositoryResult<Visit>;
    /// Unconditionally marks the visit Cancelled, bypassing the resolver.
    fn cancel_visit(&self, visit_id: i32) -> RepositoryResult<()>;
}

pub trait ChecklistReader {
    fn get_checklist_by_id(&self, id: i32) -> RepositoryResult<Option<ChecklistItem>>;
    fn list_checklist_by_visit(&self, visit_id: i32) -> RepositoryResult<Vec<ChecklistItem>>;
}

pub trait ChecklistWriter {
    /// Direct completion override; re-resolves the owning visit's status in
    /// the same transaction unless that visit is Cancelled.
    fn set_checklist_completion(
        &self,
        checklist_id: i32,
        completed: bool,
    ) -> RepositoryResult<ChecklistItem>;
}

pub trait RecoveryReader {
    fn get_recovery_by_id(&self, id: i32) -> RepositoryResult<Option<RecoveryEntry>>;
    /// Sum of all ledger entries recorded against a visit.
    fn running_total(&self, visit_id: i32) -> RepositoryResult<Money>;
    /// Most recent ledger entry by collection date, if any.
    fn latest_entry(&self, visit_id: i32) -> RepositoryResult<Option<RecoveryEntry>>;
    fn list_recoveries_by_commercial(&self, cref: &str) -> RepositoryResult<Vec<RecoveryEntry>>;
    fn recovery_report(&self, cref: &str) -> RepositoryResult<Vec<RecoveryReportRow>>;
}

pub trait RecoveryWriter {
    /// Applies one collection event to the visit's Recovery checklist item:
    /// updates the remaining amount, appends a ledger entry and re-resolves
    /// the visit status, all inside a single transaction.
    fn apply_collection(
        &self,
        visit_id: i32,
        amount: Money,
        notes: Option<&str>,
    ) -> RepositoryResult<CollectionReport>;
    /// Same as [`RecoveryWriter::apply_collection`], addressed by checklist id.
    fn apply_collection_by_checklist(
        &self,
        checklist_id: i32,
        amount: Money,
    ) -> RepositoryResult<CollectionReport>;
}

pub trait OrderReader {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
}

pub trait OrderWriter {
    /// Persists an order with its lines; requires the visit to carry a
    /// PlaceOrder checklist item.
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
}

pub trait CompetitorProductWriter {
    /// Persists a competitor product sighting; requires the visit to carry a
    /// CompetitorProduct checklist item.
    fn create_competitor_product(
        &self,
        product: &NewCompetitorProduct,
    ) -> RepositoryResult<CompetitorProduct>;
}
