//! Mock repository implementations for isolating services in tests.

use chrono::NaiveDateTime;
use mockall::mock;

use crate::domain::checklist::ChecklistItem;
use crate::domain::competitor_product::{CompetitorProduct, NewCompetitorProduct};
use crate::domain::directory::Tiers;
use crate::domain::order::{NewOrder, Order};
use crate::domain::recovery::{CollectionReport, RecoveryEntry, RecoveryReportRow};
use crate::domain::types::Money;
use crate::domain::visit::{NewVisit, Visit};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ChecklistReader, ChecklistWriter, CompetitorProductWriter, DirectoryReader, OrderReader,
    OrderWriter, RecoveryReader, RecoveryWriter, VisitReader, VisitWriter,
};

mock! {
    pub Repository {}

    impl DirectoryReader for Repository {
        fn tiers_exists(&self, tiers_id: i32) -> RepositoryResult<bool>;
        fn get_tiers_by_id(&self, tiers_id: i32) -> RepositoryResult<Option<Tiers>>;
        fn commercial_exists(&self, cref: &str) -> RepositoryResult<bool>;
    }

    impl VisitReader for Repository {
        fn get_visit_by_id(&self, id: i32) -> RepositoryResult<Option<Visit>>;
        fn visit_exists(&self, id: i32) -> RepositoryResult<bool>;
        fn list_visits_by_commercial(&self, cref: &str) -> RepositoryResult<Vec<Visit>>;
        fn list_upcoming_visits(
            &self,
            from: NaiveDateTime,
            to: NaiveDateTime,
        ) -> RepositoryResult<Vec<Visit>>;
    }

    impl VisitWriter for Repository {
        fn create_visit(&self, new_visit: &NewVisit) -> RepositoryResult<Visit>;
        fn cancel_visit(&self, visit_id: i32) -> RepositoryResult<()>;
    }

    impl ChecklistReader for Repository {
        fn get_checklist_by_id(&self, id: i32) -> RepositoryResult<Option<ChecklistItem>>;
        fn list_checklist_by_visit(&self, visit_id: i32) -> RepositoryResult<Vec<ChecklistItem>>;
    }

    impl ChecklistWriter for Repository {
        fn set_checklist_completion(
            &self,
            checklist_id: i32,
            completed: bool,
        ) -> RepositoryResult<ChecklistItem>;
    }

    impl RecoveryReader for Repository {
        fn get_recovery_by_id(&self, id: i32) -> RepositoryResult<Option<RecoveryEntry>>;
        fn running_total(&self, visit_id: i32) -> RepositoryResult<Money>;
        fn latest_entry(&self, visit_id: i32) -> RepositoryResult<Option<RecoveryEntry>>;
        fn list_recoveries_by_commercial(&self, cref: &str) -> RepositoryResult<Vec<RecoveryEntry>>;
        fn recovery_report(&self, cref: &str) -> RepositoryResult<Vec<RecoveryReportRow>>;
    }

    impl RecoveryWriter for Repository {
        fn apply_collection(
            &self,
            visit_id: i32,
            amount: Money,
            notes: Option<&str>,
        ) -> RepositoryResult<CollectionReport>;
        fn apply_collection_by_checklist(
            &self,
            checklist_id: i32,
            amount: Money,
        ) -> RepositoryResult<CollectionReport>;
    }

    impl OrderReader for Repository {
        fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
    }

    impl OrderWriter for Repository {
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    }

    impl CompetitorProductWriter for Repository {
        fn create_competitor_product(
            &self,
            product: &NewCompetitorProduct,
        ) -> RepositoryResult<CompetitorProduct>;
    }
}
