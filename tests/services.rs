use tournee::domain::checklist::{ChecklistCategory, NewChecklistItem};
use tournee::domain::directory::Tiers;
use tournee::domain::types::{Cref, Money};
use tournee::domain::visit::{NewVisit, Visit, VisitStatus};
use tournee::services::notify::VisitNotifier;
use tournee::services::{ServiceError, checklist, recovery, visit};

mod common;

struct NullNotifier;
impl VisitNotifier for NullNotifier {
    fn visit_created(&self, _visit: &Visit) {}
    fn visit_upcoming(&self, _visit: &Visit, _client: Option<&Tiers>) {}
}

#[test]
fn create_visit_checks_directory_references() {
    let test_db = common::TestDb::new("test_service_create_visit.db");
    let repo = test_db.repo();
    let tiers_id = common::seed_directory(&test_db.pool());

    let checklist_items = vec![
        NewChecklistItem::new(
            ChecklistCategory::Recovery,
            "settle invoice 1042".to_string(),
            Some(Money::from_minor(100_000)),
        )
        .unwrap(),
    ];

    // Unknown client.
    let unknown_tiers = NewVisit::new(
        tiers_id + 100,
        Cref::new("C001").unwrap(),
        common::visit_date(),
        String::new(),
        checklist_items.clone(),
    )
    .unwrap();
    let result = visit::create_visit(&repo, &unknown_tiers, &NullNotifier);
    assert!(matches!(result, Err(ServiceError::NotFound)));

    // Unknown commercial.
    let unknown_cref = NewVisit::new(
        tiers_id,
        Cref::new("C999").unwrap(),
        common::visit_date(),
        String::new(),
        checklist_items.clone(),
    )
    .unwrap();
    let result = visit::create_visit(&repo, &unknown_cref, &NullNotifier);
    assert!(matches!(result, Err(ServiceError::NotFound)));

    // Both references valid.
    let valid = NewVisit::new(
        tiers_id,
        Cref::new("C001").unwrap(),
        common::visit_date(),
        "monthly round".to_string(),
        checklist_items,
    )
    .unwrap();
    let created = visit::create_visit(&repo, &valid, &NullNotifier).unwrap();
    assert_eq!(created.status, VisitStatus::Incomplete);

    let (fetched, items) = visit::get_visit(&repo, created.id).unwrap();
    assert_eq!(fetched.note, "monthly round");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].comment, "settle invoice 1042");
}

#[test]
fn service_errors_map_the_repository_taxonomy() {
    let test_db = common::TestDb::new("test_service_errors.db");
    let repo = test_db.repo();
    let tiers_id = common::seed_directory(&test_db.pool());
    let visit_row = common::create_visit_with(
        &repo,
        tiers_id,
        &[(ChecklistCategory::Recovery, Some(50_000))],
    );

    // Over-collection surfaces as a validation error.
    let result = recovery::record_collection(&repo, visit_row.id, Money::from_minor(50_001), None);
    assert!(matches!(result, Err(ServiceError::Validation(_))));

    // Unknown ids surface as NotFound.
    assert!(matches!(
        visit::get_visit(&repo, 9999),
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        recovery::get_recovery(&repo, 9999),
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        checklist::set_completion(&repo, 9999, true),
        Err(ServiceError::NotFound)
    ));
}

#[test]
fn cancel_visit_is_idempotent() {
    let test_db = common::TestDb::new("test_service_cancel.db");
    let repo = test_db.repo();
    let tiers_id = common::seed_directory(&test_db.pool());
    let visit_row =
        common::create_visit_with(&repo, tiers_id, &[(ChecklistCategory::PlaceOrder, None)]);

    visit::cancel_visit(&repo, visit_row.id).unwrap();
    visit::cancel_visit(&repo, visit_row.id).unwrap();
    let (fetched, _) = visit::get_visit(&repo, visit_row.id).unwrap();
    assert_eq!(fetched.status, VisitStatus::Cancelled);

    assert!(matches!(
        visit::cancel_visit(&repo, 9999),
        Err(ServiceError::NotFound)
    ));
}

#[test]
fn recorded_collection_is_readable_through_the_ledger() {
    let test_db = common::TestDb::new("test_service_ledger.db");
    let repo = test_db.repo();
    let tiers_id = common::seed_directory(&test_db.pool());
    let visit_row = common::create_visit_with(
        &repo,
        tiers_id,
        &[(ChecklistCategory::Recovery, Some(80_000))],
    );

    let report =
        recovery::record_collection(&repo, visit_row.id, Money::from_minor(30_000), None).unwrap();
    let entry = recovery::get_recovery(&repo, report.entry.id).unwrap();
    assert_eq!(entry.amount_collected, Money::from_minor(30_000));
    assert_eq!(entry.visit_id, visit_row.id);

    let entries = recovery::list_collections_by_commercial(&repo, "C001").unwrap();
    assert_eq!(entries.len(), 1);
    assert!(recovery::list_collections_by_commercial(&repo, "C999")
        .unwrap()
        .is_empty());

    let rows = recovery::build_recovery_report(&repo, "C001").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].remaining_amount, Money::from_minor(50_000));
}
