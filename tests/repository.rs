use tournee::domain::checklist::{ChecklistCategory, ChecklistDetail};
use tournee::domain::order::{NewOrder, NewOrderLine};
use tournee::domain::competitor_product::NewCompetitorProduct;
use tournee::domain::types::Money;
use tournee::domain::visit::VisitStatus;
use tournee::repository::errors::RepositoryError;
use tournee::repository::{
    ChecklistReader, ChecklistWriter, CompetitorProductWriter, OrderReader, OrderWriter,
    RecoveryReader, RecoveryWriter, VisitReader, VisitWriter,
};

mod common;

fn recovery_state(detail: &ChecklistDetail) -> (Money, Option<Money>) {
    match detail {
        ChecklistDetail::Recovery {
            expected,
            remaining,
        } => (*expected, *remaining),
        other => panic!("expected a Recovery detail, got {other:?}"),
    }
}

#[test]
fn create_visit_persists_checklist_and_starts_incomplete() {
    let test_db = common::TestDb::new("test_create_visit.db");
    let repo = test_db.repo();
    let tiers_id = common::seed_directory(&test_db.pool());

    let visit = common::create_visit_with(
        &repo,
        tiers_id,
        &[
            (ChecklistCategory::Recovery, Some(100_000)),
            (ChecklistCategory::PlaceOrder, None),
        ],
    );

    assert_eq!(visit.status, VisitStatus::Incomplete);
    let checklist = repo.list_checklist_by_visit(visit.id).unwrap();
    assert_eq!(checklist.len(), 2);
    let (expected, remaining) = recovery_state(&checklist[0].detail);
    assert_eq!(expected, Money::from_minor(100_000));
    assert_eq!(remaining, None);
    assert!(!checklist[0].is_completed);
    assert_eq!(checklist[0].version, 0);
}

#[test]
fn partial_collections_reconcile_and_complete_the_visit() {
    let test_db = common::TestDb::new("test_partial_collections.db");
    let repo = test_db.repo();
    let tiers_id = common::seed_directory(&test_db.pool());
    // Expected 1000.00
    let visit = common::create_visit_with(
        &repo,
        tiers_id,
        &[(ChecklistCategory::Recovery, Some(100_000))],
    );

    let first = repo
        .apply_collection(visit.id, Money::from_minor(40_000), None)
        .unwrap();
    assert_eq!(first.remaining_amount, Money::from_minor(60_000));
    assert_eq!(first.total_collected, Money::from_minor(40_000));
    assert_eq!(
        repo.get_visit_by_id(visit.id).unwrap().unwrap().status,
        VisitStatus::Incomplete
    );

    let second = repo
        .apply_collection(visit.id, Money::from_minor(60_000), None)
        .unwrap();
    assert_eq!(second.remaining_amount, Money::ZERO);
    assert_eq!(second.total_collected, Money::from_minor(100_000));
    assert_eq!(
        repo.get_visit_by_id(visit.id).unwrap().unwrap().status,
        VisitStatus::Completed
    );

    // The objective is settled; one more cent is over-collection.
    let err = repo
        .apply_collection(visit.id, Money::from_minor(1), None)
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError(_)));

    // Rejection left no trace: still two ledger entries, totals unchanged.
    assert_eq!(
        repo.running_total(visit.id).unwrap(),
        Money::from_minor(100_000)
    );
    let checklist = repo.list_checklist_by_visit(visit.id).unwrap();
    let (_, remaining) = recovery_state(&checklist[0].detail);
    assert_eq!(remaining, Some(Money::ZERO));
    assert!(checklist[0].is_completed);
}

#[test]
fn negative_amount_is_rejected_without_side_effects() {
    let test_db = common::TestDb::new("test_negative_amount.db");
    let repo = test_db.repo();
    let tiers_id = common::seed_directory(&test_db.pool());
    let visit = common::create_visit_with(
        &repo,
        tiers_id,
        &[(ChecklistCategory::Recovery, Some(50_000))],
    );

    let err = repo
        .apply_collection(visit.id, Money::from_minor(-100), None)
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError(_)));
    assert_eq!(repo.running_total(visit.id).unwrap(), Money::ZERO);

    let checklist = repo.list_checklist_by_visit(visit.id).unwrap();
    let (_, remaining) = recovery_state(&checklist[0].detail);
    assert_eq!(remaining, None);
    assert_eq!(checklist[0].version, 0);
}

#[test]
fn zero_amount_collection_counts_as_an_event() {
    let test_db = common::TestDb::new("test_zero_amount.db");
    let repo = test_db.repo();
    let tiers_id = common::seed_directory(&test_db.pool());
    let visit = common::create_visit_with(
        &repo,
        tiers_id,
        &[(ChecklistCategory::Recovery, Some(50_000))],
    );

    let report = repo.apply_collection(visit.id, Money::ZERO, None).unwrap();
    assert_eq!(report.remaining_amount, Money::from_minor(50_000));

    // The event initialized the remaining amount and appended to the ledger.
    let checklist = repo.list_checklist_by_visit(visit.id).unwrap();
    let (_, remaining) = recovery_state(&checklist[0].detail);
    assert_eq!(remaining, Some(Money::from_minor(50_000)));
    assert!(repo.latest_entry(visit.id).unwrap().is_some());
}

#[test]
fn visit_without_recovery_checklist_rejects_collections() {
    let test_db = common::TestDb::new("test_no_recovery_checklist.db");
    let repo = test_db.repo();
    let tiers_id = common::seed_directory(&test_db.pool());
    let visit =
        common::create_visit_with(&repo, tiers_id, &[(ChecklistCategory::PlaceOrder, None)]);

    let err = repo
        .apply_collection(visit.id, Money::from_minor(100), None)
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));

    let err = repo
        .apply_collection(9999, Money::from_minor(100), None)
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn collection_by_checklist_rejects_non_recovery_items() {
    let test_db = common::TestDb::new("test_collect_by_checklist.db");
    let repo = test_db.repo();
    let tiers_id = common::seed_directory(&test_db.pool());
    let visit = common::create_visit_with(
        &repo,
        tiers_id,
        &[
            (ChecklistCategory::PlaceOrder, None),
            (ChecklistCategory::Recovery, Some(30_000)),
        ],
    );
    let checklist = repo.list_checklist_by_visit(visit.id).unwrap();

    let err = repo
        .apply_collection_by_checklist(checklist[0].id, Money::from_minor(100))
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError(_)));

    let report = repo
        .apply_collection_by_checklist(checklist[1].id, Money::from_minor(30_000))
        .unwrap();
    assert_eq!(report.remaining_amount, Money::ZERO);
    // PlaceOrder is still open, so the visit is not completed.
    assert_eq!(
        repo.get_visit_by_id(visit.id).unwrap().unwrap().status,
        VisitStatus::Incomplete
    );
}

#[test]
fn completing_every_item_completes_the_visit() {
    let test_db = common::TestDb::new("test_complete_visit.db");
    let repo = test_db.repo();
    let tiers_id = common::seed_directory(&test_db.pool());
    let visit = common::create_visit_with(
        &repo,
        tiers_id,
        &[
            (ChecklistCategory::PlaceOrder, None),
            (ChecklistCategory::Recovery, Some(30_000)),
        ],
    );
    let checklist = repo.list_checklist_by_visit(visit.id).unwrap();

    repo.apply_collection(visit.id, Money::from_minor(30_000), None)
        .unwrap();
    let item = repo.set_checklist_completion(checklist[0].id, true).unwrap();
    assert!(item.is_completed);
    assert_eq!(
        repo.get_visit_by_id(visit.id).unwrap().unwrap().status,
        VisitStatus::Completed
    );

    // Un-completing one item re-resolves back to Incomplete.
    repo.set_checklist_completion(checklist[0].id, false)
        .unwrap();
    assert_eq!(
        repo.get_visit_by_id(visit.id).unwrap().unwrap().status,
        VisitStatus::Incomplete
    );
}

#[test]
fn cancellation_is_terminal() {
    let test_db = common::TestDb::new("test_cancellation.db");
    let repo = test_db.repo();
    let tiers_id = common::seed_directory(&test_db.pool());
    let visit = common::create_visit_with(
        &repo,
        tiers_id,
        &[(ChecklistCategory::Recovery, Some(10_000))],
    );

    repo.cancel_visit(visit.id).unwrap();
    assert_eq!(
        repo.get_visit_by_id(visit.id).unwrap().unwrap().status,
        VisitStatus::Cancelled
    );

    // Settling the objective afterwards must not resurrect the visit.
    repo.apply_collection(visit.id, Money::from_minor(10_000), None)
        .unwrap();
    assert_eq!(
        repo.get_visit_by_id(visit.id).unwrap().unwrap().status,
        VisitStatus::Cancelled
    );
}

#[test]
fn auto_note_reports_cumulative_totals() {
    let test_db = common::TestDb::new("test_auto_note.db");
    let repo = test_db.repo();
    let tiers_id = common::seed_directory(&test_db.pool());
    let visit = common::create_visit_with(
        &repo,
        tiers_id,
        &[(ChecklistCategory::Recovery, Some(100_000))],
    );

    repo.apply_collection(visit.id, Money::from_minor(40_000), None)
        .unwrap();
    let second = repo
        .apply_collection(visit.id, Money::from_minor(25_000), None)
        .unwrap();
    assert!(second.entry.notes.contains("Total collected: 650.00"));
    assert!(second.entry.notes.contains("Remaining: 350.00"));

    // A caller-provided note is stored verbatim.
    let third = repo
        .apply_collection(visit.id, Money::from_minor(1_000), Some("paid in cash"))
        .unwrap();
    assert_eq!(third.entry.notes, "paid in cash");
}

#[test]
fn recovery_report_aggregates_per_objective() {
    let test_db = common::TestDb::new("test_recovery_report.db");
    let repo = test_db.repo();
    let tiers_id = common::seed_directory(&test_db.pool());

    // One visit half-collected, one untouched.
    let collected = common::create_visit_with(
        &repo,
        tiers_id,
        &[(ChecklistCategory::Recovery, Some(100_000))],
    );
    let untouched = common::create_visit_with(
        &repo,
        tiers_id,
        &[(ChecklistCategory::Recovery, Some(20_000))],
    );
    repo.apply_collection(collected.id, Money::from_minor(50_000), None)
        .unwrap();

    let report = repo.recovery_report("C001").unwrap();
    assert_eq!(report.len(), 2);

    let first = report.iter().find(|r| r.visit_id == collected.id).unwrap();
    assert_eq!(first.expected_amount, Money::from_minor(100_000));
    assert_eq!(first.collected_amount, Money::from_minor(50_000));
    assert_eq!(first.remaining_amount, Money::from_minor(50_000));
    assert_eq!(first.client_name, "Epicerie du Port");
    assert!(first.last_collection_date.is_some());

    let second = report.iter().find(|r| r.visit_id == untouched.id).unwrap();
    assert_eq!(second.collected_amount, Money::ZERO);
    // Never collected against: remaining falls back to the full expected.
    assert_eq!(second.remaining_amount, Money::from_minor(20_000));
    assert!(second.last_collection_date.is_none());
}

#[test]
fn orders_require_a_place_order_objective() {
    let test_db = common::TestDb::new("test_orders.db");
    let repo = test_db.repo();
    let tiers_id = common::seed_directory(&test_db.pool());

    let without = common::create_visit_with(
        &repo,
        tiers_id,
        &[(ChecklistCategory::Recovery, Some(10_000))],
    );
    let order = NewOrder::new(
        without.id,
        "ORD-1".to_string(),
        vec![NewOrderLine {
            article_ref: "A-10".to_string(),
            quantity: 3,
            unit_price: Money::from_minor(2_50),
        }],
    )
    .unwrap();
    let err = repo.create_order(&order).unwrap_err();
    assert!(matches!(err, RepositoryError::PreconditionFailed(_)));

    let with = common::create_visit_with(&repo, tiers_id, &[(ChecklistCategory::PlaceOrder, None)]);
    let order = NewOrder::new(
        with.id,
        "ORD-2".to_string(),
        vec![
            NewOrderLine {
                article_ref: "A-10".to_string(),
                quantity: 3,
                unit_price: Money::from_minor(2_50),
            },
            NewOrderLine {
                article_ref: "A-11".to_string(),
                quantity: 2,
                unit_price: Money::from_minor(10_00),
            },
        ],
    )
    .unwrap();
    let created = repo.create_order(&order).unwrap();
    assert_eq!(created.total_amount, Money::from_minor(27_50));
    assert_eq!(created.lines.len(), 2);

    // Attaching the order does not complete the objective by itself.
    let checklist = repo.list_checklist_by_visit(with.id).unwrap();
    assert!(!checklist[0].is_completed);

    let fetched = repo.get_order_by_id(created.id).unwrap().unwrap();
    assert_eq!(fetched.order_ref, "ORD-2");
    assert_eq!(fetched.lines.len(), 2);
}

#[test]
fn competitor_products_require_their_objective() {
    let test_db = common::TestDb::new("test_competitor_products.db");
    let repo = test_db.repo();
    let tiers_id = common::seed_directory(&test_db.pool());

    let without =
        common::create_visit_with(&repo, tiers_id, &[(ChecklistCategory::PlaceOrder, None)]);
    let product = NewCompetitorProduct::new(
        without.id,
        "Rival Cola".to_string(),
        Money::from_minor(1_50),
        None,
    )
    .unwrap();
    let err = repo.create_competitor_product(&product).unwrap_err();
    assert!(matches!(err, RepositoryError::PreconditionFailed(_)));

    let with = common::create_visit_with(
        &repo,
        tiers_id,
        &[(ChecklistCategory::CompetitorProduct, None)],
    );
    let product = NewCompetitorProduct::new(
        with.id,
        "Rival Cola".to_string(),
        Money::from_minor(1_50),
        Some("seen at the counter".to_string()),
    )
    .unwrap();
    let created = repo.create_competitor_product(&product).unwrap();
    assert_eq!(created.product_name, "Rival Cola");
    assert_eq!(created.notes.as_deref(), Some("seen at the counter"));
}

#[test]
fn list_visits_and_upcoming_window() {
    let test_db = common::TestDb::new("test_list_visits.db");
    let repo = test_db.repo();
    let tiers_id = common::seed_directory(&test_db.pool());

    let v1 = common::create_visit_with(
        &repo,
        tiers_id,
        &[(ChecklistCategory::Recovery, Some(10_000))],
    );
    let v2 = common::create_visit_with(&repo, tiers_id, &[(ChecklistCategory::PlaceOrder, None)]);
    repo.cancel_visit(v2.id).unwrap();

    let visits = repo.list_visits_by_commercial("C001").unwrap();
    assert_eq!(visits.len(), 2);
    assert!(repo.list_visits_by_commercial("C999").unwrap().is_empty());

    // Both visits were scheduled "now"; the cancelled one is skipped.
    let from = v1.visit_date - chrono::Duration::hours(1);
    let to = v1.visit_date + chrono::Duration::hours(24);
    let upcoming = repo.list_upcoming_visits(from, to).unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].id, v1.id);
}

#[test]
fn collections_advance_the_optimistic_version_guard() {
    use diesel::prelude::*;
    use tournee::schema::visit_checklists;

    let test_db = common::TestDb::new("test_version_guard.db");
    let repo = test_db.repo();
    let tiers_id = common::seed_directory(&test_db.pool());
    let visit = common::create_visit_with(
        &repo,
        tiers_id,
        &[(ChecklistCategory::Recovery, Some(100_000))],
    );

    repo.apply_collection(visit.id, Money::from_minor(40_000), None)
        .unwrap();

    let checklist = repo.list_checklist_by_visit(visit.id).unwrap();
    assert_eq!(checklist[0].version, 1);

    // A writer still holding the pre-collection snapshot matches no row.
    let mut conn = test_db.pool().get().unwrap();
    let affected = diesel::update(
        visit_checklists::table
            .find(checklist[0].id)
            .filter(visit_checklists::version.eq(0)),
    )
    .set(visit_checklists::is_completed.eq(true))
    .execute(&mut conn)
    .unwrap();
    assert_eq!(affected, 0);

    let checklist = repo.list_checklist_by_visit(visit.id).unwrap();
    assert!(!checklist[0].is_completed);
}
