use chrono::NaiveDateTime;

use crate::domain::checklist::ChecklistItem;
use crate::domain::visit::{NewVisit, Visit, VisitStatus};
use crate::repository::{ChecklistReader, DirectoryReader, VisitReader, VisitWriter};
use crate::services::notify::VisitNotifier;
use crate::services::{ServiceError, ServiceResult};

/// Creates a visit with its initial checklist after validating that both the
/// client and the commercial exist.
pub fn create_visit<R>(
    repo: &R,
    new_visit: &NewVisit,
    notifier: &dyn VisitNotifier,
) -> ServiceResult<Visit>
where
    R: DirectoryReader + VisitWriter + ?Sized,
{
    if !repo.tiers_exists(new_visit.tiers_id)? {
        return Err(ServiceError::NotFound);
    }
    if !repo.commercial_exists(new_visit.commercial_cref.as_str())? {
        return Err(ServiceError::NotFound);
    }

    let visit = repo.create_visit(new_visit)?;
    notifier.visit_created(&visit);
    Ok(visit)
}

/// Fetches a visit together with its checklist.
pub fn get_visit<R>(repo: &R, visit_id: i32) -> ServiceResult<(Visit, Vec<ChecklistItem>)>
where
    R: VisitReader + ChecklistReader + ?Sized,
{
    let visit = repo
        .get_visit_by_id(visit_id)?
        .ok_or(ServiceError::NotFound)?;
    let checklist = repo.list_checklist_by_visit(visit_id)?;
    Ok((visit, checklist))
}

/// Lists the visits planned or performed by a commercial, in schedule order.
pub fn list_visits_by_commercial<R>(repo: &R, cref: &str) -> ServiceResult<Vec<Visit>>
where
    R: VisitReader + ?Sized,
{
    repo.list_visits_by_commercial(cref)
        .map_err(ServiceError::from)
}

/// Cancels a visit. Cancellation is terminal: later checklist updates no
/// longer change the visit status.
pub fn cancel_visit<R>(repo: &R, visit_id: i32) -> ServiceResult<()>
where
    R: VisitReader + VisitWriter + ?Sized,
{
    let visit = repo
        .get_visit_by_id(visit_id)?
        .ok_or(ServiceError::NotFound)?;
    if visit.status == VisitStatus::Cancelled {
        return Ok(());
    }
    repo.cancel_visit(visit_id).map_err(ServiceError::from)
}

/// Pushes a reminder for every visit due in the `(from, to]` window, naming
/// the visited client when the directory still knows it. Returns the number
/// of reminders sent.
pub fn notify_upcoming_visits<R>(
    repo: &R,
    from: NaiveDateTime,
    to: NaiveDateTime,
    notifier: &dyn VisitNotifier,
) -> ServiceResult<usize>
where
    R: VisitReader + DirectoryReader + ?Sized,
{
    let visits = repo.list_upcoming_visits(from, to)?;
    for visit in &visits {
        let client = repo.get_tiers_by_id(visit.tiers_id)?;
        notifier.visit_upcoming(visit, client.as_ref());
    }
    Ok(visits.len())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;
    use crate::domain::checklist::{ChecklistCategory, NewChecklistItem};
    use crate::domain::directory::Tiers;
    use crate::domain::types::{Cref, Money};
    use crate::repository::mock::MockRepository;

    fn new_visit() -> NewVisit {
        NewVisit::new(
            1,
            Cref::new("C001").unwrap(),
            Utc::now().naive_utc(),
            String::new(),
            vec![
                NewChecklistItem::new(
                    ChecklistCategory::Recovery,
                    String::new(),
                    Some(Money::from_minor(100_000)),
                )
                .unwrap(),
            ],
        )
        .unwrap()
    }

    struct NullNotifier;
    impl VisitNotifier for NullNotifier {
        fn visit_created(&self, _visit: &Visit) {}
        fn visit_upcoming(&self, _visit: &Visit, _client: Option<&Tiers>) {}
    }

    fn due_visit(id: i32, tiers_id: i32) -> Visit {
        Visit {
            id,
            tiers_id,
            commercial_cref: "C001".to_string(),
            visit_date: Utc::now().naive_utc(),
            note: String::new(),
            status: VisitStatus::Incomplete,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn reminders_resolve_the_visited_client() {
        struct Recorder(Mutex<Vec<String>>);
        impl VisitNotifier for Recorder {
            fn visit_created(&self, _visit: &Visit) {}
            fn visit_upcoming(&self, _visit: &Visit, client: Option<&Tiers>) {
                let name = client.map(|t| t.name.clone()).unwrap_or_default();
                self.0.lock().unwrap().push(name);
            }
        }

        let mut repo = MockRepository::new();
        repo.expect_list_upcoming_visits()
            .return_once(|_, _| Ok(vec![due_visit(1, 10), due_visit(2, 11)]));
        repo.expect_get_tiers_by_id().returning(|tiers_id| {
            Ok((tiers_id == 10).then(|| Tiers {
                id: tiers_id,
                name: "Epicerie du Port".to_string(),
                address: None,
            }))
        });

        let recorder = Recorder(Mutex::new(Vec::new()));
        let now = Utc::now().naive_utc();
        let sent =
            notify_upcoming_visits(&repo, now, now + chrono::Duration::hours(24), &recorder)
                .unwrap();

        assert_eq!(sent, 2);
        let names = recorder.0.lock().unwrap();
        assert_eq!(*names, vec!["Epicerie du Port".to_string(), String::new()]);
    }

    #[test]
    fn create_visit_rejects_unknown_tiers() {
        let mut repo = MockRepository::new();
        repo.expect_tiers_exists().return_once(|_| Ok(false));
        repo.expect_create_visit().times(0);

        let result = create_visit(&repo, &new_visit(), &NullNotifier);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn create_visit_rejects_unknown_commercial() {
        let mut repo = MockRepository::new();
        repo.expect_tiers_exists().return_once(|_| Ok(true));
        repo.expect_commercial_exists().return_once(|_| Ok(false));
        repo.expect_create_visit().times(0);

        let result = create_visit(&repo, &new_visit(), &NullNotifier);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn cancel_visit_is_idempotent_on_cancelled() {
        let mut repo = MockRepository::new();
        repo.expect_get_visit_by_id().return_once(|id| {
            Ok(Some(Visit {
                id,
                tiers_id: 1,
                commercial_cref: "C001".to_string(),
                visit_date: Utc::now().naive_utc(),
                note: String::new(),
                status: VisitStatus::Cancelled,
                created_at: Utc::now().naive_utc(),
            }))
        });
        repo.expect_cancel_visit().times(0);

        assert!(cancel_visit(&repo, 7).is_ok());
    }
}
