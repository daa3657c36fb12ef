use crate::domain::checklist::ChecklistItem;
use crate::repository::{ChecklistReader, ChecklistWriter};
use crate::services::{ServiceError, ServiceResult};

/// Overrides the completion flag of a checklist item and re-resolves the
/// owning visit's status.
pub fn set_completion<R>(
    repo: &R,
    checklist_id: i32,
    completed: bool,
) -> ServiceResult<ChecklistItem>
where
    R: ChecklistWriter + ?Sized,
{
    repo.set_checklist_completion(checklist_id, completed)
        .map_err(ServiceError::from)
}

pub fn get_checklist_item<R>(repo: &R, checklist_id: i32) -> ServiceResult<ChecklistItem>
where
    R: ChecklistReader + ?Sized,
{
    repo.get_checklist_by_id(checklist_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn list_for_visit<R>(repo: &R, visit_id: i32) -> ServiceResult<Vec<ChecklistItem>>
where
    R: ChecklistReader + ?Sized,
{
    repo.list_checklist_by_visit(visit_id)
        .map_err(ServiceError::from)
}
