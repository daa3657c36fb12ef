use actix_web::{HttpResponse, Responder, put, web};

use crate::domain::types::Money;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{WRITE_ROLES, ensure_any_role, error_response};
use crate::services::{checklist as checklist_service, recovery as recovery_service};

/// Records a collection against a specific Recovery checklist item. The raw
/// body is the decimal amount.
#[put("/checklist/{id}/recovery")]
pub async fn record_collection_for_checklist(
    path: web::Path<i32>,
    payload: web::Json<f64>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(resp) = ensure_any_role(&user, WRITE_ROLES) {
        return resp;
    }
    let amount = match Money::try_from_decimal(payload.into_inner()) {
        Ok(amount) => amount,
        Err(err) => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": err.to_string() }));
        }
    };
    match recovery_service::record_collection_for_checklist(
        repo.get_ref(),
        path.into_inner(),
        amount,
    ) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

/// Overrides the completion flag of a checklist item. The raw body is a
/// boolean.
#[put("/checklist/{id}/complete")]
pub async fn set_completion(
    path: web::Path<i32>,
    payload: web::Json<bool>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(resp) = ensure_any_role(&user, WRITE_ROLES) {
        return resp;
    }
    match checklist_service::set_completion(repo.get_ref(), path.into_inner(), payload.into_inner())
    {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}
