use actix_web::{HttpResponse, Responder, get, post, web};

use crate::dto::recovery::{CollectionResponse, CreateRecoveryRequest, RecoveryResponse};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{WRITE_ROLES, ensure_any_role, error_response};
use crate::services::recovery as recovery_service;

#[post("/visits/{id}/recovery")]
pub async fn record_collection(
    path: web::Path<i32>,
    payload: web::Json<CreateRecoveryRequest>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(resp) = ensure_any_role(&user, WRITE_ROLES) {
        return resp;
    }
    match recovery_service::record_collection(
        repo.get_ref(),
        path.into_inner(),
        payload.amount_collected,
        payload.notes.as_deref(),
    ) {
        Ok(report) => HttpResponse::Created().json(CollectionResponse::from(report)),
        Err(err) => error_response(err),
    }
}

#[get("/recoveries/commercial/{cref}")]
pub async fn list_recoveries_by_commercial(
    path: web::Path<String>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match recovery_service::list_collections_by_commercial(repo.get_ref(), &path.into_inner()) {
        Ok(entries) => HttpResponse::Ok().json(
            entries
                .into_iter()
                .map(RecoveryResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => error_response(err),
    }
}

#[get("/recoveries/{id}")]
pub async fn get_recovery(
    path: web::Path<i32>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match recovery_service::get_recovery(repo.get_ref(), path.into_inner()) {
        Ok(entry) => HttpResponse::Ok().json(RecoveryResponse::from(entry)),
        Err(err) => error_response(err),
    }
}
