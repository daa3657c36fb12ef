use actix_web::{HttpResponse, Responder, get, post, put, web};
use validator::Validate;

use crate::domain::visit::NewVisit;
use crate::dto::recovery::ReportQuery;
use crate::dto::visit::{CreateVisitRequest, VisitResponse, VisitSummaryResponse};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{WRITE_ROLES, ensure_any_role, error_response};
use crate::services::notify::LogNotifier;
use crate::services::visit as visit_service;

#[post("/visits")]
pub async fn create_visit(
    payload: web::Json<CreateVisitRequest>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(resp) = ensure_any_role(&user, WRITE_ROLES) {
        return resp;
    }
    if let Err(err) = payload.validate() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": err.to_string() }));
    }
    let new_visit = match NewVisit::try_from(&*payload) {
        Ok(new_visit) => new_visit,
        Err(err) => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": err.to_string() }));
        }
    };

    match visit_service::create_visit(repo.get_ref(), &new_visit, &LogNotifier) {
        Ok(visit) => {
            let id = visit.id;
            match visit_service::get_visit(repo.get_ref(), id) {
                Ok((visit, checklist)) => HttpResponse::Created()
                    .json(VisitResponse::from_parts(visit, checklist)),
                Err(err) => error_response(err),
            }
        }
        Err(err) => error_response(err),
    }
}

#[get("/visits/{id}")]
pub async fn get_visit(
    path: web::Path<i32>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match visit_service::get_visit(repo.get_ref(), path.into_inner()) {
        Ok((visit, checklist)) => HttpResponse::Ok().json(VisitResponse::from_parts(visit, checklist)),
        Err(err) => error_response(err),
    }
}

#[get("/visits/commercial/{cref}")]
pub async fn list_visits_by_commercial(
    path: web::Path<String>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match visit_service::list_visits_by_commercial(repo.get_ref(), &path.into_inner()) {
        Ok(visits) => HttpResponse::Ok().json(
            visits
                .into_iter()
                .map(VisitSummaryResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => error_response(err),
    }
}

#[put("/visits/{id}/cancel")]
pub async fn cancel_visit(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(resp) = ensure_any_role(&user, WRITE_ROLES) {
        return resp;
    }
    match visit_service::cancel_visit(repo.get_ref(), path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

#[get("/visits/recovery-report")]
pub async fn recovery_report(
    query: web::Query<ReportQuery>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match crate::services::recovery::build_recovery_report(repo.get_ref(), &query.commercial_cref) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(err) => error_response(err),
    }
}
