use actix_web::HttpResponse;
use serde_json::json;

use crate::models::auth::AuthenticatedUser;
use crate::services::ServiceError;

pub mod checklist;
pub mod competitor_product;
pub mod order;
pub mod recovery;
pub mod visit;

/// Roles allowed to create or cancel visits.
pub const WRITE_ROLES: &[&str] = &["admin", "manager", "commercial"];

/// Maps a service error to its HTTP response.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Validation(msg) => HttpResponse::BadRequest().json(json!({ "error": msg })),
        ServiceError::PreconditionFailed(msg) => {
            HttpResponse::UnprocessableEntity().json(json!({ "error": msg }))
        }
        ServiceError::Conflict => {
            HttpResponse::Conflict().json(json!({ "error": "concurrent update, retry" }))
        }
        ServiceError::Unauthorized => HttpResponse::Unauthorized().finish(),
        ServiceError::Repository(msg) => {
            log::error!("internal error: {msg}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Rejects callers that carry none of the required roles.
pub fn ensure_any_role(user: &AuthenticatedUser, roles: &[&str]) -> Result<(), HttpResponse> {
    if user.has_any_role(roles) {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().finish())
    }
}
