use actix_web::{HttpResponse, Responder, post, web};
use validator::Validate;

use crate::dto::competitor_product::{CompetitorProductResponse, CreateCompetitorProductRequest};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{WRITE_ROLES, ensure_any_role, error_response};
use crate::services::competitor_product as competitor_product_service;

#[post("/visits/{id}/competitor-products")]
pub async fn create_competitor_product(
    path: web::Path<i32>,
    payload: web::Json<CreateCompetitorProductRequest>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(resp) = ensure_any_role(&user, WRITE_ROLES) {
        return resp;
    }
    if let Err(err) = payload.validate() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": err.to_string() }));
    }
    let new_product = match payload.into_inner().into_domain(path.into_inner()) {
        Ok(new_product) => new_product,
        Err(err) => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": err.to_string() }));
        }
    };
    match competitor_product_service::create_competitor_product(repo.get_ref(), &new_product) {
        Ok(product) => HttpResponse::Created().json(CompetitorProductResponse::from(product)),
        Err(err) => error_response(err),
    }
}
