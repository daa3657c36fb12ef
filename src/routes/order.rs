use actix_web::{HttpResponse, Responder, get, post, web};
use validator::Validate;

use crate::dto::order::{CreateOrderRequest, OrderResponse};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{WRITE_ROLES, ensure_any_role, error_response};
use crate::services::order as order_service;

#[post("/visits/{id}/orders")]
pub async fn create_order(
    path: web::Path<i32>,
    payload: web::Json<CreateOrderRequest>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(resp) = ensure_any_role(&user, WRITE_ROLES) {
        return resp;
    }
    if let Err(err) = payload.validate() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": err.to_string() }));
    }
    let new_order = match payload.into_inner().into_domain(path.into_inner()) {
        Ok(new_order) => new_order,
        Err(err) => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": err.to_string() }));
        }
    };
    match order_service::create_order(repo.get_ref(), &new_order) {
        Ok(order) => HttpResponse::Created().json(OrderResponse::from(order)),
        Err(err) => error_response(err),
    }
}

#[get("/orders/{id}")]
pub async fn get_order(
    path: web::Path<i32>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match order_service::get_order(repo.get_ref(), path.into_inner()) {
        Ok(order) => HttpResponse::Ok().json(OrderResponse::from(order)),
        Err(err) => error_response(err),
    }
}
