use crate::domain::order::{NewOrder, Order};
use crate::repository::{OrderReader, OrderWriter};
use crate::services::{ServiceError, ServiceResult};

/// Attaches an order to a visit. The visit must carry a PlaceOrder checklist
/// item; the order does not complete that item by itself.
pub fn create_order<R>(repo: &R, new_order: &NewOrder) -> ServiceResult<Order>
where
    R: OrderWriter + ?Sized,
{
    repo.create_order(new_order).map_err(ServiceError::from)
}

pub fn get_order<R>(repo: &R, order_id: i32) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    repo.get_order_by_id(order_id)?.ok_or(ServiceError::NotFound)
}
