use crate::domain::competitor_product::{CompetitorProduct, NewCompetitorProduct};
use crate::repository::CompetitorProductWriter;
use crate::services::{ServiceError, ServiceResult};

/// Records a competitor product sighting. The visit must carry a
/// CompetitorProduct checklist item.
pub fn create_competitor_product<R>(
    repo: &R,
    product: &NewCompetitorProduct,
) -> ServiceResult<CompetitorProduct>
where
    R: CompetitorProductWriter + ?Sized,
{
    repo.create_competitor_product(product)
        .map_err(ServiceError::from)
}
