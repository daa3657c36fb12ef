use diesel::prelude::*;

use crate::domain::directory::Tiers;
use crate::models::directory::Tiers as DbTiers;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, DirectoryReader};

impl DirectoryReader for DieselRepository {
    fn tiers_exists(&self, tiers_id: i32) -> RepositoryResult<bool> {
        use crate::schema::tiers;

        let mut conn = self.conn()?;
        let count: i64 = tiers::table.find(tiers_id).count().get_result(&mut conn)?;
        Ok(count > 0)
    }

    fn get_tiers_by_id(&self, tiers_id: i32) -> RepositoryResult<Option<Tiers>> {
        use crate::schema::tiers;

        let mut conn = self.conn()?;
        let row = tiers::table
            .find(tiers_id)
            .first::<DbTiers>(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn commercial_exists(&self, cref: &str) -> RepositoryResult<bool> {
        use crate::schema::commercials;

        let mut conn = self.conn()?;
        let count: i64 = commercials::table
            .filter(commercials::cref.eq(cref))
            .count()
            .get_result(&mut conn)?;
        Ok(count > 0)
    }
}
