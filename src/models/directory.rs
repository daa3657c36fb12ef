use diesel::prelude::*;

use crate::domain::directory::{Commercial as DomainCommercial, Tiers as DomainTiers};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::tiers)]
/// Diesel model for [`crate::domain::directory::Tiers`].
pub struct Tiers {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::commercials)]
/// Diesel model for [`crate::domain::directory::Commercial`].
pub struct Commercial {
    pub id: i32,
    pub cref: String,
    pub name: String,
    pub email: Option<String>,
}

impl From<Tiers> for DomainTiers {
    fn from(row: Tiers) -> Self {
        Self {
            id: row.id,
            name: row.name,
            address: row.address,
        }
    }
}

impl From<Commercial> for DomainCommercial {
    fn from(row: Commercial) -> Self {
        Self {
            id: row.id,
            cref: row.cref,
            name: row.name,
            email: row.email,
        }
    }
}
