use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::recovery::RecoveryEntry as DomainRecoveryEntry;
use crate::domain::types::Money;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::recoveries)]
/// Diesel model for [`crate::domain::recovery::RecoveryEntry`].
pub struct Recovery {
    pub id: i32,
    pub visit_id: i32,
    pub amount_collected: i64,
    pub collection_date: NaiveDateTime,
    pub notes: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recoveries)]
/// Insertable form of [`Recovery`].
pub struct NewRecovery<'a> {
    pub visit_id: i32,
    pub amount_collected: i64,
    pub collection_date: NaiveDateTime,
    pub notes: &'a str,
}

impl From<Recovery> for DomainRecoveryEntry {
    fn from(row: Recovery) -> Self {
        Self {
            id: row.id,
            visit_id: row.visit_id,
            amount_collected: Money::from_minor(row.amount_collected),
            collection_date: row.collection_date,
            notes: row.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn recovery_into_domain() {
        let now = Utc::now().naive_utc();
        let row = Recovery {
            id: 4,
            visit_id: 8,
            amount_collected: 40_000,
            collection_date: now,
            notes: "partial settlement".to_string(),
        };
        let entry: DomainRecoveryEntry = row.into();
        assert_eq!(entry.id, 4);
        assert_eq!(entry.amount_collected, Money::from_minor(40_000));
        assert_eq!(entry.collection_date, now);
    }
}
