use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use tournee::db::{DbPool, establish_connection_pool};
use tournee::domain::checklist::{ChecklistCategory, NewChecklistItem};
use tournee::domain::types::{Cref, Money};
use tournee::domain::visit::{NewVisit, Visit};
use tournee::repository::{DieselRepository, VisitWriter};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// File-backed SQLite database with migrations applied, removed on drop.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let database_url = dir.path().join(name).to_string_lossy().into_owned();
        let pool = establish_connection_pool(&database_url).expect("Failed to build pool");
        {
            let mut conn = pool.get().expect("Failed to get connection");
            conn.run_pending_migrations(MIGRATIONS)
                .expect("Failed to run migrations");
        }
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

/// Inserts one client and one commercial, returning the client id. The
/// commercial's Cref is `C001`.
pub fn seed_directory(pool: &DbPool) -> i32 {
    use tournee::schema::{commercials, tiers};

    let mut conn = pool.get().expect("Failed to get connection");
    let tiers_id: i32 = diesel::insert_into(tiers::table)
        .values((
            tiers::name.eq("Epicerie du Port"),
            tiers::address.eq(Some("12 quai des Docks")),
        ))
        .returning(tiers::id)
        .get_result(&mut conn)
        .expect("Failed to insert tiers");
    diesel::insert_into(commercials::table)
        .values((
            commercials::cref.eq("C001"),
            commercials::name.eq("Amine"),
            commercials::email.eq(Some("amine@example.com")),
        ))
        .execute(&mut conn)
        .expect("Failed to insert commercial");
    tiers_id
}

pub fn visit_date() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Creates a visit carrying the given checklist items, `(category,
/// expected_amount_minor)` pairs.
pub fn create_visit_with(
    repo: &DieselRepository,
    tiers_id: i32,
    items: &[(ChecklistCategory, Option<i64>)],
) -> Visit {
    let checklist = items
        .iter()
        .map(|(category, expected)| {
            NewChecklistItem::new(
                *category,
                String::new(),
                expected.map(Money::from_minor),
            )
            .expect("valid checklist item")
        })
        .collect();
    let new_visit = NewVisit::new(
        tiers_id,
        Cref::new("C001").expect("valid cref"),
        visit_date(),
        String::new(),
        checklist,
    )
    .expect("valid visit");
    repo.create_visit(&new_visit).expect("create visit")
}
