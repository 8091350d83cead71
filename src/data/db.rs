use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

const INITIAL_SCHEMA: &str =
    include_str!("../../migrations/2025-01-01-000000_create_cards/up.sql");

/// Per-connection SQLite settings.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        // Writers wait for the lock instead of failing with SQLITE_BUSY.
        conn.batch_execute("PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn build_pool(database_url: &str) -> Result<DbPool, r2d2::Error> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)
}

/// Creates the tables unless they already exist.
pub fn run_migrations(conn: &mut SqliteConnection) -> diesel::QueryResult<()> {
    let exists: bool = diesel::select(diesel::dsl::sql::<diesel::sql_types::Bool>(
        "EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'cards')",
    ))
    .get_result(conn)?;

    if exists {
        log::debug!("Schema already present");
        return Ok(());
    }

    log::info!("Creating database schema");
    conn.batch_execute(INITIAL_SCHEMA)
}
