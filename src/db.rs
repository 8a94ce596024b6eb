//! Database connection pool and migration management.
//!
//! Each service owns its own database and its own migration directory under
//! `migrations/<service>/`.

use sqlx::{Pool, Postgres};

use crate::config::ServiceKind;

/// Type alias for PostgreSQL connection pool.
pub type DbPool = Pool<Postgres>;

/// Create a new PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection string is invalid
/// - Cannot connect to PostgreSQL server
/// - Database authentication fails
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Run the migrations belonging to `service`.
///
/// Migrations are tracked in the `_sqlx_migrations` table of the service's
/// own database, so each migration runs only once.
pub async fn run_migrations(
    pool: &DbPool,
    service: ServiceKind,
) -> Result<(), sqlx::migrate::MigrateError> {
    // The macro reads migrations at compile time
    let mut migrator = match service {
        ServiceKind::Accounts => sqlx::migrate!("./migrations/accounts"),
        ServiceKind::Cards => sqlx::migrate!("./migrations/cards"),
        ServiceKind::Loans => sqlx::migrate!("./migrations/loans"),
    };
    // Services may share one database locally; versions of the others are not ours to check
    migrator.set_ignore_missing(true);
    migrator.run(pool).await
}
