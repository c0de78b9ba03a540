//! Embedded schema migrations.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Error raised while applying migrations.
#[derive(Debug, thiserror::Error)]
#[error("failed to apply migrations: {message}")]
pub struct MigrationError {
    message: String,
}

impl MigrationError {
    fn new(message: impl ToString) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Apply pending migrations on a dedicated blocking connection.
///
/// # Errors
///
/// Returns [`MigrationError`] when the database is unreachable or a
/// migration fails.
pub async fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let database_url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut connection = PgConnection::establish(&database_url).map_err(MigrationError::new)?;
        let applied = connection
            .run_pending_migrations(MIGRATIONS)
            .map_err(MigrationError::new)?;
        info!(count = applied.len(), "database migrations applied");
        Ok::<(), MigrationError>(())
    })
    .await
    .map_err(MigrationError::new)?
}
