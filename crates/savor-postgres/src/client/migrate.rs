//! Embedded schema migrations.

use std::time::Instant;

use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use crate::{MIGRATIONS, PgClient, PgError, PgResult, TRACING_TARGET_MIGRATION};

/// Applies every pending migration and returns the applied versions.
///
/// Calling this on an up-to-date database is a no-op.
#[tracing::instrument(skip(pg), target = TRACING_TARGET_MIGRATION)]
pub async fn run_pending_migrations(pg: &PgClient) -> PgResult<Vec<String>> {
    let start = Instant::now();
    let conn = pg.get_pooled_connection().await?;

    // The migration harness is synchronous, so it runs on the blocking pool.
    let mut conn: AsyncConnectionWrapper<_> = conn.into();
    let versions = spawn_blocking(move || {
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.into_iter().map(|v| v.to_string()).collect::<Vec<_>>())
    })
    .await
    .map_err(|error| {
        tracing::error!(target: TRACING_TARGET_MIGRATION, error = %error, "Migration task panicked");
        PgError::Migration(error.into())
    })?
    .map_err(|error| {
        tracing::error!(target: TRACING_TARGET_MIGRATION, error = %error, "Migration failed");
        PgError::Migration(error)
    })?;

    tracing::info!(
        target: TRACING_TARGET_MIGRATION,
        duration = ?start.elapsed(),
        applied = versions.len(),
        "Database schema is up to date"
    );

    Ok(versions)
}

/// Extension trait adding migrations to [`PgClient`].
pub trait PgClientMigrationExt {
    /// Applies every pending migration.
    fn run_pending_migrations(&self) -> impl Future<Output = PgResult<Vec<String>>> + Send;
}

impl PgClientMigrationExt for PgClient {
    fn run_pending_migrations(&self) -> impl Future<Output = PgResult<Vec<String>>> + Send {
        run_pending_migrations(self)
    }
}
