use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use paye_core::db::{KeyValueStore, Mutation, RepositoryError};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions};
use sqlx::{Executor, Sqlite};
use tracing::{debug, warn};

/// How long a writer waits for another connection's lock before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens `database_url`, creating the file if needed.
    ///
    /// In-memory databases are private to a connection, so they get a single
    /// connection that is never recycled.
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| RepositoryError::Connection(e.to_string()))?
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT);

        let pool_options = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        debug!(url = database_url, "Opened SQLite store");
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| db_error(sqlx::Error::from(e)))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn db_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

async fn upsert<'e, E>(
    executor: E,
    key: &str,
    value: &str,
) -> Result<(), RepositoryError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

    sqlx::query(
        "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )
    .bind(key)
    .bind(value)
    .bind(&now)
    .execute(executor)
    .await
    .map_err(db_error)?;

    Ok(())
}

/// Read, mutate and write `key` on a connection that already holds the
/// write lock.
async fn read_modify_write(
    conn: &mut SqliteConnection,
    key: &str,
    mutation: Mutation<'_>,
) -> Result<(), RepositoryError> {
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv_store WHERE key = ?")
        .bind(key)
        .fetch_optional(&mut *conn)
        .await
        .map_err(db_error)?;

    let next = mutation(row.map(|(value,)| value))?;
    upsert(&mut *conn, key, &next).await
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, RepositoryError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(row.map(|(value,)| value))
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), RepositoryError> {
        upsert(&self.pool, key, value).await
    }

    async fn delete(
        &self,
        key: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn update(
        &self,
        key: &str,
        mutation: Mutation<'_>,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.pool.acquire().await.map_err(db_error)?;

        // IMMEDIATE takes the write lock before the read; other writers wait
        // up to BUSY_TIMEOUT.
        sqlx::query("BEGIN IMMEDIATE")
            .execute(&mut *conn)
            .await
            .map_err(db_error)?;

        let outcome = match read_modify_write(&mut *conn, key, mutation).await {
            Ok(()) => sqlx::query("COMMIT")
                .execute(&mut *conn)
                .await
                .map(|_| ())
                .map_err(db_error),
            Err(e) => Err(e),
        };

        if let Err(e) = &outcome {
            if let Err(rollback) = sqlx::query("ROLLBACK").execute(&mut *conn).await {
                warn!(key, error = %rollback, "Rollback after failed update also failed");
            }
            debug!(key, error = %e, "Update rolled back");
        }

        outcome
    }
}
