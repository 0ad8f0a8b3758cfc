use std::sync::Arc;
use std::time::Duration;

use sqlx::{Row, SqlitePool, sqlite::SqlitePoolOptions};
use thiserror::Error;

use crate::repository::{CourseRepository, CvRepository, Storage};

mod course_repo;
mod cv_repo;
mod mapping;
mod migrate;

/// Run on every new connection. Lessons cascade with their course, and CV
/// saves from the UI may overlap catalog reads.
const CONNECTION_PRAGMAS: &[&str] = &[
    "PRAGMA foreign_keys = ON;",
    "PRAGMA journal_mode = WAL;",
    "PRAGMA busy_timeout = 5000;",
];

/// Course catalog and saved CVs in one `SQLite` database.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// URL for a named in-memory database shared by every pool connection.
#[must_use]
pub fn shared_memory_url(name: &str) -> String {
    format!("sqlite:file:{name}?mode=memory&cache=shared")
}

impl SqliteRepository {
    /// Connect to `SQLite` using the given URL.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the connection cannot be established or a
    /// connection pragma is rejected.
    pub async fn connect(database_url: &str) -> Result<Self, SqliteInitError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    for pragma in CONNECTION_PRAGMAS.iter().copied() {
                        sqlx::query(pragma).execute(&mut *conn).await?;
                    }
                    Ok(())
                })
            })
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Connect to a fresh named in-memory database and migrate it.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if connecting or migrating fails.
    pub async fn open_shared_memory(name: &str) -> Result<Self, SqliteInitError> {
        let repo = Self::connect(&shared_memory_url(name)).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Apply any schema migrations not yet recorded.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if migration queries fail.
    pub async fn migrate(&self) -> Result<(), SqliteInitError> {
        migrate::run_migrations(&self.pool).await
    }

    /// Highest applied migration, or 0 before the first `migrate`.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the migrations table cannot be read.
    pub async fn schema_version(&self) -> Result<i64, SqliteInitError> {
        let row = sqlx::query("SELECT COALESCE(MAX(version), 0) AS version FROM schema_migrations")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("version")?)
    }
}

impl Storage {
    /// Build a `Storage` whose course and CV repositories share one pool.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if connection or migrations cannot be
    /// completed.
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::connect(database_url).await?;
        repo.migrate().await?;
        let courses: Arc<dyn CourseRepository> = Arc::new(repo.clone());
        let cvs: Arc<dyn CvRepository> = Arc::new(repo);
        Ok(Self { courses, cvs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_memory_urls_are_named() {
        assert_eq!(
            shared_memory_url("catalog"),
            "sqlite:file:catalog?mode=memory&cache=shared"
        );
    }

    #[tokio::test]
    async fn migrations_record_version_once() {
        let repo = SqliteRepository::open_shared_memory("memdb_schema_version")
            .await
            .unwrap();
        assert_eq!(repo.schema_version().await.unwrap(), 1);
        repo.migrate().await.unwrap();
        assert_eq!(repo.schema_version().await.unwrap(), 1);
    }
}
