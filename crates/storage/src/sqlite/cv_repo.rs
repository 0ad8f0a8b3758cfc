use chrono::{DateTime, Utc};
use signcode_core::model::Cv;
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{conn, ser};
use crate::repository::{CvRepository, StorageError, StoredCv, decode_cv, encode_cv};

#[async_trait::async_trait]
impl CvRepository for SqliteRepository {
    async fn save_cv(
        &self,
        owner: &str,
        cv: &Cv,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let body = encode_cv(cv)?;
        sqlx::query(
            r"
            INSERT INTO cvs (owner, body, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(owner) DO UPDATE SET
                body = excluded.body,
                updated_at = excluded.updated_at
            ",
        )
        .bind(owner)
        .bind(body)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;
        Ok(())
    }

    async fn load_cv(&self, owner: &str) -> Result<Option<StoredCv>, StorageError> {
        let row = sqlx::query("SELECT body, updated_at FROM cvs WHERE owner = ?1")
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let body: String = row.try_get("body").map_err(ser)?;
        let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(ser)?;
        Ok(Some(StoredCv {
            cv: decode_cv(&body)?,
            updated_at,
        }))
    }
}
