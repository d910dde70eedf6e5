use chrono::NaiveDate;
use serde_json::Value;
use sqlx::PgPool;

use super::{document, Fields, RecordStore, StorageError};

/// Record store backed by the `entries` table. The primary key on
/// (collection, user_id, entry_date) makes `ON CONFLICT` the atomic
/// conditional write every upsert rides on.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RecordStore for PgRecordStore {
    async fn upsert(
        &self,
        collection: &str,
        user_id: &str,
        date: NaiveDate,
        fields: Fields,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO entries (collection, user_id, entry_date, fields)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (collection, user_id, entry_date)
            DO UPDATE SET fields = EXCLUDED.fields
            "#,
        )
        .bind(collection)
        .bind(user_id)
        .bind(date)
        .bind(Value::Object(fields))
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::new("upsert", collection, e))?;

        Ok(())
    }

    async fn find_one(
        &self,
        collection: &str,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<Fields>, StorageError> {
        let fields = sqlx::query_scalar::<_, Value>(
            r#"
            SELECT fields FROM entries
            WHERE collection = $1 AND user_id = $2 AND entry_date = $3
            "#,
        )
        .bind(collection)
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::new("find_one", collection, e))?;

        Ok(fields.map(|value| {
            let body = match value {
                Value::Object(map) => map,
                _ => Fields::new(),
            };
            document(user_id, date, body)
        }))
    }

    async fn delete_one(
        &self,
        collection: &str,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<(), StorageError> {
        sqlx::query(
            "DELETE FROM entries WHERE collection = $1 AND user_id = $2 AND entry_date = $3",
        )
        .bind(collection)
        .bind(user_id)
        .bind(date)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::new("delete_one", collection, e))?;

        Ok(())
    }

    async fn list_dates(
        &self,
        collection: &str,
        user_id: &str,
    ) -> Result<Vec<NaiveDate>, StorageError> {
        sqlx::query_scalar::<_, NaiveDate>(
            r#"
            SELECT entry_date FROM entries
            WHERE collection = $1 AND user_id = $2
            ORDER BY entry_date DESC
            "#,
        )
        .bind(collection)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::new("list_dates", collection, e))
    }
}
