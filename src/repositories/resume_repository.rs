use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::resume::ResumeRecord;

/// Metadata index for dropped resumes. One row per upload, so concurrent
/// uploads never overwrite each other's entries.
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn insert(&self, record: ResumeRecord) -> Result<ResumeRecord>;

    /// Records tagged with `source`, newest upload first.
    async fn list_by_source(&self, source: &str) -> Result<Vec<ResumeRecord>>;

    async fn get(&self, id: Uuid) -> Result<Option<ResumeRecord>>;

    async fn find_by_filename(&self, filename: &str) -> Result<Option<ResumeRecord>>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}

const RESUME_COLUMNS: &str = "id, filename, original_name, upload_date, size, media_type, source";

#[derive(Clone)]
pub struct PgResumeRepository {
    pool: PgPool,
}

impl PgResumeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeRepository for PgResumeRepository {
    async fn insert(&self, record: ResumeRecord) -> Result<ResumeRecord> {
        let query = format!(
            r#"
            INSERT INTO resumes (id, filename, original_name, upload_date, size, media_type, source)
            VALUES ($1,$2,$3,$4,$5,$6,$7)
            RETURNING {}
            "#,
            RESUME_COLUMNS
        );
        let row = sqlx::query_as::<_, ResumeRecord>(&query)
            .bind(record.id)
            .bind(record.filename)
            .bind(record.original_name)
            .bind(record.upload_date)
            .bind(record.size)
            .bind(record.media_type)
            .bind(record.source)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_by_source(&self, source: &str) -> Result<Vec<ResumeRecord>> {
        let query = format!(
            "SELECT {} FROM resumes WHERE source = $1 ORDER BY upload_date DESC",
            RESUME_COLUMNS
        );
        let rows = sqlx::query_as::<_, ResumeRecord>(&query)
            .bind(source)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<ResumeRecord>> {
        let query = format!("SELECT {} FROM resumes WHERE id = $1", RESUME_COLUMNS);
        let row = sqlx::query_as::<_, ResumeRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_filename(&self, filename: &str) -> Result<Option<ResumeRecord>> {
        let query = format!("SELECT {} FROM resumes WHERE filename = $1", RESUME_COLUMNS);
        let row = sqlx::query_as::<_, ResumeRecord>(&query)
            .bind(filename)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
