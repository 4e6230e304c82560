use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus, NewApplication};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn insert(&self, id: Uuid, application: NewApplication) -> Result<Application>;

    async fn get(&self, id: Uuid) -> Result<Option<Application>>;

    /// Every application, newest `applied_at` first.
    async fn list(&self) -> Result<Vec<Application>>;

    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn count(&self) -> Result<i64>;

    async fn recent(&self, limit: i64) -> Result<Vec<Application>>;

    async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<Application>>;
}

const APPLICATION_COLUMNS: &str = "id, job_id, first_name, last_name, email, phone, experience, \
     education, cover_letter, resume, applied_at, status";

#[derive(Debug, FromRow)]
struct ApplicationRow {
    id: Uuid,
    job_id: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    experience: String,
    education: String,
    cover_letter: String,
    resume: String,
    applied_at: DateTime<Utc>,
    status: String,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = Error;

    fn try_from(row: ApplicationRow) -> Result<Self> {
        let status = row.status.parse().map_err(Error::Internal)?;
        Ok(Self {
            id: row.id,
            job_id: row.job_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            experience: row.experience,
            education: row.education,
            cover_letter: row.cover_letter,
            resume: row.resume,
            applied_at: row.applied_at,
            status,
        })
    }
}

fn into_applications(rows: Vec<ApplicationRow>) -> Result<Vec<Application>> {
    rows.into_iter().map(Application::try_from).collect()
}

#[derive(Clone)]
pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    async fn insert(&self, id: Uuid, application: NewApplication) -> Result<Application> {
        let details = application.details;
        let query = format!(
            r#"
            INSERT INTO applications (
                id, job_id, first_name, last_name, email, phone,
                experience, education, cover_letter, resume, applied_at, status
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12)
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(id)
            .bind(details.job_id)
            .bind(details.first_name)
            .bind(details.last_name)
            .bind(details.email)
            .bind(details.phone)
            .bind(details.experience)
            .bind(details.education)
            .bind(details.cover_letter)
            .bind(application.resume)
            .bind(application.applied_at)
            .bind(application.status.as_str())
            .fetch_one(&self.pool)
            .await?;

        row.try_into()
    }

    async fn get(&self, id: Uuid) -> Result<Option<Application>> {
        let query = format!(
            "SELECT {} FROM applications WHERE id = $1",
            APPLICATION_COLUMNS
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Application::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Application>> {
        let query = format!(
            "SELECT {} FROM applications ORDER BY applied_at DESC",
            APPLICATION_COLUMNS
        );
        let rows = sqlx::query_as::<_, ApplicationRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        into_applications(rows)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(res.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applications")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Application>> {
        let query = format!(
            "SELECT {} FROM applications ORDER BY applied_at DESC LIMIT $1",
            APPLICATION_COLUMNS
        );
        let rows = sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        into_applications(rows)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<Application>> {
        let query = format!(
            "UPDATE applications SET status = $2 WHERE id = $1 RETURNING {}",
            APPLICATION_COLUMNS
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Application::try_from).transpose()
    }
}
