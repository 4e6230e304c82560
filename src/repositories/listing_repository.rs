use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::listing::{JobListing, ListingFields, Location};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn insert(&self, id: Uuid, fields: ListingFields) -> Result<JobListing>;

    async fn get(&self, id: Uuid) -> Result<Option<JobListing>>;

    /// Every listing, newest `date_posted` first.
    async fn list(&self) -> Result<Vec<JobListing>>;

    async fn replace(&self, id: Uuid, fields: ListingFields) -> Result<Option<JobListing>>;

    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn count(&self) -> Result<i64>;

    /// Listings with `expiry_date >= now`, soonest first.
    async fn upcoming(&self, now: DateTime<Utc>, limit: i64) -> Result<Vec<JobListing>>;

    /// Most recently created listings first.
    async fn recent(&self, limit: i64) -> Result<Vec<JobListing>>;
}

const LISTING_COLUMNS: &str = "id, title, company, company_url, company_logo, industry, \
     employment_type, country, state, city, street, zip_code, description, responsibilities, \
     qualifications, education, experience, date_posted, expiry_date, structured_data, \
     created_at, updated_at";

#[derive(Debug, FromRow)]
struct ListingRow {
    id: Uuid,
    title: String,
    company: String,
    company_url: String,
    company_logo: String,
    industry: String,
    employment_type: String,
    country: String,
    state: String,
    city: String,
    street: String,
    zip_code: String,
    description: String,
    responsibilities: Vec<String>,
    qualifications: Vec<String>,
    education: String,
    experience: String,
    date_posted: DateTime<Utc>,
    expiry_date: DateTime<Utc>,
    structured_data: Option<JsonValue>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ListingRow> for JobListing {
    type Error = Error;

    fn try_from(row: ListingRow) -> Result<Self> {
        let employment_type = row.employment_type.parse().map_err(Error::Internal)?;
        Ok(Self {
            id: row.id,
            title: row.title,
            company: row.company,
            company_url: row.company_url,
            company_logo: row.company_logo,
            industry: row.industry,
            employment_type,
            location: Location {
                country: row.country,
                state: row.state,
                city: row.city,
                street: row.street,
                zip_code: row.zip_code,
            },
            description: row.description,
            responsibilities: row.responsibilities,
            qualifications: row.qualifications,
            education: row.education,
            experience: row.experience,
            date_posted: row.date_posted,
            expiry_date: row.expiry_date,
            schema: row.structured_data,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_listings(rows: Vec<ListingRow>) -> Result<Vec<JobListing>> {
    rows.into_iter().map(JobListing::try_from).collect()
}

#[derive(Clone)]
pub struct PgListingRepository {
    pool: PgPool,
}

impl PgListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingRepository for PgListingRepository {
    async fn insert(&self, id: Uuid, fields: ListingFields) -> Result<JobListing> {
        let query = format!(
            r#"
            INSERT INTO jobs (
                id, title, company, company_url, company_logo, industry,
                employment_type, country, state, city, street, zip_code,
                description, responsibilities, qualifications, education, experience,
                date_posted, expiry_date, structured_data
            ) VALUES (
                $1,$2,$3,$4,$5,$6,
                $7,$8,$9,$10,$11,$12,
                $13,$14,$15,$16,$17,
                $18,$19,$20
            )
            RETURNING {}
            "#,
            LISTING_COLUMNS
        );
        let row = sqlx::query_as::<_, ListingRow>(&query)
            .bind(id)
            .bind(fields.title)
            .bind(fields.company)
            .bind(fields.company_url)
            .bind(fields.company_logo)
            .bind(fields.industry)
            .bind(fields.employment_type.as_str())
            .bind(fields.location.country)
            .bind(fields.location.state)
            .bind(fields.location.city)
            .bind(fields.location.street)
            .bind(fields.location.zip_code)
            .bind(fields.description)
            .bind(fields.responsibilities)
            .bind(fields.qualifications)
            .bind(fields.education)
            .bind(fields.experience)
            .bind(fields.date_posted)
            .bind(fields.expiry_date)
            .bind(fields.schema)
            .fetch_one(&self.pool)
            .await?;

        row.try_into()
    }

    async fn get(&self, id: Uuid) -> Result<Option<JobListing>> {
        let query = format!("SELECT {} FROM jobs WHERE id = $1", LISTING_COLUMNS);
        let row = sqlx::query_as::<_, ListingRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(JobListing::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<JobListing>> {
        let query = format!(
            "SELECT {} FROM jobs ORDER BY date_posted DESC",
            LISTING_COLUMNS
        );
        let rows = sqlx::query_as::<_, ListingRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        into_listings(rows)
    }

    async fn replace(&self, id: Uuid, fields: ListingFields) -> Result<Option<JobListing>> {
        let query = format!(
            r#"
            UPDATE jobs
            SET
                title = $2,
                company = $3,
                company_url = $4,
                company_logo = $5,
                industry = $6,
                employment_type = $7,
                country = $8,
                state = $9,
                city = $10,
                street = $11,
                zip_code = $12,
                description = $13,
                responsibilities = $14,
                qualifications = $15,
                education = $16,
                experience = $17,
                date_posted = $18,
                expiry_date = $19,
                structured_data = $20,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            LISTING_COLUMNS
        );
        let row = sqlx::query_as::<_, ListingRow>(&query)
            .bind(id)
            .bind(fields.title)
            .bind(fields.company)
            .bind(fields.company_url)
            .bind(fields.company_logo)
            .bind(fields.industry)
            .bind(fields.employment_type.as_str())
            .bind(fields.location.country)
            .bind(fields.location.state)
            .bind(fields.location.city)
            .bind(fields.location.street)
            .bind(fields.location.zip_code)
            .bind(fields.description)
            .bind(fields.responsibilities)
            .bind(fields.qualifications)
            .bind(fields.education)
            .bind(fields.experience)
            .bind(fields.date_posted)
            .bind(fields.expiry_date)
            .bind(fields.schema)
            .fetch_optional(&self.pool)
            .await?;

        row.map(JobListing::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(res.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn upcoming(&self, now: DateTime<Utc>, limit: i64) -> Result<Vec<JobListing>> {
        let query = format!(
            "SELECT {} FROM jobs WHERE expiry_date >= $1 ORDER BY expiry_date ASC LIMIT $2",
            LISTING_COLUMNS
        );
        let rows = sqlx::query_as::<_, ListingRow>(&query)
            .bind(now)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        into_listings(rows)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<JobListing>> {
        let query = format!(
            "SELECT {} FROM jobs ORDER BY created_at DESC LIMIT $1",
            LISTING_COLUMNS
        );
        let rows = sqlx::query_as::<_, ListingRow>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        into_listings(rows)
    }
}
