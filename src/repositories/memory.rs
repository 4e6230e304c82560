//! In-process repositories used by `STORAGE_BACKEND=memory` and the
//! integration tests. Each collection sits behind its own lock, which gives
//! the same single-record atomicity the database provides and nothing more.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ApplicationRepository, ListingRepository, ResumeRepository};
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus, NewApplication};
use crate::models::listing::{JobListing, ListingFields};
use crate::models::resume::ResumeRecord;

#[derive(Default)]
pub struct MemoryListingRepository {
    rows: RwLock<Vec<JobListing>>,
}

impl MemoryListingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListingRepository for MemoryListingRepository {
    async fn insert(&self, id: Uuid, fields: ListingFields) -> Result<JobListing> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|l| l.id == id) {
            return Err(Error::DuplicateKey(format!(
                "A job with id {} already exists",
                id
            )));
        }
        let now = Utc::now();
        let listing = JobListing::from_fields(id, fields, now, now);
        rows.push(listing.clone());
        Ok(listing)
    }

    async fn get(&self, id: Uuid) -> Result<Option<JobListing>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|l| l.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<JobListing>> {
        let mut items = self.rows.read().await.clone();
        items.sort_by(|a, b| b.date_posted.cmp(&a.date_posted));
        Ok(items)
    }

    async fn replace(&self, id: Uuid, fields: ListingFields) -> Result<Option<JobListing>> {
        let mut rows = self.rows.write().await;
        let Some(slot) = rows.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };
        *slot = JobListing::from_fields(id, fields, slot.created_at, Utc::now());
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|l| l.id != id);
        Ok(rows.len() != before)
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.rows.read().await.len() as i64)
    }

    async fn upcoming(&self, now: DateTime<Utc>, limit: i64) -> Result<Vec<JobListing>> {
        let mut items: Vec<JobListing> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|l| l.expiry_date >= now)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.expiry_date.cmp(&b.expiry_date));
        items.truncate(limit.max(0) as usize);
        Ok(items)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<JobListing>> {
        let mut items = self.rows.read().await.clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items.truncate(limit.max(0) as usize);
        Ok(items)
    }
}

#[derive(Default)]
pub struct MemoryApplicationRepository {
    rows: RwLock<Vec<Application>>,
}

impl MemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApplicationRepository for MemoryApplicationRepository {
    async fn insert(&self, id: Uuid, application: NewApplication) -> Result<Application> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|a| a.id == id) {
            return Err(Error::DuplicateKey(format!(
                "An application with id {} already exists",
                id
            )));
        }
        let application = Application::from_new(id, application);
        rows.push(application.clone());
        Ok(application)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Application>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|a| a.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Application>> {
        let mut items = self.rows.read().await.clone();
        items.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
        Ok(items)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|a| a.id != id);
        Ok(rows.len() != before)
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.rows.read().await.len() as i64)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Application>> {
        let mut items = self.list().await?;
        items.truncate(limit.max(0) as usize);
        Ok(items)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<Application>> {
        let mut rows = self.rows.write().await;
        Ok(rows.iter_mut().find(|a| a.id == id).map(|a| {
            a.status = status;
            a.clone()
        }))
    }
}

#[derive(Default)]
pub struct MemoryResumeRepository {
    rows: RwLock<Vec<ResumeRecord>>,
}

impl MemoryResumeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeRepository for MemoryResumeRepository {
    async fn insert(&self, record: ResumeRecord) -> Result<ResumeRecord> {
        let mut rows = self.rows.write().await;
        if rows
            .iter()
            .any(|r| r.id == record.id || r.filename == record.filename)
        {
            return Err(Error::DuplicateKey(format!(
                "Resume {} already exists",
                record.filename
            )));
        }
        rows.push(record.clone());
        Ok(record)
    }

    async fn list_by_source(&self, source: &str) -> Result<Vec<ResumeRecord>> {
        let mut items: Vec<ResumeRecord> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|r| r.source == source)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
        Ok(items)
    }

    async fn get(&self, id: Uuid) -> Result<Option<ResumeRecord>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_filename(&self, filename: &str) -> Result<Option<ResumeRecord>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.filename == filename).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() != before)
    }
}
