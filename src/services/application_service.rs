use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::application::{
    ApplicantDetails, Application, ApplicationStatus, NewApplication,
};
use crate::repositories::ApplicationRepository;
use crate::utils::time::now;

#[derive(Clone)]
pub struct ApplicationService {
    repo: Arc<dyn ApplicationRepository>,
}

impl ApplicationService {
    pub fn new(repo: Arc<dyn ApplicationRepository>) -> Self {
        Self { repo }
    }

    /// Persists a new application with a fresh id, `pending` status and the
    /// current time as `appliedAt`.
    pub async fn create(&self, details: ApplicantDetails, resume: String) -> Result<Application> {
        let new = NewApplication {
            details,
            resume,
            applied_at: now(),
            status: ApplicationStatus::Pending,
        };
        new.validate()?;

        let application = self.repo.insert(Uuid::new_v4(), new).await?;
        tracing::info!(
            application_id = %application.id,
            job_id = %application.job_id,
            "Application created"
        );
        Ok(application)
    }

    pub async fn list(&self) -> Result<Vec<Application>> {
        self.repo.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Application> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".into()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.repo.delete(id).await? {
            return Err(Error::NotFound("Application not found".into()));
        }
        tracing::info!(application_id = %id, "Application deleted");
        Ok(())
    }

    pub async fn count(&self) -> Result<i64> {
        self.repo.count().await
    }

    pub async fn recent(&self, limit: i64) -> Result<Vec<Application>> {
        self.repo.recent(limit).await
    }

    pub async fn update_status(&self, id: Uuid, status: ApplicationStatus) -> Result<Application> {
        let updated = self
            .repo
            .update_status(id, status)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".into()))?;
        tracing::info!(application_id = %id, status = %status, "Application status updated");
        Ok(updated)
    }
}
