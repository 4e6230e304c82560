use std::sync::Arc;

use uuid::Uuid;

use crate::dto::listing_dto::ListingPayload;
use crate::error::{Error, Result};
use crate::models::listing::JobListing;
use crate::repositories::ListingRepository;
use crate::utils::time::now;

#[derive(Clone)]
pub struct ListingService {
    repo: Arc<dyn ListingRepository>,
}

impl ListingService {
    pub fn new(repo: Arc<dyn ListingRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, payload: ListingPayload) -> Result<JobListing> {
        let fields = payload.into_fields(now())?;
        let listing = self.repo.insert(Uuid::new_v4(), fields).await?;
        tracing::info!(job_id = %listing.id, title = %listing.title, "Job listing created");
        Ok(listing)
    }

    /// Full replace. Dates omitted from `payload` are re-defaulted rather than
    /// carried over from the stored listing.
    pub async fn update(&self, id: Uuid, payload: ListingPayload) -> Result<JobListing> {
        let fields = payload.into_fields(now())?;
        let listing = self
            .repo
            .replace(id, fields)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".into()))?;
        tracing::info!(job_id = %id, "Job listing updated");
        Ok(listing)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<JobListing> {
        self.find(id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".into()))
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<JobListing>> {
        self.repo.get(id).await
    }

    pub async fn list(&self) -> Result<Vec<JobListing>> {
        self.repo.list().await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.repo.delete(id).await? {
            return Err(Error::NotFound("Job not found".into()));
        }
        tracing::info!(job_id = %id, "Job listing deleted");
        Ok(())
    }

    pub async fn count(&self) -> Result<i64> {
        self.repo.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::listing_repository::MockListingRepository;

    #[tokio::test]
    async fn delete_of_missing_listing_is_not_found() {
        let mut repo = MockListingRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(false));
        let service = ListingService::new(Arc::new(repo));

        let err = service.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn invalid_payload_never_reaches_the_repository() {
        let mut repo = MockListingRepository::new();
        repo.expect_insert().never();
        let service = ListingService::new(Arc::new(repo));

        let err = service.create(ListingPayload::default()).await.unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[tokio::test]
    async fn duplicate_key_from_repository_propagates() {
        let mut repo = MockListingRepository::new();
        repo.expect_insert()
            .returning(|_, _| Err(Error::DuplicateKey("A job with this ID already exists".into())));
        let service = ListingService::new(Arc::new(repo));

        let payload: ListingPayload = serde_json::from_value(serde_json::json!({
            "title": "T", "company": "C", "companyUrl": "u", "companyLogo": "l",
            "industry": "i", "type": "Contract",
            "location": {"country": "c", "state": "s", "city": "c", "street": "s", "zipCode": "z"},
            "description": "d", "education": "e", "experience": "x"
        }))
        .unwrap();
        let err = service.create(payload).await.unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(_)));
    }
}
