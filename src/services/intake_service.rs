use uuid::Uuid;

use crate::dto::application_dto::{ApplicationForm, UploadedFile};
use crate::error::{Error, Result};
use crate::services::application_service::ApplicationService;
use crate::services::file_store::{FileStore, UploadPolicy, RESUME_DIRECTORY};
use crate::services::listing_service::ListingService;
use crate::services::notification_service::NotificationService;

/// Turns an applicant's form and resume into a stored application and an
/// admin notification.
///
/// The steps run strictly in order and nothing is compensated: a resume that
/// was stored stays stored, and an application whose job cannot be found is
/// kept even though the submission is reported as failed.
#[derive(Clone)]
pub struct IntakeService {
    files: FileStore,
    applications: ApplicationService,
    listings: ListingService,
    notifier: NotificationService,
}

impl IntakeService {
    pub fn new(
        files: FileStore,
        applications: ApplicationService,
        listings: ListingService,
        notifier: NotificationService,
    ) -> Self {
        Self {
            files,
            applications,
            listings,
            notifier,
        }
    }

    pub async fn submit(&self, form: ApplicationForm, resume: Option<UploadedFile>) -> Result<Uuid> {
        tracing::debug!("Application received");

        let resume = resume
            .filter(|file| !file.data.is_empty())
            .ok_or(Error::MissingResume)?;
        let details = form.into_details()?;

        let policy = &UploadPolicy::APPLICATION_RESUME;
        policy.check(&resume.content_type, resume.size())?;
        tracing::debug!(job_id = %details.job_id, size = resume.size(), "Resume validated");

        let stored = self
            .files
            .store(
                &resume.data,
                &resume.content_type,
                &resume.file_name,
                RESUME_DIRECTORY,
                policy,
            )
            .await?;
        tracing::debug!(resume = %stored.relative_path, "Resume stored");

        let application = self
            .applications
            .create(details.clone(), stored.relative_path.clone())
            .await?;
        let application_id = application.id;
        tracing::debug!(%application_id, "Application record created");

        let listing = match Uuid::parse_str(&application.job_id) {
            Ok(job_id) => self.listings.find(job_id).await?,
            Err(_) => None,
        };
        let Some(listing) = listing else {
            tracing::warn!(
                %application_id,
                job_id = %application.job_id,
                "Application stored for unknown job"
            );
            return Err(Error::JobNotFound("Job not found".into()));
        };
        tracing::debug!(%application_id, job_title = %listing.title, "Job looked up");

        if self
            .notifier
            .send_application_notice(&listing.title, &details, &stored.relative_path)
            .await
        {
            tracing::debug!(%application_id, "Admin notified");
        }

        tracing::debug!(%application_id, "Application intake done");
        Ok(application_id)
    }
}
