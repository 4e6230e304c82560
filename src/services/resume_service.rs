use std::sync::Arc;

use uuid::Uuid;

use crate::dto::application_dto::UploadedFile;
use crate::dto::resume_dto::{ResumeDownload, ResumeUploadResponse};
use crate::error::{Error, Result};
use crate::models::resume::{ResumeRecord, DROP_RESUME_SOURCE};
use crate::repositories::ResumeRepository;
use crate::services::file_store::{
    original_name_from_stored, FileStore, UploadPolicy, DOC, DOCX, PDF, RESUME_DIRECTORY,
};
use crate::utils::time::now;

/// Resumes dropped without a job application, and admin access to every
/// file in the resume directory.
#[derive(Clone)]
pub struct ResumeService {
    repo: Arc<dyn ResumeRepository>,
    files: FileStore,
}

fn guess_media_type(file_name: &str) -> &'static str {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".pdf") {
        PDF
    } else if lower.ends_with(".docx") {
        DOCX
    } else if lower.ends_with(".doc") {
        DOC
    } else {
        "application/octet-stream"
    }
}

impl ResumeService {
    pub fn new(repo: Arc<dyn ResumeRepository>, files: FileStore) -> Self {
        Self { repo, files }
    }

    pub async fn upload(&self, file: Option<UploadedFile>) -> Result<ResumeUploadResponse> {
        let file = file
            .filter(|f| !f.data.is_empty())
            .ok_or(Error::MissingResume)?;

        let stored = self
            .files
            .store(
                &file.data,
                &file.content_type,
                &file.file_name,
                RESUME_DIRECTORY,
                &UploadPolicy::DROP_RESUME,
            )
            .await?;

        let record = self
            .repo
            .insert(ResumeRecord {
                id: Uuid::new_v4(),
                filename: stored.file_name.clone(),
                original_name: file.file_name,
                upload_date: now(),
                size: stored.size as i64,
                media_type: stored.media_type,
                source: DROP_RESUME_SOURCE.to_string(),
            })
            .await?;
        tracing::info!(resume_id = %record.id, filename = %record.filename, "Resume dropped");

        Ok(ResumeUploadResponse {
            success: true,
            id: record.id,
            filename: record.filename,
            message: "Resume uploaded successfully".to_string(),
        })
    }

    pub async fn list(&self) -> Result<Vec<ResumeRecord>> {
        self.repo.list_by_source(DROP_RESUME_SOURCE).await
    }

    /// Removes the metadata row and the file. A file that is already gone
    /// only produces a warning.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let record = self
            .repo
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound("Resume not found".into()))?;

        match self.files.remove(RESUME_DIRECTORY, &record.filename).await {
            Ok(()) => {}
            Err(Error::NotFound(_)) => {
                tracing::warn!(resume_id = %id, filename = %record.filename, "Resume file already missing");
            }
            Err(e) => return Err(e),
        }
        self.repo.delete(id).await?;
        tracing::info!(resume_id = %id, "Resume deleted");
        Ok(())
    }

    pub async fn download(&self, filename: &str) -> Result<ResumeDownload> {
        let data = self.files.read(RESUME_DIRECTORY, filename).await?;
        let (original_name, media_type) = match self.repo.find_by_filename(filename).await? {
            Some(record) => (record.original_name, record.media_type),
            None => (
                original_name_from_stored(filename).to_string(),
                guess_media_type(filename).to_string(),
            ),
        };
        Ok(ResumeDownload {
            data,
            original_name,
            media_type,
        })
    }
}
