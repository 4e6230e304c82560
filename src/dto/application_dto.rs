use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::application::{ApplicantDetails, Application, ApplicationStatus};

/// Text fields of the `POST /applications` multipart form, as received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationForm {
    pub job_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub cover_letter: Option<String>,
}

impl ApplicationForm {
    /// Records a multipart text field. Returns `false` for unknown names.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "jobId" => &mut self.job_id,
            "firstName" => &mut self.first_name,
            "lastName" => &mut self.last_name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "experience" => &mut self.experience,
            "education" => &mut self.education,
            "coverLetter" => &mut self.cover_letter,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Every required field must be present and non-blank; the email must
    /// also be well formed. Values are kept exactly as submitted.
    pub fn into_details(self) -> Result<ApplicantDetails> {
        let mut missing = Vec::new();
        let mut take = |value: Option<String>, name: &str| -> String {
            match value.filter(|v| !v.trim().is_empty()) {
                Some(v) => v,
                None => {
                    missing.push(name.to_string());
                    String::new()
                }
            }
        };

        let details = ApplicantDetails {
            job_id: take(self.job_id, "jobId"),
            first_name: take(self.first_name, "firstName"),
            last_name: take(self.last_name, "lastName"),
            email: take(self.email, "email"),
            phone: take(self.phone, "phone"),
            experience: take(self.experience, "experience"),
            education: take(self.education, "education"),
            cover_letter: take(self.cover_letter, "coverLetter"),
        };

        if !missing.is_empty() {
            return Err(Error::validation("All fields are required", missing));
        }
        details.validate()?;
        Ok(details)
    }
}

/// A file part received from a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplicationResponse {
    pub message: String,
    pub application_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationListResponse {
    pub applications: Vec<Application>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteApplicationQuery {
    pub id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusPayload {
    pub status: ApplicationStatus,
}
