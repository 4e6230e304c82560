use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const DROP_RESUME_SOURCE: &str = "drop-resume";

/// A file written by the file store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub relative_path: String,
    pub file_name: String,
    pub size: u64,
    pub media_type: String,
}

/// Metadata kept for resumes dropped outside of a job application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub id: Uuid,
    pub filename: String,
    pub original_name: String,
    pub upload_date: DateTime<Utc>,
    pub size: i64,
    pub media_type: String,
    pub source: String,
}
