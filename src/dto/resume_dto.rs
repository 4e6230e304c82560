use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeUploadResponse {
    pub success: bool,
    pub id: Uuid,
    pub filename: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeDeletedResponse {
    pub success: bool,
    pub message: String,
}

/// File contents plus the name the browser should save it under.
#[derive(Debug, Clone)]
pub struct ResumeDownload {
    pub data: Vec<u8>,
    pub original_name: String,
    pub media_type: String,
}

impl ResumeDownload {
    pub fn content_disposition(&self) -> String {
        let name: String = self
            .original_name
            .chars()
            .map(|c| if c == '"' || c == '\\' || c.is_control() { '_' } else { c })
            .collect();
        format!("attachment; filename=\"{}\"", name)
    }
}
