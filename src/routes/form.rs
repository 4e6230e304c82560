use axum::extract::multipart::{Field, MultipartError};
use axum::http::StatusCode;

use crate::dto::application_dto::UploadedFile;
use crate::error::{Error, Result};
use crate::services::file_store::UploadPolicy;

/// A body cut off by the request size limit is reported against the upload
/// policy of the route, like any other oversized file.
pub fn upload_error(err: MultipartError, policy: &UploadPolicy) -> Error {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::debug!(limit_bytes = policy.max_bytes, "Upload exceeded the request body limit");
        Error::FileTooLarge {
            limit_bytes: policy.max_bytes,
        }
    } else {
        Error::Multipart(err)
    }
}

/// Buffers a multipart file part. Missing metadata falls back to an
/// unnamed binary upload, which the upload policies then reject by type.
pub async fn read_file_field(field: Field<'_>, policy: &UploadPolicy) -> Result<UploadedFile> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let data = field.bytes().await.map_err(|e| upload_error(e, policy))?;
    Ok(UploadedFile {
        file_name,
        content_type,
        data,
    })
}
