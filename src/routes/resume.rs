use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::header,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::resume_dto::{ResumeDeletedResponse, ResumeUploadResponse},
    models::resume::ResumeRecord,
    error::Result,
    routes::form::{read_file_field, upload_error},
    services::file_store::UploadPolicy,
    AppState,
};

#[utoipa::path(
    post,
    path = "/upload-resume",
    request_body(
        content = String,
        content_type = "multipart/form-data",
        description = "A `resume` PDF file of at most 5MB"
    ),
    responses(
        (status = 200, description = "Resume stored", body = Json<ResumeUploadResponse>),
        (status = 400, description = "No file, not a PDF, or too large")
    )
)]
#[axum::debug_handler]
pub async fn upload_resume(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse> {
    let mut multipart = multipart?;
    let policy = &UploadPolicy::DROP_RESUME;
    let mut resume = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, policy))?
    {
        if field.name() == Some("resume") {
            resume = Some(read_file_field(field, policy).await?);
        }
    }

    let response = state.resume_service.upload(resume).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/resumes",
    responses(
        (status = 200, description = "Dropped resumes, newest first", body = Json<Vec<ResumeRecord>>)
    ),
    security(("bearer" = []))
)]
#[axum::debug_handler]
pub async fn list_resumes(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let resumes = state.resume_service.list().await?;
    Ok(Json(resumes))
}

#[utoipa::path(
    delete,
    path = "/resumes/{id}",
    params(
        ("id" = Uuid, Path, description = "Resume record ID")
    ),
    responses(
        (status = 200, description = "Resume deleted", body = Json<ResumeDeletedResponse>),
        (status = 404, description = "Resume not found")
    ),
    security(("bearer" = []))
)]
#[axum::debug_handler]
pub async fn delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.resume_service.delete(id).await?;
    Ok(Json(ResumeDeletedResponse {
        success: true,
        message: "Resume deleted successfully".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/resumes/download/{filename}",
    params(
        ("filename" = String, Path, description = "Stored file name")
    ),
    responses(
        (status = 200, description = "File contents as an attachment"),
        (status = 400, description = "Invalid file name"),
        (status = 404, description = "File not found")
    ),
    security(("bearer" = []))
)]
#[axum::debug_handler]
pub async fn download_resume(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse> {
    let download = state.resume_service.download(&filename).await?;
    let disposition = download.content_disposition();
    Ok((
        [
            (header::CONTENT_TYPE, download.media_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        download.data,
    ))
}
