use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, Multipart, Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::{
        application_dto::{
            ApplicationForm, ApplicationListResponse, DeleteApplicationQuery,
            SubmitApplicationResponse, UpdateStatusPayload,
        },
        listing_dto::{CountResponse, MessageResponse},
    },
    error::{Error, Result},
    models::application::Application,
    routes::form::{read_file_field, upload_error},
    services::file_store::UploadPolicy,
    AppState,
};

const RESUME_FIELD: &str = "resume";

#[utoipa::path(
    post,
    path = "/applications",
    request_body(
        content = String,
        content_type = "multipart/form-data",
        description = "jobId, firstName, lastName, email, phone, experience, education, coverLetter and a resume file"
    ),
    responses(
        (status = 201, description = "Application submitted", body = Json<SubmitApplicationResponse>),
        (status = 400, description = "Missing fields, missing resume, bad file type or size"),
        (status = 404, description = "Job not found; the application was still recorded"),
        (status = 500, description = "Resume could not be stored")
    )
)]
#[axum::debug_handler]
pub async fn submit_application(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse> {
    let mut multipart = multipart?;
    let policy = &UploadPolicy::APPLICATION_RESUME;
    let mut form = ApplicationForm::default();
    let mut resume = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, policy))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if name == RESUME_FIELD {
            resume = Some(read_file_field(field, policy).await?);
        } else {
            let value = field.text().await.map_err(|e| upload_error(e, policy))?;
            if !form.set(&name, value) {
                tracing::debug!(field = %name, "Ignoring unknown application field");
            }
        }
    }

    let application_id = state.intake_service.submit(form, resume).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmitApplicationResponse {
            message: "Application submitted successfully".to_string(),
            application_id,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/applications",
    responses(
        (status = 200, description = "All applications, newest first", body = Json<ApplicationListResponse>)
    ),
    security(("bearer" = []))
)]
#[axum::debug_handler]
pub async fn list_applications(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let applications = state.application_service.list().await?;
    Ok(Json(ApplicationListResponse { applications }))
}

#[utoipa::path(
    delete,
    path = "/applications",
    params(
        ("id" = Uuid, Query, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application deleted", body = Json<MessageResponse>),
        (status = 400, description = "Missing application id"),
        (status = 404, description = "Application not found")
    ),
    security(("bearer" = []))
)]
#[axum::debug_handler]
pub async fn delete_application(
    State(state): State<AppState>,
    Query(query): Query<DeleteApplicationQuery>,
) -> Result<impl IntoResponse> {
    let id = query
        .id
        .ok_or_else(|| Error::BadRequest("Application ID is required".into()))?;
    state.application_service.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Application deleted successfully".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/applications/count",
    responses(
        (status = 200, description = "Number of applications", body = Json<CountResponse>)
    ),
    security(("bearer" = []))
)]
#[axum::debug_handler]
pub async fn count_applications(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let count = state.dashboard_service.application_count().await?;
    Ok(Json(CountResponse { count }))
}

#[utoipa::path(
    patch,
    path = "/applications/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status updated", body = Json<Application>),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Application not found")
    ),
    security(("bearer" = []))
)]
#[axum::debug_handler]
pub async fn update_application_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: std::result::Result<Json<UpdateStatusPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let application = state
        .application_service
        .update_status(id, payload.status)
        .await?;
    Ok(Json(application))
}
