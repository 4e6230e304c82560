use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::listing_dto::{
        CountResponse, ListingPayload, MessageResponse, UpcomingListingsResponse,
    },
    error::Result,
    models::listing::JobListing,
    utils::time::now,
    AppState,
};

#[utoipa::path(
    post,
    path = "/jobs",
    request_body = ListingPayload,
    responses(
        (status = 201, description = "Job created", body = Json<JobListing>),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Duplicate job id")
    ),
    security(("bearer" = []))
)]
#[axum::debug_handler]
pub async fn create_listing(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ListingPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let listing = state.listing_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

#[utoipa::path(
    get,
    path = "/jobs",
    responses(
        (status = 200, description = "All jobs, most recently posted first", body = Json<Vec<JobListing>>)
    )
)]
#[axum::debug_handler]
pub async fn list_listings(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let listings = state.listing_service.list().await?;
    Ok(Json(listings))
}

#[utoipa::path(
    get,
    path = "/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job found", body = Json<JobListing>),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let listing = state.listing_service.get_by_id(id).await?;
    Ok(Json(listing))
}

/// Full replace. Omitted dates are re-defaulted, and any id in the body is
/// ignored in favour of the path.
#[utoipa::path(
    put,
    path = "/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    request_body = ListingPayload,
    responses(
        (status = 200, description = "Job updated", body = Json<JobListing>),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "Job not found")
    ),
    security(("bearer" = []))
)]
#[axum::debug_handler]
pub async fn update_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: std::result::Result<Json<ListingPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let listing = state.listing_service.update(id, payload).await?;
    Ok(Json(listing))
}

#[utoipa::path(
    delete,
    path = "/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job deleted", body = Json<MessageResponse>),
        (status = 404, description = "Job not found")
    ),
    security(("bearer" = []))
)]
#[axum::debug_handler]
pub async fn delete_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.listing_service.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Job deleted successfully".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/jobs/count",
    responses(
        (status = 200, description = "Number of jobs", body = Json<CountResponse>)
    ),
    security(("bearer" = []))
)]
#[axum::debug_handler]
pub async fn count_listings(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let count = state.dashboard_service.listing_count().await?;
    Ok(Json(CountResponse { count }))
}

#[utoipa::path(
    get,
    path = "/jobs/upcoming",
    responses(
        (status = 200, description = "Up to five open jobs, soonest deadline first", body = Json<UpcomingListingsResponse>)
    ),
    security(("bearer" = []))
)]
#[axum::debug_handler]
pub async fn upcoming_listings(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let jobs = state.dashboard_service.upcoming(now()).await?;
    Ok(Json(UpcomingListingsResponse { jobs }))
}
