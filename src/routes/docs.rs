use axum::Json;
use utoipa::OpenApi;

use crate::routes::{application, auth, dashboard, health, listing, resume};

#[derive(OpenApi)]
#[openapi(
    info(title = "Job Board API"),
    paths(
        health::health,
        auth::login,
        listing::create_listing,
        listing::list_listings,
        listing::get_listing,
        listing::update_listing,
        listing::delete_listing,
        listing::count_listings,
        listing::upcoming_listings,
        application::submit_application,
        application::list_applications,
        application::delete_application,
        application::count_applications,
        application::update_application_status,
        resume::upload_resume,
        resume::list_resumes,
        resume::delete_resume,
        resume::download_resume,
        dashboard::recent_activity,
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
