pub mod application;
pub mod auth;
pub mod dashboard;
pub mod docs;
pub mod form;
pub mod health;
pub mod listing;
pub mod resume;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{
    auth::require_admin,
    cors::cors_layer,
    rate_limit::{throttle_uploads, UploadThrottle},
};
use crate::services::file_store::MB;
use crate::AppState;

const BODY_LIMIT_BYTES: usize = 16 * MB;

/// Every HTTP route, with uploads served from the configured directory.
pub fn app_router(state: AppState) -> Router {
    let public_api = Router::new()
        .route("/health", get(health::health))
        .route("/auth/login", post(auth::login))
        .route("/jobs", get(listing::list_listings))
        .route("/jobs/:id", get(listing::get_listing))
        .route("/api-docs/openapi.json", get(docs::openapi_json));

    let public_uploads = Router::new()
        .route("/applications", post(application::submit_application))
        .route("/upload-resume", post(resume::upload_resume))
        .route_layer(from_fn_with_state(
            UploadThrottle::per_second(state.public_rps),
            throttle_uploads,
        ));

    let admin_api = Router::new()
        .route("/jobs", post(listing::create_listing))
        .route("/jobs/count", get(listing::count_listings))
        .route("/jobs/upcoming", get(listing::upcoming_listings))
        .route(
            "/jobs/:id",
            put(listing::update_listing).delete(listing::delete_listing),
        )
        .route(
            "/applications",
            get(application::list_applications).delete(application::delete_application),
        )
        .route("/applications/count", get(application::count_applications))
        .route(
            "/applications/:id/status",
            patch(application::update_application_status),
        )
        .route("/resumes", get(resume::list_resumes))
        .route("/resumes/:id", delete(resume::delete_resume))
        .route("/resumes/download/:filename", get(resume::download_resume))
        .route("/activity/recent", get(dashboard::recent_activity))
        .route_layer(from_fn_with_state(state.clone(), require_admin));

    tracing::info!(dir = %state.uploads_dir.display(), "Serving uploads");
    let uploads = ServeDir::new(&state.uploads_dir);
    let cors = cors_layer(state.site_url.as_deref());

    Router::new()
        .merge(public_api)
        .merge(public_uploads)
        .merge(admin_api)
        .nest_service("/uploads", uploads)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}
