use axum::{
    extract::State,
    response::{IntoResponse, Json},
};

use crate::{dto::activity_dto::ActivityResponse, error::Result, utils::time::now, AppState};

#[utoipa::path(
    get,
    path = "/activity/recent",
    responses(
        (status = 200, description = "Latest job postings and applications", body = Json<ActivityResponse>)
    ),
    security(("bearer" = []))
)]
#[axum::debug_handler]
pub async fn recent_activity(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let activities = state.dashboard_service.recent_activity(now()).await?;
    Ok(Json(ActivityResponse { activities }))
}
