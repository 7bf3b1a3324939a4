use axum::{extract::State, Json};
use tracing::info_span;
use types::{RosterRequest, RosterResponse};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/v1/roster",
    request_body = RosterRequest,
    responses((status = 200, description = "Roster result", body = RosterResponse))
)]
pub async fn roster(
    State(app_state): State<AppState>,
    Json(request): Json<RosterRequest>,
) -> Result<Json<RosterResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("roster_request", %request_id);
    let config = app_state.config.clone();

    // the whole pipeline is synchronous, so it runs on a blocking worker
    let response = tokio::task::spawn_blocking(move || {
        let _guard = span.enter();
        roster_core::generate_roster(&request, &config)
    })
    .await
    .map_err(|join| ApiError(format!("roster worker failed: {join}")))??;

    Ok(Json(response))
}
