use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::matches::{MatchSummary, RecordResultRequest, ScheduleMatchRequest},
    error::AppError,
    services::match_service,
    state::SharedState,
};

/// Match result and scheduling endpoints.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/tournaments/{id}/matches", get(list_matches))
        .route("/matches/{match_id}/result", post(record_result))
        .route("/matches/{match_id}/schedule", put(schedule_match))
}

/// List a tournament's matches in bracket order.
#[utoipa::path(
    get,
    path = "/tournaments/{id}/matches",
    tag = "matches",
    params(("id" = String, Path, description = "Tournament to list matches for")),
    responses(
        (status = 200, description = "Matches in (round, position) order", body = [MatchSummary]),
        (status = 404, description = "Unknown tournament")
    )
)]
pub async fn list_matches(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<MatchSummary>>, AppError> {
    Ok(Json(match_service::list_matches(&state, id).await?))
}

/// Record the final scoreline of a match.
#[utoipa::path(
    post,
    path = "/matches/{match_id}/result",
    tag = "matches",
    params(("match_id" = String, Path, description = "Match to settle")),
    request_body = RecordResultRequest,
    responses(
        (status = 200, description = "Result recorded", body = MatchSummary),
        (status = 400, description = "Tied knockout score or negative score"),
        (status = 409, description = "Opponents undetermined or result locked")
    )
)]
pub async fn record_result(
    State(state): State<SharedState>,
    Path(match_id): Path<Uuid>,
    Json(payload): Json<RecordResultRequest>,
) -> Result<Json<MatchSummary>, AppError> {
    Ok(Json(
        match_service::record_result(&state, match_id, payload).await?,
    ))
}

/// Attach or clear scheduling metadata on a match.
#[utoipa::path(
    put,
    path = "/matches/{match_id}/schedule",
    tag = "matches",
    params(("match_id" = String, Path, description = "Match to schedule")),
    request_body = ScheduleMatchRequest,
    responses(
        (status = 200, description = "Schedule updated", body = MatchSummary),
        (status = 404, description = "Unknown match")
    )
)]
pub async fn schedule_match(
    State(state): State<SharedState>,
    Path(match_id): Path<Uuid>,
    Json(payload): Json<ScheduleMatchRequest>,
) -> Result<Json<MatchSummary>, AppError> {
    Ok(Json(
        match_service::schedule_match(&state, match_id, payload).await?,
    ))
}
