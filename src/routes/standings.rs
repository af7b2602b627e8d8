use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::standings::StandingRow, error::AppError, services::standings_service, state::SharedState,
};

/// Standings projection endpoints.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/tournaments/{id}/standings", get(standings))
}

/// Return the ranked standings table for a tournament.
#[utoipa::path(
    get,
    path = "/tournaments/{id}/standings",
    tag = "standings",
    params(("id" = String, Path, description = "Tournament to rank")),
    responses(
        (status = 200, description = "Ranked standings rows", body = [StandingRow]),
        (status = 404, description = "Unknown tournament")
    )
)]
pub async fn standings(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<StandingRow>>, AppError> {
    Ok(Json(standings_service::standings(&state, id).await?))
}
