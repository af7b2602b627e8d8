use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::{
        matches::MatchSummary,
        tournament::{
            CreateTournamentRequest, EnrollParticipantRequest, ParticipantSummary,
            SetStatusRequest, TournamentSummary,
        },
    },
    error::AppError,
    services::tournament_service,
    state::SharedState,
};

/// Tournament management endpoints for club staff.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/tournaments", get(list_tournaments).post(create_tournament))
        .route(
            "/tournaments/{id}",
            get(get_tournament).delete(delete_tournament),
        )
        .route(
            "/tournaments/{id}/participants",
            get(list_participants).post(enroll_participant),
        )
        .route(
            "/tournaments/{id}/participants/{participant_id}",
            delete(withdraw_participant),
        )
        .route("/tournaments/{id}/bracket", post(initialize_bracket))
        .route("/tournaments/{id}/status", put(set_status))
}

/// Create a new tournament for a club.
#[utoipa::path(
    post,
    path = "/tournaments",
    tag = "tournaments",
    request_body = CreateTournamentRequest,
    responses(
        (status = 201, description = "Tournament created", body = TournamentSummary),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_tournament(
    State(state): State<SharedState>,
    Json(payload): Json<CreateTournamentRequest>,
) -> Result<(StatusCode, Json<TournamentSummary>), AppError> {
    let summary = tournament_service::create_tournament(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// Retrieve every tournament known to the system.
#[utoipa::path(
    get,
    path = "/tournaments",
    tag = "tournaments",
    responses((status = 200, description = "List tournaments", body = [TournamentSummary]))
)]
pub async fn list_tournaments(
    State(state): State<SharedState>,
) -> Result<Json<Vec<TournamentSummary>>, AppError> {
    Ok(Json(tournament_service::list_tournaments(&state).await?))
}

/// Retrieve a tournament by its identifier.
#[utoipa::path(
    get,
    path = "/tournaments/{id}",
    tag = "tournaments",
    params(("id" = String, Path, description = "Identifier of the tournament to retrieve")),
    responses(
        (status = 200, description = "Tournament", body = TournamentSummary),
        (status = 404, description = "Unknown tournament")
    )
)]
pub async fn get_tournament(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TournamentSummary>, AppError> {
    Ok(Json(tournament_service::get_tournament(&state, id).await?))
}

/// Delete a tournament together with its matches and standings.
#[utoipa::path(
    delete,
    path = "/tournaments/{id}",
    tag = "tournaments",
    params(("id" = String, Path, description = "Identifier of the tournament to delete")),
    responses(
        (status = 204, description = "Tournament deleted"),
        (status = 404, description = "Unknown tournament")
    )
)]
pub async fn delete_tournament(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    tournament_service::delete_tournament(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Enroll a club member into a tournament.
#[utoipa::path(
    post,
    path = "/tournaments/{id}/participants",
    tag = "tournaments",
    params(("id" = String, Path, description = "Tournament to enroll into")),
    request_body = EnrollParticipantRequest,
    responses(
        (status = 201, description = "Participant enrolled", body = ParticipantSummary),
        (status = 409, description = "Enrollment closed, full, or duplicate member")
    )
)]
pub async fn enroll_participant(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EnrollParticipantRequest>,
) -> Result<(StatusCode, Json<ParticipantSummary>), AppError> {
    let summary = tournament_service::enroll_participant(&state, id, payload).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// List participants in enrollment order.
#[utoipa::path(
    get,
    path = "/tournaments/{id}/participants",
    tag = "tournaments",
    params(("id" = String, Path, description = "Tournament to list participants for")),
    responses((status = 200, description = "Enrolled participants", body = [ParticipantSummary]))
)]
pub async fn list_participants(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ParticipantSummary>>, AppError> {
    Ok(Json(
        tournament_service::list_participants(&state, id).await?,
    ))
}

/// Withdraw a participant before the bracket is generated.
#[utoipa::path(
    delete,
    path = "/tournaments/{id}/participants/{participant_id}",
    tag = "tournaments",
    params(("id" = String, Path, description = "Tournament to withdraw from"),
    ("participant_id" = String, Path, description = "Participant to withdraw")),
    responses(
        (status = 204, description = "Participant withdrawn"),
        (status = 409, description = "Bracket already generated")
    )
)]
pub async fn withdraw_participant(
    State(state): State<SharedState>,
    Path((id, participant_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    tournament_service::withdraw_participant(&state, id, participant_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Generate the bracket from the current enrollment.
#[utoipa::path(
    post,
    path = "/tournaments/{id}/bracket",
    tag = "tournaments",
    params(("id" = String, Path, description = "Tournament to generate a bracket for")),
    responses(
        (status = 201, description = "Bracket generated", body = [MatchSummary]),
        (status = 400, description = "Not enough participants"),
        (status = 409, description = "Bracket already generated")
    )
)]
pub async fn initialize_bracket(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<Vec<MatchSummary>>), AppError> {
    let matches = tournament_service::initialize_bracket(&state, id).await?;
    Ok((StatusCode::CREATED, Json(matches)))
}

/// Move a tournament forward through its lifecycle.
#[utoipa::path(
    put,
    path = "/tournaments/{id}/status",
    tag = "tournaments",
    params(("id" = String, Path, description = "Tournament to update")),
    request_body = SetStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = TournamentSummary),
        (status = 409, description = "Backward transition rejected")
    )
)]
pub async fn set_status(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<Json<TournamentSummary>, AppError> {
    Ok(Json(
        tournament_service::set_status(&state, id, payload).await?,
    ))
}
