//! Business logic powering the tournament REST routes. These helpers coordinate
//! enrollment, bracket generation, and lifecycle changes over the bracket store.

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        matches::MatchSummary,
        tournament::{
            CreateTournamentRequest, EnrollParticipantRequest, ParticipantSummary,
            SetStatusRequest, TournamentSummary,
        },
    },
    engine::model::{Format, Participant, Tournament},
    error::AppError,
    state::SharedState,
};

/// Look up the knockout champion, if the final has been decided.
async fn champion_of(
    state: &SharedState,
    tournament: &Tournament,
) -> Result<Option<Participant>, AppError> {
    if tournament.format != Format::Knockout {
        return Ok(None);
    }

    let store = state.store();
    let matches = store.list_matches(tournament.id).await?;
    // Matches come back in (round, position) order, so the final is last.
    let Some(winner_id) = matches.last().and_then(|final_match| final_match.winner) else {
        return Ok(None);
    };
    let participants = store.list_participants(tournament.id).await?;
    Ok(participants.into_iter().find(|p| p.id == winner_id))
}

/// Create a new tournament owned by a club.
pub async fn create_tournament(
    state: &SharedState,
    payload: CreateTournamentRequest,
) -> Result<TournamentSummary, AppError> {
    payload.validate()?;

    let tournament = Tournament::new(
        payload.club_id,
        payload.practice_id,
        payload.name,
        payload.format,
    );
    let created = state.store().create_tournament(tournament).await?;
    info!(
        tournament_id = %created.id,
        club_id = %created.club_id,
        format = ?created.format,
        "tournament created"
    );
    Ok(created.into())
}

/// List every known tournament, oldest first.
///
/// The list projection skips the champion lookup; fetch a single tournament
/// for the full summary.
pub async fn list_tournaments(state: &SharedState) -> Result<Vec<TournamentSummary>, AppError> {
    let tournaments = state.store().list_tournaments().await?;
    Ok(tournaments.into_iter().map(Into::into).collect())
}

/// Fetch one tournament, including the champion once the final is decided.
pub async fn get_tournament(state: &SharedState, id: Uuid) -> Result<TournamentSummary, AppError> {
    let tournament = state.store().find_tournament(id).await?;
    let champion = champion_of(state, &tournament).await?;
    Ok((tournament, champion).into())
}

/// Delete a tournament together with its matches and standings.
pub async fn delete_tournament(state: &SharedState, id: Uuid) -> Result<(), AppError> {
    state.store().delete_tournament(id).await?;
    info!(tournament_id = %id, "tournament deleted");
    Ok(())
}

/// Enroll a club member into a tournament that has not started.
pub async fn enroll_participant(
    state: &SharedState,
    tournament_id: Uuid,
    payload: EnrollParticipantRequest,
) -> Result<ParticipantSummary, AppError> {
    payload.validate()?;

    let participant = Participant::new(
        tournament_id,
        payload.member_id,
        payload.display_name,
        payload.seed_rank,
    );
    let enrolled = state
        .store()
        .enroll_participant(tournament_id, participant, state.config().max_participants())
        .await?;
    info!(
        tournament_id = %tournament_id,
        participant_id = %enrolled.id,
        member_id = %enrolled.member_id,
        "participant enrolled"
    );
    Ok(enrolled.into())
}

/// Withdraw a participant before the bracket exists.
pub async fn withdraw_participant(
    state: &SharedState,
    tournament_id: Uuid,
    participant_id: Uuid,
) -> Result<(), AppError> {
    state
        .store()
        .withdraw_participant(tournament_id, participant_id)
        .await?;
    info!(
        tournament_id = %tournament_id,
        participant_id = %participant_id,
        "participant withdrawn"
    );
    Ok(())
}

/// List enrolled participants in enrollment order.
pub async fn list_participants(
    state: &SharedState,
    tournament_id: Uuid,
) -> Result<Vec<ParticipantSummary>, AppError> {
    let participants = state.store().list_participants(tournament_id).await?;
    Ok(participants.into_iter().map(Into::into).collect())
}

/// Generate the bracket for a tournament from its current enrollment.
pub async fn initialize_bracket(
    state: &SharedState,
    tournament_id: Uuid,
) -> Result<Vec<MatchSummary>, AppError> {
    let matches = state
        .store()
        .initialize_bracket(tournament_id, state.config().shuffle_unseeded())
        .await?;
    info!(
        tournament_id = %tournament_id,
        matches = matches.len(),
        "bracket initialized"
    );
    Ok(matches.into_iter().map(Into::into).collect())
}

/// Move a tournament forward through its lifecycle.
pub async fn set_status(
    state: &SharedState,
    tournament_id: Uuid,
    payload: SetStatusRequest,
) -> Result<TournamentSummary, AppError> {
    let change = state.store().set_status(tournament_id, payload.status).await?;
    if change.previous != change.tournament.status {
        info!(
            tournament_id = %tournament_id,
            from = ?change.previous,
            to = ?change.tournament.status,
            "tournament status advanced"
        );
    }
    let champion = champion_of(state, &change.tournament).await?;
    Ok((change.tournament, champion).into())
}
