use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::matches::{MatchSummary, RecordResultRequest, ScheduleMatchRequest},
    error::AppError,
    state::SharedState,
};

/// List a tournament's matches in (round, position) order.
pub async fn list_matches(
    state: &SharedState,
    tournament_id: Uuid,
) -> Result<Vec<MatchSummary>, AppError> {
    let matches = state.store().list_matches(tournament_id).await?;
    Ok(matches.into_iter().map(Into::into).collect())
}

/// Record a final scoreline, settling the match, its standings rows, and any
/// knockout advancement in one step.
pub async fn record_result(
    state: &SharedState,
    match_id: Uuid,
    payload: RecordResultRequest,
) -> Result<MatchSummary, AppError> {
    payload.validate()?;

    let (player1_score, player2_score) = payload.scores();
    let recorded = state
        .store()
        .record_result(match_id, player1_score, player2_score)
        .await?;
    info!(
        match_id = %match_id,
        player1_score,
        player2_score,
        winner = ?recorded.settled.winner,
        advanced_to = ?recorded.advanced_to,
        "match result recorded"
    );
    Ok(recorded.settled.into())
}

/// Attach or clear scheduling metadata on a match.
pub async fn schedule_match(
    state: &SharedState,
    match_id: Uuid,
    payload: ScheduleMatchRequest,
) -> Result<MatchSummary, AppError> {
    payload.validate()?;

    let scheduled_at = payload.parsed_scheduled_at()?;
    let updated = state
        .store()
        .schedule_match(match_id, scheduled_at, payload.court)
        .await?;
    info!(
        match_id = %match_id,
        scheduled = updated.scheduled_at.is_some(),
        court = ?updated.court,
        "match schedule updated"
    );
    Ok(updated.into())
}
