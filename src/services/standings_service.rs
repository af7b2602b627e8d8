//! Standings projection joining ranked rows with participant names.

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    dto::standings::StandingRow,
    engine::standings,
    error::AppError,
    state::SharedState,
};

/// Return the ranked standings table for a tournament.
///
/// Participants without a recorded result yet do not appear.
pub async fn standings(
    state: &SharedState,
    tournament_id: Uuid,
) -> Result<Vec<StandingRow>, AppError> {
    let store = state.store();
    let rows = store.list_standings(tournament_id).await?;
    let participants = store.list_participants(tournament_id).await?;

    let mut names: HashMap<Uuid, String> = participants
        .into_iter()
        .map(|p| (p.id, p.display_name))
        .collect();

    Ok(standings::rank(rows)
        .into_iter()
        .map(|ranked| {
            let display_name = names
                .remove(&ranked.standing.participant_id)
                .unwrap_or_else(|| ranked.standing.participant_id.to_string());
            (ranked, display_name).into()
        })
        .collect())
}
