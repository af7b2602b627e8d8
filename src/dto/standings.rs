use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::engine::standings::RankedStanding;

/// One row of a tournament's ranked standings table.
#[derive(Debug, Serialize, ToSchema)]
pub struct StandingRow {
    /// 1-based rank; participants tied on every criterion still get distinct ranks.
    pub rank: u32,
    pub participant_id: Uuid,
    pub display_name: String,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub points_for: u32,
    pub points_against: u32,
    /// Ranking points: three per win, one per draw.
    pub points: u32,
}

impl From<(RankedStanding, String)> for StandingRow {
    fn from((ranked, display_name): (RankedStanding, String)) -> Self {
        let points = ranked.standing.points();
        let standing = ranked.standing;
        Self {
            rank: ranked.rank,
            participant_id: standing.participant_id,
            display_name,
            matches_played: standing.matches_played,
            wins: standing.wins,
            losses: standing.losses,
            draws: standing.draws,
            points_for: standing.points_for,
            points_against: standing.points_against,
            points,
        }
    }
}
