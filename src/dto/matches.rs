use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::format_system_time,
    engine::{
        error::{BracketError, BracketResult},
        model::{Match, MatchStatus},
    },
};

/// Highest score the API accepts for one side of a match. Standings
/// accumulate per-participant totals in `u32`, so the cap keeps even a full
/// round-robin season clear of overflow.
const MAX_SCORE: i64 = 10_000;

/// Final scoreline reported for a match.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RecordResultRequest {
    #[validate(range(min = 0, max = MAX_SCORE))]
    pub player1_score: i64,
    #[validate(range(min = 0, max = MAX_SCORE))]
    pub player2_score: i64,
}

impl RecordResultRequest {
    /// Scores as the unsigned pair recorded on the match.
    ///
    /// The range validation keeps the conversion lossless.
    pub fn scores(&self) -> (u32, u32) {
        (self.player1_score as u32, self.player2_score as u32)
    }
}

/// Scheduling metadata for a match; omitted fields are cleared.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ScheduleMatchRequest {
    /// RFC 3339 timestamp for the planned start.
    #[serde(default)]
    pub scheduled_at: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 120))]
    pub court: Option<String>,
}

impl ScheduleMatchRequest {
    /// Parse the RFC 3339 timestamp, if one was provided.
    pub fn parsed_scheduled_at(&self) -> BracketResult<Option<SystemTime>> {
        let Some(raw) = self.scheduled_at.as_deref() else {
            return Ok(None);
        };
        OffsetDateTime::parse(raw, &Rfc3339)
            .map(|parsed| Some(SystemTime::from(parsed)))
            .map_err(|err| {
                BracketError::InvalidInput(format!("invalid scheduled_at timestamp: {err}"))
            })
    }
}

/// Public projection of a bracket match.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchSummary {
    pub id: Uuid,
    pub tournament_id: Uuid,
    /// Bracket round, counted from 0.
    pub round: u32,
    /// Slot of the match inside its round.
    pub position: u32,
    pub player1_id: Option<Uuid>,
    pub player2_id: Option<Uuid>,
    pub player1_score: Option<u32>,
    pub player2_score: Option<u32>,
    pub winner_id: Option<Uuid>,
    pub status: MatchStatus,
    pub scheduled_at: Option<String>,
    pub court: Option<String>,
}

impl From<Match> for MatchSummary {
    fn from(m: Match) -> Self {
        Self {
            id: m.id,
            tournament_id: m.tournament_id,
            round: m.round,
            position: m.position,
            player1_id: m.player1,
            player2_id: m.player2,
            player1_score: m.player1_score,
            player2_score: m.player2_score,
            winner_id: m.winner,
            status: m.status,
            scheduled_at: m.scheduled_at.map(format_system_time),
            court: m.court,
        }
    }
}
