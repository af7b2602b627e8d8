use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Competition format of a tournament, fixed at creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Single-elimination bracket: losers are out, winners advance.
    Knockout,
    /// Every participant meets every other participant once.
    RoundRobin,
}

/// Coarse lifecycle status of a tournament.
///
/// Transitions are forward-only and administrator-triggered; see
/// [`crate::engine::lifecycle`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Created, possibly enrolling; play has not been declared open.
    Upcoming,
    /// Declared open by an administrator.
    InProgress,
    /// Declared finished; all result mutation is rejected.
    Completed,
}

/// Play state of a single match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Not yet played; opponents may still be undetermined.
    Scheduled,
    /// A result has been recorded.
    Completed,
}

/// A tournament owned by a club, optionally tied to a practice session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tournament {
    /// Primary key of the tournament.
    pub id: Uuid,
    /// Club that owns the tournament.
    pub club_id: Uuid,
    /// Practice session the tournament is played at, if any.
    pub practice_id: Option<Uuid>,
    /// Display name chosen by the organizer.
    pub name: String,
    /// Competition format; immutable after creation.
    pub format: Format,
    /// Current lifecycle status.
    pub status: TournamentStatus,
    /// Creation timestamp for auditing/debugging.
    pub created_at: SystemTime,
    /// Last time the tournament row was updated.
    pub updated_at: SystemTime,
}

impl Tournament {
    /// Create a new tournament in the `Upcoming` state.
    pub fn new(club_id: Uuid, practice_id: Option<Uuid>, name: String, format: Format) -> Self {
        let now = SystemTime::now();
        Self {
            id: Uuid::new_v4(),
            club_id,
            practice_id,
            name,
            format,
            status: TournamentStatus::Upcoming,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bump the update timestamp after a mutation.
    pub fn touch(&mut self) {
        self.updated_at = SystemTime::now();
    }
}

/// A club member entered into one tournament.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    /// Primary key of the enrollment.
    pub id: Uuid,
    /// Tournament the member is enrolled in.
    pub tournament_id: Uuid,
    /// Club member behind this enrollment; unique per tournament.
    pub member_id: Uuid,
    /// Name shown in brackets and standings.
    pub display_name: String,
    /// Seeding priority; lower is a higher seed, `None` is unseeded.
    pub seed_rank: Option<u32>,
    /// When the member was enrolled.
    pub enrolled_at: SystemTime,
}

impl Participant {
    /// Enroll a member into a tournament.
    pub fn new(
        tournament_id: Uuid,
        member_id: Uuid,
        display_name: String,
        seed_rank: Option<u32>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            member_id,
            display_name,
            seed_rank,
            enrolled_at: SystemTime::now(),
        }
    }
}

/// One match inside a tournament's bracket or pairing list.
///
/// The `(tournament_id, round, position)` triple is unique and immutable once
/// the match is created; player slots of knockout matches beyond round 0 are
/// filled exclusively by the advancement router.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Match {
    /// Primary key of the match.
    pub id: Uuid,
    /// Tournament the match belongs to.
    pub tournament_id: Uuid,
    /// 0-based round index; round 0 is the first round.
    pub round: u32,
    /// 0-based slot of the match within its round.
    pub position: u32,
    /// First opponent; `None` while undetermined (TBD or bye).
    pub player1: Option<Uuid>,
    /// Second opponent; `None` while undetermined (TBD or bye).
    pub player2: Option<Uuid>,
    /// Score of `player1`, present once recorded.
    pub player1_score: Option<u32>,
    /// Score of `player2`, present once recorded.
    pub player2_score: Option<u32>,
    /// Winning participant; `None` until recorded, and for draws.
    pub winner: Option<Uuid>,
    /// Play state of the match.
    pub status: MatchStatus,
    /// Scheduled start time, if the organizer set one.
    pub scheduled_at: Option<SystemTime>,
    /// Court or table label, if the organizer set one.
    pub court: Option<String>,
}

impl Match {
    /// Create a scheduled match with the given slot assignments.
    pub fn new(
        tournament_id: Uuid,
        round: u32,
        position: u32,
        player1: Option<Uuid>,
        player2: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            round,
            position,
            player1,
            player2,
            player1_score: None,
            player2_score: None,
            winner: None,
            status: MatchStatus::Scheduled,
            scheduled_at: None,
            court: None,
        }
    }

    /// Whether both opponents are known.
    pub fn players_decided(&self) -> bool {
        self.player1.is_some() && self.player2.is_some()
    }

    /// Whether the given participant occupies one of the player slots.
    pub fn involves(&self, participant_id: Uuid) -> bool {
        self.player1 == Some(participant_id) || self.player2 == Some(participant_id)
    }
}

/// Cumulative per-participant statistics within one tournament.
///
/// Created lazily on the first recorded result involving the participant and
/// updated incrementally afterwards, never recomputed from scratch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Standing {
    /// Tournament the row belongs to.
    pub tournament_id: Uuid,
    /// Participant the row aggregates.
    pub participant_id: Uuid,
    /// Number of completed matches involving the participant.
    pub matches_played: u32,
    /// Matches won.
    pub wins: u32,
    /// Matches lost.
    pub losses: u32,
    /// Matches drawn (round-robin only; knockout never records draws).
    pub draws: u32,
    /// Total score accumulated by the participant.
    pub points_for: u32,
    /// Total score conceded to opponents.
    pub points_against: u32,
}

impl Standing {
    /// Fresh all-zero row for a participant's first recorded result.
    pub fn new(tournament_id: Uuid, participant_id: Uuid) -> Self {
        Self {
            tournament_id,
            participant_id,
            matches_played: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            points_for: 0,
            points_against: 0,
        }
    }
}
