//! DTO definitions for the tournament and enrollment REST API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{format_system_time, validation::validate_not_blank},
    engine::model::{Format, Participant, Tournament, TournamentStatus},
};

/// Payload used to create a brand-new tournament for a club.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateTournamentRequest {
    /// Club hosting the tournament.
    pub club_id: Uuid,
    /// Practice session the tournament is tied to, if any.
    #[serde(default)]
    pub practice_id: Option<Uuid>,
    #[validate(length(min = 1, max = 120), custom(function = validate_not_blank))]
    pub name: String,
    pub format: Format,
}

/// Payload enrolling one club member into a tournament.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct EnrollParticipantRequest {
    /// Club member to enroll.
    pub member_id: Uuid,
    #[validate(length(min = 1, max = 120), custom(function = validate_not_blank))]
    pub display_name: String,
    /// Optional seed rank; 1 is the strongest seed.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub seed_rank: Option<u32>,
}

/// Request to move a tournament to a new lifecycle status.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetStatusRequest {
    pub status: TournamentStatus,
}

/// Public projection of an enrolled participant.
#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipantSummary {
    pub id: Uuid,
    pub member_id: Uuid,
    pub display_name: String,
    pub seed_rank: Option<u32>,
    pub enrolled_at: String,
}

/// Summary returned once a tournament has been created or fetched.
#[derive(Debug, Serialize, ToSchema)]
pub struct TournamentSummary {
    pub id: Uuid,
    pub club_id: Uuid,
    pub practice_id: Option<Uuid>,
    pub name: String,
    pub format: Format,
    pub status: TournamentStatus,
    /// Winner of the knockout final, present once the bracket has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub champion: Option<ParticipantSummary>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Participant> for ParticipantSummary {
    fn from(participant: Participant) -> Self {
        Self {
            id: participant.id,
            member_id: participant.member_id,
            display_name: participant.display_name,
            seed_rank: participant.seed_rank,
            enrolled_at: format_system_time(participant.enrolled_at),
        }
    }
}

impl From<Tournament> for TournamentSummary {
    fn from(tournament: Tournament) -> Self {
        (tournament, None).into()
    }
}

impl From<(Tournament, Option<Participant>)> for TournamentSummary {
    fn from((tournament, champion): (Tournament, Option<Participant>)) -> Self {
        Self {
            id: tournament.id,
            club_id: tournament.club_id,
            practice_id: tournament.practice_id,
            name: tournament.name,
            format: tournament.format,
            status: tournament.status,
            champion: champion.map(Into::into),
            created_at: format_system_time(tournament.created_at),
            updated_at: format_system_time(tournament.updated_at),
        }
    }
}
