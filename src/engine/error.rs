use thiserror::Error;
use uuid::Uuid;

use crate::engine::model::TournamentStatus;

/// Convenience alias for engine operations.
pub type BracketResult<T> = Result<T, BracketError>;

/// Broad classification of a [`BracketError`], driving logging and the HTTP
/// status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range input; resubmit corrected input.
    Validation,
    /// A referenced record does not exist.
    NotFound,
    /// The operation is not legal in the current state.
    State,
    /// An internal invariant was violated; not caused by caller input.
    Consistency,
    /// The backing store could not be reached.
    Storage,
}

/// Errors produced by the bracket engine and its store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketError {
    /// Free-form input rejection (blank name, unparseable timestamp, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Equal scores cannot produce a knockout advancer.
    #[error("knockout match cannot end {score}-{score}: a tie has no advancer")]
    TiedKnockoutScore {
        /// The score both sides submitted.
        score: u32,
    },
    /// Bracket initialization needs at least two participants.
    #[error("cannot initialize a bracket with {found} participant(s); at least 2 required")]
    InsufficientParticipants {
        /// Number of participants currently enrolled.
        found: usize,
    },
    /// No tournament with the given id.
    #[error("tournament `{0}` not found")]
    TournamentNotFound(Uuid),
    /// No match with the given id.
    #[error("match `{0}` not found")]
    MatchNotFound(Uuid),
    /// No participant with the given id in the tournament.
    #[error("participant `{0}` not found")]
    ParticipantNotFound(Uuid),
    /// The member is already enrolled in the tournament.
    #[error("member `{0}` is already enrolled")]
    AlreadyEnrolled(Uuid),
    /// Enrollment would exceed the configured participant cap.
    #[error("tournament is full ({capacity} participants)")]
    TournamentFull {
        /// Configured enrollment capacity.
        capacity: usize,
    },
    /// The tournament already has matches; the bracket is generated once.
    #[error("tournament `{0}` already has an initialized bracket")]
    BracketAlreadyInitialized(Uuid),
    /// Mutating operations are rejected once a tournament is completed.
    #[error("tournament `{0}` is completed")]
    TournamentCompleted(Uuid),
    /// Lifecycle transitions never move backward.
    #[error("invalid transition: cannot move from {from:?} back to {to:?}")]
    InvalidTransition {
        /// Status the tournament is currently in.
        from: TournamentStatus,
        /// Earlier status the caller asked for.
        to: TournamentStatus,
    },
    /// A result cannot be recorded while an opponent slot is undetermined.
    #[error("match `{0}` does not have both opponents decided yet")]
    OpponentsUndetermined(Uuid),
    /// The recorded winner already advanced; the result can no longer change.
    #[error("match `{0}` is locked: its winner already advanced")]
    ResultLocked(Uuid),
    /// An advancement write targeted a slot that is already filled.
    #[error("advancement slot already occupied at round {round} position {position}")]
    SlotOccupied {
        /// Round of the downstream match.
        round: u32,
        /// Position of the downstream match within the round.
        position: u32,
    },
    /// The bracket arena is missing a match the topology requires.
    #[error("bracket has no match at round {round} position {position}")]
    MissingMatch {
        /// Round of the expected match.
        round: u32,
        /// Position of the expected match within the round.
        position: u32,
    },
    /// A match record is missing data the engine itself must have written.
    #[error("match `{0}` is in a corrupt state")]
    CorruptMatch(Uuid),
    /// The backing store could not serve the request.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl BracketError {
    /// Classify the error for logging and transport mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BracketError::InvalidInput(_)
            | BracketError::TiedKnockoutScore { .. }
            | BracketError::InsufficientParticipants { .. } => ErrorKind::Validation,
            BracketError::TournamentNotFound(_)
            | BracketError::MatchNotFound(_)
            | BracketError::ParticipantNotFound(_) => ErrorKind::NotFound,
            BracketError::AlreadyEnrolled(_)
            | BracketError::TournamentFull { .. }
            | BracketError::BracketAlreadyInitialized(_)
            | BracketError::TournamentCompleted(_)
            | BracketError::InvalidTransition { .. }
            | BracketError::OpponentsUndetermined(_)
            | BracketError::ResultLocked(_) => ErrorKind::State,
            BracketError::SlotOccupied { .. }
            | BracketError::MissingMatch { .. }
            | BracketError::CorruptMatch(_) => ErrorKind::Consistency,
            BracketError::Unavailable(_) => ErrorKind::Storage,
        }
    }
}
