use futures::future::BoxFuture;
use std::time::SystemTime;
use uuid::Uuid;

use crate::engine::{
    error::BracketResult,
    model::{Match, Participant, Standing, Tournament, TournamentStatus},
};

/// Outcome of recording a match result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedResult {
    /// The match after settlement.
    pub settled: Match,
    /// Arena address the winner was routed to, when advancement ran; for a
    /// cascade through entrant-free subtrees this is the final destination.
    pub advanced_to: Option<(u32, u32)>,
}

/// Outcome of a lifecycle transition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    /// Status before the request was applied.
    pub previous: TournamentStatus,
    /// The tournament after the request; unchanged for no-op requests.
    pub tournament: Tournament,
}

/// Abstraction over the storage layer owning tournaments and their matches,
/// participants, and standings.
///
/// Mutating operations are composite: each one validates, plans against the
/// pure engine functions, and applies the whole mutation as one atomic unit,
/// so a rejected call leaves no partial state behind. Concurrent calls
/// touching the same tournament serialize against each other.
pub trait BracketStore: Send + Sync {
    /// Persist a freshly created tournament.
    fn create_tournament(
        &self,
        tournament: Tournament,
    ) -> BoxFuture<'static, BracketResult<Tournament>>;
    /// Fetch one tournament by id.
    fn find_tournament(&self, id: Uuid) -> BoxFuture<'static, BracketResult<Tournament>>;
    /// List all tournaments, oldest first.
    fn list_tournaments(&self) -> BoxFuture<'static, BracketResult<Vec<Tournament>>>;
    /// Delete a tournament and every participant, match, and standing it owns.
    fn delete_tournament(&self, id: Uuid) -> BoxFuture<'static, BracketResult<()>>;
    /// Enroll a participant, enforcing uniqueness per member and the
    /// capacity cap; rejected once the bracket exists.
    fn enroll_participant(
        &self,
        tournament_id: Uuid,
        participant: Participant,
        capacity: usize,
    ) -> BoxFuture<'static, BracketResult<Participant>>;
    /// Remove an enrollment; rejected once the bracket exists.
    fn withdraw_participant(
        &self,
        tournament_id: Uuid,
        participant_id: Uuid,
    ) -> BoxFuture<'static, BracketResult<()>>;
    /// List enrollments in enrollment order.
    fn list_participants(
        &self,
        tournament_id: Uuid,
    ) -> BoxFuture<'static, BracketResult<Vec<Participant>>>;
    /// Generate and install the bracket for the tournament's format, routing
    /// byes; one-shot per tournament.
    fn initialize_bracket(
        &self,
        tournament_id: Uuid,
        shuffle_unseeded: bool,
    ) -> BoxFuture<'static, BracketResult<Vec<Match>>>;
    /// List matches ordered by `(round, position)`.
    fn list_matches(&self, tournament_id: Uuid) -> BoxFuture<'static, BracketResult<Vec<Match>>>;
    /// Record (or, where legal, re-record) a match result: settles the
    /// match, folds both standings, and advances the winner.
    fn record_result(
        &self,
        match_id: Uuid,
        player1_score: u32,
        player2_score: u32,
    ) -> BoxFuture<'static, BracketResult<RecordedResult>>;
    /// Attach or clear scheduling metadata on a match.
    fn schedule_match(
        &self,
        match_id: Uuid,
        scheduled_at: Option<SystemTime>,
        court: Option<String>,
    ) -> BoxFuture<'static, BracketResult<Match>>;
    /// List raw standing rows; ranking is the caller's concern.
    fn list_standings(
        &self,
        tournament_id: Uuid,
    ) -> BoxFuture<'static, BracketResult<Vec<Standing>>>;
    /// Apply a lifecycle transition request.
    fn set_status(
        &self,
        tournament_id: Uuid,
        target: TournamentStatus,
    ) -> BoxFuture<'static, BracketResult<StatusChange>>;
    /// Probe whether the store can serve requests.
    fn health_check(&self) -> BoxFuture<'static, BracketResult<()>>;
}
