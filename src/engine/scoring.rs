//! Outcome determination and incremental standings accounting for a single
//! recorded result. Format-agnostic except for the knockout tie rejection.

use std::cmp::Ordering;

use uuid::Uuid;

use crate::engine::{
    error::{BracketError, BracketResult},
    model::{Format, Standing},
};

/// Resolved outcome of a score pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// `player1` scored strictly higher.
    Player1Win,
    /// `player2` scored strictly higher.
    Player2Win,
    /// Equal scores; legal for round-robin only.
    Draw,
}

impl Outcome {
    /// The winning side's participant, if the outcome has one.
    pub fn winner(&self, player1: Uuid, player2: Uuid) -> Option<Uuid> {
        match self {
            Outcome::Player1Win => Some(player1),
            Outcome::Player2Win => Some(player2),
            Outcome::Draw => None,
        }
    }
}

/// Decide the outcome of a score pair under the given format.
///
/// Strictly higher score wins. Equal scores are a draw for round-robin and
/// rejected for knockout, where a tie cannot produce an advancer.
pub fn decide(format: Format, player1_score: u32, player2_score: u32) -> BracketResult<Outcome> {
    match player1_score.cmp(&player2_score) {
        Ordering::Greater => Ok(Outcome::Player1Win),
        Ordering::Less => Ok(Outcome::Player2Win),
        Ordering::Equal if format == Format::RoundRobin => Ok(Outcome::Draw),
        Ordering::Equal => Err(BracketError::TiedKnockoutScore {
            score: player1_score,
        }),
    }
}

/// One side's standings contribution from one completed result.
///
/// `matches_played` is not a field: every completed result contributes
/// exactly one played match, which [`Standing::apply`] and
/// [`Standing::revert`] account for directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StandingDelta {
    /// 1 if this side won, else 0.
    pub wins: u32,
    /// 1 if this side lost, else 0.
    pub losses: u32,
    /// 1 if the result was a draw, else 0.
    pub draws: u32,
    /// Score this side put up.
    pub points_for: u32,
    /// Score the opponent put up.
    pub points_against: u32,
}

/// Compute both sides' deltas for a decided result, `(player1, player2)`.
pub fn result_deltas(
    outcome: Outcome,
    player1_score: u32,
    player2_score: u32,
) -> (StandingDelta, StandingDelta) {
    let (wins1, losses1, draws) = match outcome {
        Outcome::Player1Win => (1, 0, 0),
        Outcome::Player2Win => (0, 1, 0),
        Outcome::Draw => (0, 0, 1),
    };
    let player1 = StandingDelta {
        wins: wins1,
        losses: losses1,
        draws,
        points_for: player1_score,
        points_against: player2_score,
    };
    let player2 = StandingDelta {
        wins: losses1,
        losses: wins1,
        draws,
        points_for: player2_score,
        points_against: player1_score,
    };
    (player1, player2)
}

impl Standing {
    /// Fold one completed result into the row.
    pub fn apply(&mut self, delta: &StandingDelta) {
        self.matches_played += 1;
        self.wins += delta.wins;
        self.losses += delta.losses;
        self.draws += delta.draws;
        self.points_for += delta.points_for;
        self.points_against += delta.points_against;
    }

    /// Remove a previously applied result from the row.
    ///
    /// Callers must pass the exact delta that was applied; the store pairs
    /// every revert with the recorded scores it reverses.
    pub fn revert(&mut self, delta: &StandingDelta) {
        self.matches_played -= 1;
        self.wins -= delta.wins;
        self.losses -= delta.losses;
        self.draws -= delta.draws;
        self.points_for -= delta.points_for;
        self.points_against -= delta.points_against;
    }
}
