//! The coarse tournament status machine.
//!
//! Transitions are administrator-triggered, never inferred from match
//! completion, and strictly forward-only.

use std::cmp::Ordering;

use crate::engine::{
    error::{BracketError, BracketResult},
    model::TournamentStatus,
};

/// Outcome of requesting a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The status moved forward.
    Advanced {
        /// Status before the change.
        from: TournamentStatus,
        /// Status after the change.
        to: TournamentStatus,
    },
    /// The tournament is already in the requested status; nothing changes.
    Unchanged(TournamentStatus),
}

fn phase_index(status: TournamentStatus) -> u8 {
    match status {
        TournamentStatus::Upcoming => 0,
        TournamentStatus::InProgress => 1,
        TournamentStatus::Completed => 2,
    }
}

/// Decide whether `current → target` is legal.
///
/// Forward moves are allowed, including skipping straight to `Completed`.
/// Requesting the current status is a no-op success. Moving backward is
/// rejected: reopening a tournament would invalidate results recorded under
/// the completed state.
pub fn transition(
    current: TournamentStatus,
    target: TournamentStatus,
) -> BracketResult<Transition> {
    match phase_index(target).cmp(&phase_index(current)) {
        Ordering::Greater => Ok(Transition::Advanced {
            from: current,
            to: target,
        }),
        Ordering::Equal => Ok(Transition::Unchanged(current)),
        Ordering::Less => Err(BracketError::InvalidTransition {
            from: current,
            to: target,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::model::TournamentStatus::{Completed, InProgress, Upcoming};

    #[test]
    fn forward_steps_advance() {
        assert_eq!(
            transition(Upcoming, InProgress),
            Ok(Transition::Advanced {
                from: Upcoming,
                to: InProgress
            })
        );
        assert_eq!(
            transition(InProgress, Completed),
            Ok(Transition::Advanced {
                from: InProgress,
                to: Completed
            })
        );
    }

    #[test]
    fn skipping_straight_to_completed_is_allowed() {
        assert_eq!(
            transition(Upcoming, Completed),
            Ok(Transition::Advanced {
                from: Upcoming,
                to: Completed
            })
        );
    }

    #[test]
    fn same_status_is_a_no_op() {
        for status in [Upcoming, InProgress, Completed] {
            assert_eq!(transition(status, status), Ok(Transition::Unchanged(status)));
        }
    }

    #[test]
    fn backward_moves_are_rejected() {
        for (from, to) in [
            (InProgress, Upcoming),
            (Completed, InProgress),
            (Completed, Upcoming),
        ] {
            assert_eq!(
                transition(from, to),
                Err(BracketError::InvalidTransition { from, to })
            );
        }
    }
}
