//! Pairing generation: pure functions producing the initial match topology
//! for a tournament format. No side effects, no storage access; the store
//! assigns identities when the plan is installed.

use rand::Rng;
use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::engine::{
    error::{BracketError, BracketResult},
    model::Participant,
};

/// Minimum number of participants any format can be generated for.
pub const MIN_PARTICIPANTS: usize = 2;

/// A match planned by the generator, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMatch {
    /// 0-based round the match belongs to.
    pub round: u32,
    /// 0-based slot within the round.
    pub position: u32,
    /// First opponent, absent for byes and placeholder rounds.
    pub player1: Option<Uuid>,
    /// Second opponent, absent for byes and placeholder rounds.
    pub player2: Option<Uuid>,
}

impl PlannedMatch {
    fn empty(round: u32, position: u32) -> Self {
        Self {
            round,
            position,
            player1: None,
            player2: None,
        }
    }
}

/// Smallest power of two that holds `n` participants.
pub fn bracket_size(n: usize) -> usize {
    n.next_power_of_two()
}

/// Number of rounds in a padded knockout bracket of `size` entrants.
///
/// `size` must be the power of two returned by [`bracket_size`].
pub fn round_count(size: usize) -> u32 {
    size.trailing_zeros()
}

/// Order participants for knockout pairing.
///
/// Seeded participants come first, ascending by rank (ties broken by
/// enrollment time); unseeded participants follow in enrollment order, or
/// uniformly shuffled when `shuffle_unseeded` is set. The generic `rng` lets
/// tests drive the shuffle with a seeded generator.
pub fn seeding_order<R: Rng + ?Sized>(
    participants: &[Participant],
    shuffle_unseeded: bool,
    rng: &mut R,
) -> Vec<Uuid> {
    let (mut seeded, unseeded): (Vec<&Participant>, Vec<&Participant>) = participants
        .iter()
        .partition(|participant| participant.seed_rank.is_some());
    seeded.sort_by_key(|participant| {
        (
            participant.seed_rank.unwrap_or(u32::MAX),
            participant.enrolled_at,
        )
    });

    let mut tail: Vec<Uuid> = unseeded.iter().map(|participant| participant.id).collect();
    if shuffle_unseeded {
        tail.shuffle(rng);
    }

    seeded
        .iter()
        .map(|participant| participant.id)
        .chain(tail)
        .collect()
}

/// Build the full knockout topology for an ordered participant list.
///
/// The list is padded with byes to the next power of two; round 0 pairs
/// padded elements `2i` and `2i+1`, and every later round is created with
/// both slots absent. Bye slots stay absent: a lone participant is not
/// auto-advanced here, that is the store's routing concern at installation.
pub fn knockout_bracket(ordered: &[Uuid]) -> BracketResult<Vec<PlannedMatch>> {
    if ordered.len() < MIN_PARTICIPANTS {
        return Err(BracketError::InsufficientParticipants {
            found: ordered.len(),
        });
    }

    let size = bracket_size(ordered.len());
    let rounds = round_count(size);
    let mut planned = Vec::with_capacity(size - 1);

    for i in 0..size / 2 {
        planned.push(PlannedMatch {
            round: 0,
            position: i as u32,
            player1: ordered.get(2 * i).copied(),
            player2: ordered.get(2 * i + 1).copied(),
        });
    }
    for round in 1..rounds {
        let count = size >> (round + 1);
        for position in 0..count {
            planned.push(PlannedMatch::empty(round, position as u32));
        }
    }

    Ok(planned)
}

/// Build the round-robin pairing list: one match per unordered pair.
///
/// All matches live in round 0; `position = i*n + j` keeps positions
/// injective without being contiguous.
pub fn round_robin_schedule(ordered: &[Uuid]) -> BracketResult<Vec<PlannedMatch>> {
    if ordered.len() < MIN_PARTICIPANTS {
        return Err(BracketError::InsufficientParticipants {
            found: ordered.len(),
        });
    }

    let n = ordered.len();
    let mut planned = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            planned.push(PlannedMatch {
                round: 0,
                position: (i * n + j) as u32,
                player1: Some(ordered[i]),
                player2: Some(ordered[j]),
            });
        }
    }

    Ok(planned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;
    use std::time::{Duration, SystemTime};

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    fn participant(tournament_id: Uuid, seed_rank: Option<u32>, order: u64) -> Participant {
        let mut p = Participant::new(tournament_id, Uuid::new_v4(), format!("p{order}"), seed_rank);
        p.enrolled_at = SystemTime::UNIX_EPOCH + Duration::from_secs(order);
        p
    }

    #[test]
    fn four_participants_yield_two_rounds() {
        let entrants = ids(4);
        let planned = knockout_bracket(&entrants).unwrap();

        assert_eq!(planned.len(), 3);
        assert_eq!(planned[0].player1, Some(entrants[0]));
        assert_eq!(planned[0].player2, Some(entrants[1]));
        assert_eq!(planned[1].player1, Some(entrants[2]));
        assert_eq!(planned[1].player2, Some(entrants[3]));
        assert_eq!((planned[2].round, planned[2].position), (1, 0));
        assert_eq!(planned[2].player1, None);
        assert_eq!(planned[2].player2, None);
    }

    #[test]
    fn five_participants_pad_to_eight() {
        let entrants = ids(5);
        let planned = knockout_bracket(&entrants).unwrap();

        assert_eq!(planned.len(), 7);
        assert_eq!(planned.iter().filter(|m| m.round == 0).count(), 4);
        // Byes pad the tail: position 2 holds the lone fifth entrant,
        // position 3 is fully empty.
        assert_eq!(planned[2].player1, Some(entrants[4]));
        assert_eq!(planned[2].player2, None);
        assert_eq!(planned[3].player1, None);
        assert_eq!(planned[3].player2, None);
    }

    #[test]
    fn one_participant_is_rejected() {
        let entrants = ids(1);
        assert_eq!(
            knockout_bracket(&entrants),
            Err(BracketError::InsufficientParticipants { found: 1 })
        );
        assert_eq!(
            round_robin_schedule(&entrants),
            Err(BracketError::InsufficientParticipants { found: 1 })
        );
    }

    #[test]
    fn round_robin_three_pairs_each_once() {
        let entrants = ids(3);
        let planned = round_robin_schedule(&entrants).unwrap();

        assert_eq!(planned.len(), 3);
        assert!(planned.iter().all(|m| m.round == 0));
        let positions: Vec<u32> = planned.iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![1, 2, 5]);
        let pairs: HashSet<(Uuid, Uuid)> = planned
            .iter()
            .map(|m| (m.player1.unwrap(), m.player2.unwrap()))
            .collect();
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn seeding_order_puts_seeds_first() {
        let tournament_id = Uuid::new_v4();
        let second = participant(tournament_id, Some(2), 0);
        let first = participant(tournament_id, Some(1), 1);
        let unseeded = participant(tournament_id, None, 2);
        let mut rng = StdRng::seed_from_u64(7);

        let order = seeding_order(
            &[unseeded.clone(), second.clone(), first.clone()],
            false,
            &mut rng,
        );

        assert_eq!(order, vec![first.id, second.id, unseeded.id]);
    }

    #[test]
    fn seed_ties_break_by_enrollment_time() {
        let tournament_id = Uuid::new_v4();
        let earlier = participant(tournament_id, Some(1), 0);
        let later = participant(tournament_id, Some(1), 5);
        let mut rng = StdRng::seed_from_u64(7);

        let order = seeding_order(&[later.clone(), earlier.clone()], false, &mut rng);

        assert_eq!(order, vec![earlier.id, later.id]);
    }

    #[test]
    fn shuffle_is_uniform_per_seed_and_keeps_the_pool() {
        let tournament_id = Uuid::new_v4();
        let pool: Vec<Participant> = (0..8)
            .map(|i| participant(tournament_id, None, i))
            .collect();

        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let order_a = seeding_order(&pool, true, &mut rng_a);
        let order_b = seeding_order(&pool, true, &mut rng_b);

        assert_eq!(order_a, order_b);
        let expected: HashSet<Uuid> = pool.iter().map(|p| p.id).collect();
        let shuffled: HashSet<Uuid> = order_a.into_iter().collect();
        assert_eq!(shuffled, expected);
    }

    proptest! {
        #[test]
        fn knockout_shape_holds(n in 2usize..=64) {
            let entrants = ids(n);
            let planned = knockout_bracket(&entrants).unwrap();
            let size = bracket_size(n);

            prop_assert_eq!(planned.iter().filter(|m| m.round == 0).count(), size / 2);
            let last_round = planned.iter().map(|m| m.round).max().unwrap();
            prop_assert_eq!(last_round + 1, round_count(size));
            prop_assert_eq!(planned.len(), size - 1);
        }

        #[test]
        fn round_robin_shape_holds(n in 2usize..=64) {
            let entrants = ids(n);
            let planned = round_robin_schedule(&entrants).unwrap();

            prop_assert_eq!(planned.len(), n * (n - 1) / 2);
            let positions: HashSet<u32> = planned.iter().map(|m| m.position).collect();
            prop_assert_eq!(positions.len(), planned.len());
            let pairs: HashSet<(Uuid, Uuid)> = planned
                .iter()
                .map(|m| (m.player1.unwrap(), m.player2.unwrap()))
                .collect();
            prop_assert_eq!(pairs.len(), planned.len());
        }
    }
}
