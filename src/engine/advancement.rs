//! Advancement routing: computing the unique downstream slot a knockout
//! winner occupies and planning the writes that place it there. Planning is
//! pure and reads the match arena only; the store applies the plan.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::engine::{
    error::{BracketError, BracketResult},
    model::Match,
};

/// Arena address of a match: `(round, position)`.
pub type ArenaKey = (u32, u32);

/// Player slot of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The `player1` side.
    Player1,
    /// The `player2` side.
    Player2,
}

/// The downstream address a winner leaving a match is routed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTarget {
    /// Round of the downstream match.
    pub round: u32,
    /// Position of the downstream match within its round.
    pub position: u32,
    /// Which player slot the winner occupies.
    pub slot: Slot,
}

/// One planned write of an occupant into a downstream slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWrite {
    /// Round of the match being written.
    pub round: u32,
    /// Position of the match being written.
    pub position: u32,
    /// Slot being filled.
    pub slot: Slot,
    /// Participant placed into the slot.
    pub occupant: Uuid,
}

/// Downstream slot fed by the match at `(round, position)`.
///
/// The winner of position `p` lands at position `p / 2` of the next round,
/// on the `player1` side when `p` is even and the `player2` side when odd.
pub fn advancement_target(round: u32, position: u32) -> SlotTarget {
    SlotTarget {
        round: round + 1,
        position: position / 2,
        slot: if position % 2 == 0 {
            Slot::Player1
        } else {
            Slot::Player2
        },
    }
}

/// Highest round present in the arena.
pub fn last_round(arena: &BTreeMap<ArenaKey, Match>) -> u32 {
    arena.keys().map(|(round, _)| *round).max().unwrap_or(0)
}

/// Count real entrants in the round-0 subtree feeding match `(round, position)`.
///
/// With byes padded at the tail of the entrant list, an empty subtree means
/// no opponent can ever emerge from that side of the bracket.
pub fn subtree_entrants(arena: &BTreeMap<ArenaKey, Match>, round: u32, position: u32) -> usize {
    let width = 1u32 << round;
    let start = position * width;
    (start..start + width)
        .filter_map(|q| arena.get(&(0, q)))
        .map(|m| usize::from(m.player1.is_some()) + usize::from(m.player2.is_some()))
        .sum()
}

/// Plan the slot writes that place an occupant after it leaves
/// `(from_round, from_position)`.
///
/// The occupant is always written into the directly downstream slot. While
/// the opposite feeder subtree of the reached match holds no entrants, no
/// opponent can ever arrive there, so routing continues upward under the
/// same parity rule until a contested match or the final is reached. Every
/// hop is occupancy-checked: each slot is written exactly once per
/// tournament run, and a filled slot is an internal consistency violation,
/// not a caller error.
pub fn plan_advancement(
    arena: &BTreeMap<ArenaKey, Match>,
    from_round: u32,
    from_position: u32,
    occupant: Uuid,
) -> BracketResult<Vec<SlotWrite>> {
    let final_round = last_round(arena);
    let mut writes = Vec::new();
    let (mut round, mut position) = (from_round, from_position);

    while round < final_round {
        let target = advancement_target(round, position);
        let downstream =
            arena
                .get(&(target.round, target.position))
                .ok_or(BracketError::MissingMatch {
                    round: target.round,
                    position: target.position,
                })?;
        let occupied = match target.slot {
            Slot::Player1 => downstream.player1,
            Slot::Player2 => downstream.player2,
        };
        if occupied.is_some() {
            return Err(BracketError::SlotOccupied {
                round: target.round,
                position: target.position,
            });
        }
        writes.push(SlotWrite {
            round: target.round,
            position: target.position,
            slot: target.slot,
            occupant,
        });

        // The sibling feeder of the match just entered decides whether an
        // opponent can ever show up there.
        if subtree_entrants(arena, round, position ^ 1) > 0 {
            break;
        }
        round = target.round;
        position = target.position;
    }

    Ok(writes)
}
