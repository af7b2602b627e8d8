//! In-memory [`BracketStore`] implementation.
//!
//! Every tournament lives in one concurrent-map entry holding its record and
//! every owned row. Composite operations take the entry guard, validate and
//! plan with the pure engine functions while only reading, then apply the
//! whole mutation before releasing the guard; concurrent calls against the
//! same tournament therefore serialize, and a rejected call mutates nothing.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::SystemTime;

use dashmap::DashMap;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use uuid::Uuid;

use crate::dao::store::{BracketStore, RecordedResult, StatusChange};
use crate::engine::{
    advancement::{self, ArenaKey, Slot, SlotWrite},
    error::{BracketError, BracketResult},
    lifecycle::{self, Transition},
    model::{Format, Match, MatchStatus, Participant, Standing, Tournament, TournamentStatus},
    pairing, scoring,
};

/// One tournament and every row it owns, mutated only under its map entry.
#[derive(Debug)]
struct TournamentRecord {
    tournament: Tournament,
    /// Enrollments keyed by participant id, in enrollment order.
    participants: IndexMap<Uuid, Participant>,
    /// The match arena; iteration order is `(round, position)` ascending.
    matches: BTreeMap<ArenaKey, Match>,
    /// Match id to arena address.
    match_index: HashMap<Uuid, ArenaKey>,
    /// Standing rows keyed by participant id, in first-result order.
    standings: IndexMap<Uuid, Standing>,
}

impl TournamentRecord {
    fn new(tournament: Tournament) -> Self {
        Self {
            tournament,
            participants: IndexMap::new(),
            matches: BTreeMap::new(),
            match_index: HashMap::new(),
            standings: IndexMap::new(),
        }
    }

    fn bracket_initialized(&self) -> bool {
        !self.matches.is_empty()
    }

    fn ensure_open(&self) -> BracketResult<()> {
        if self.tournament.status == TournamentStatus::Completed {
            return Err(BracketError::TournamentCompleted(self.tournament.id));
        }
        Ok(())
    }

    fn ensure_bracket_absent(&self) -> BracketResult<()> {
        if self.bracket_initialized() {
            return Err(BracketError::BracketAlreadyInitialized(self.tournament.id));
        }
        Ok(())
    }
}

// Lock order: a `records` guard may be held while touching `match_owner`,
// never the reverse; owner lookups copy the id out before locking `records`.
#[derive(Debug, Default)]
struct Inner {
    records: DashMap<Uuid, TournamentRecord>,
    match_owner: DashMap<Uuid, Uuid>,
}

/// In-memory bracket state store backed by a sharded concurrent map.
#[derive(Debug, Clone, Default)]
pub struct MemoryBracketStore {
    inner: Arc<Inner>,
}

impl MemoryBracketStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn create_tournament(&self, tournament: Tournament) -> BracketResult<Tournament> {
        self.inner
            .records
            .insert(tournament.id, TournamentRecord::new(tournament.clone()));
        Ok(tournament)
    }

    fn find_tournament(&self, id: Uuid) -> BracketResult<Tournament> {
        self.inner
            .records
            .get(&id)
            .map(|record| record.tournament.clone())
            .ok_or(BracketError::TournamentNotFound(id))
    }

    fn list_tournaments(&self) -> BracketResult<Vec<Tournament>> {
        let mut tournaments: Vec<Tournament> = self
            .inner
            .records
            .iter()
            .map(|record| record.tournament.clone())
            .collect();
        tournaments.sort_by_key(|t| (t.created_at, t.id));
        Ok(tournaments)
    }

    fn delete_tournament(&self, id: Uuid) -> BracketResult<()> {
        let (_, record) = self
            .inner
            .records
            .remove(&id)
            .ok_or(BracketError::TournamentNotFound(id))?;
        for match_id in record.match_index.keys() {
            self.inner.match_owner.remove(match_id);
        }
        Ok(())
    }

    fn enroll_participant(
        &self,
        tournament_id: Uuid,
        participant: Participant,
        capacity: usize,
    ) -> BracketResult<Participant> {
        let mut entry = self
            .inner
            .records
            .get_mut(&tournament_id)
            .ok_or(BracketError::TournamentNotFound(tournament_id))?;
        let record = entry.value_mut();
        record.ensure_open()?;
        record.ensure_bracket_absent()?;
        if record
            .participants
            .values()
            .any(|existing| existing.member_id == participant.member_id)
        {
            return Err(BracketError::AlreadyEnrolled(participant.member_id));
        }
        if record.participants.len() >= capacity {
            return Err(BracketError::TournamentFull { capacity });
        }

        record.participants.insert(participant.id, participant.clone());
        record.tournament.touch();
        Ok(participant)
    }

    fn withdraw_participant(
        &self,
        tournament_id: Uuid,
        participant_id: Uuid,
    ) -> BracketResult<()> {
        let mut entry = self
            .inner
            .records
            .get_mut(&tournament_id)
            .ok_or(BracketError::TournamentNotFound(tournament_id))?;
        let record = entry.value_mut();
        record.ensure_open()?;
        record.ensure_bracket_absent()?;
        record
            .participants
            .shift_remove(&participant_id)
            .ok_or(BracketError::ParticipantNotFound(participant_id))?;
        record.tournament.touch();
        Ok(())
    }

    fn list_participants(&self, tournament_id: Uuid) -> BracketResult<Vec<Participant>> {
        let entry = self
            .inner
            .records
            .get(&tournament_id)
            .ok_or(BracketError::TournamentNotFound(tournament_id))?;
        Ok(entry.participants.values().cloned().collect())
    }

    fn initialize_bracket(
        &self,
        tournament_id: Uuid,
        shuffle_unseeded: bool,
    ) -> BracketResult<Vec<Match>> {
        let mut entry = self
            .inner
            .records
            .get_mut(&tournament_id)
            .ok_or(BracketError::TournamentNotFound(tournament_id))?;
        let record = entry.value_mut();
        record.ensure_open()?;
        record.ensure_bracket_absent()?;

        let roster: Vec<Participant> = record.participants.values().cloned().collect();
        let ordered = pairing::seeding_order(&roster, shuffle_unseeded, &mut rand::rng());
        let planned = match record.tournament.format {
            Format::Knockout => pairing::knockout_bracket(&ordered)?,
            Format::RoundRobin => pairing::round_robin_schedule(&ordered)?,
        };

        let mut arena: BTreeMap<ArenaKey, Match> = planned
            .into_iter()
            .map(|plan| {
                (
                    (plan.round, plan.position),
                    Match::new(
                        tournament_id,
                        plan.round,
                        plan.position,
                        plan.player1,
                        plan.player2,
                    ),
                )
            })
            .collect();

        // Route every lone round-0 participant past its bye. The bye match
        // itself stays a SCHEDULED artifact with one absent slot.
        if record.tournament.format == Format::Knockout {
            let lone: Vec<(u32, Uuid)> = arena
                .values()
                .take_while(|m| m.round == 0)
                .filter_map(|m| match (m.player1, m.player2) {
                    (Some(occupant), None) | (None, Some(occupant)) => {
                        Some((m.position, occupant))
                    }
                    _ => None,
                })
                .collect();
            for (position, occupant) in lone {
                let writes = advancement::plan_advancement(&arena, 0, position, occupant)?;
                apply_slot_writes(&mut arena, &writes);
            }
        }

        record.match_index = arena
            .values()
            .map(|m| (m.id, (m.round, m.position)))
            .collect();
        for m in arena.values() {
            self.inner.match_owner.insert(m.id, tournament_id);
        }
        record.matches = arena;
        record.tournament.touch();

        Ok(record.matches.values().cloned().collect())
    }

    fn list_matches(&self, tournament_id: Uuid) -> BracketResult<Vec<Match>> {
        let entry = self
            .inner
            .records
            .get(&tournament_id)
            .ok_or(BracketError::TournamentNotFound(tournament_id))?;
        Ok(entry.matches.values().cloned().collect())
    }

    fn record_result(
        &self,
        match_id: Uuid,
        player1_score: u32,
        player2_score: u32,
    ) -> BracketResult<RecordedResult> {
        let Some(owner) = self.inner.match_owner.get(&match_id).map(|e| *e.value()) else {
            return Err(BracketError::MatchNotFound(match_id));
        };
        let mut entry = self
            .inner
            .records
            .get_mut(&owner)
            .ok_or(BracketError::MatchNotFound(match_id))?;
        let record = entry.value_mut();
        record.ensure_open()?;
        let key = *record
            .match_index
            .get(&match_id)
            .ok_or(BracketError::MatchNotFound(match_id))?;
        let format = record.tournament.format;

        // Validation and planning; nothing below reads as mutation until the
        // whole plan is known to succeed.
        let current = record
            .matches
            .get(&key)
            .ok_or(BracketError::CorruptMatch(match_id))?;
        let (Some(player1), Some(player2)) = (current.player1, current.player2) else {
            return Err(BracketError::OpponentsUndetermined(match_id));
        };
        let outcome = scoring::decide(format, player1_score, player2_score)?;
        let final_round = advancement::last_round(&record.matches);
        let is_edit = current.status == MatchStatus::Completed;
        if is_edit && format == Format::Knockout && key.0 < final_round {
            return Err(BracketError::ResultLocked(match_id));
        }
        let reversal = if is_edit {
            match (current.player1_score, current.player2_score) {
                (Some(prev1), Some(prev2)) => {
                    let prev_outcome = scoring::decide(format, prev1, prev2)?;
                    Some(scoring::result_deltas(prev_outcome, prev1, prev2))
                }
                _ => return Err(BracketError::CorruptMatch(match_id)),
            }
        } else {
            None
        };
        if reversal.is_some()
            && (!record.standings.contains_key(&player1)
                || !record.standings.contains_key(&player2))
        {
            return Err(BracketError::CorruptMatch(match_id));
        }
        let winner = outcome.winner(player1, player2);
        let advancement_plan: Vec<SlotWrite> = match (format, is_edit, winner) {
            (Format::Knockout, false, Some(winner_id)) => {
                advancement::plan_advancement(&record.matches, key.0, key.1, winner_id)?
            }
            _ => Vec::new(),
        };

        // Apply phase: the atomic unit. Order is match, standings,
        // advancement; no step below can fail.
        let settled = {
            let m = record
                .matches
                .get_mut(&key)
                .ok_or(BracketError::CorruptMatch(match_id))?;
            m.player1_score = Some(player1_score);
            m.player2_score = Some(player2_score);
            m.winner = winner;
            m.status = MatchStatus::Completed;
            m.clone()
        };
        if let Some((prev_delta1, prev_delta2)) = reversal {
            if let Some(row) = record.standings.get_mut(&player1) {
                row.revert(&prev_delta1);
            }
            if let Some(row) = record.standings.get_mut(&player2) {
                row.revert(&prev_delta2);
            }
        }
        let (delta1, delta2) = scoring::result_deltas(outcome, player1_score, player2_score);
        record
            .standings
            .entry(player1)
            .or_insert_with(|| Standing::new(owner, player1))
            .apply(&delta1);
        record
            .standings
            .entry(player2)
            .or_insert_with(|| Standing::new(owner, player2))
            .apply(&delta2);
        let advanced_to = advancement_plan.last().map(|w| (w.round, w.position));
        apply_slot_writes(&mut record.matches, &advancement_plan);
        record.tournament.touch();

        Ok(RecordedResult {
            settled,
            advanced_to,
        })
    }

    fn schedule_match(
        &self,
        match_id: Uuid,
        scheduled_at: Option<SystemTime>,
        court: Option<String>,
    ) -> BracketResult<Match> {
        let Some(owner) = self.inner.match_owner.get(&match_id).map(|e| *e.value()) else {
            return Err(BracketError::MatchNotFound(match_id));
        };
        let mut entry = self
            .inner
            .records
            .get_mut(&owner)
            .ok_or(BracketError::MatchNotFound(match_id))?;
        let record = entry.value_mut();
        let key = *record
            .match_index
            .get(&match_id)
            .ok_or(BracketError::MatchNotFound(match_id))?;
        let m = record
            .matches
            .get_mut(&key)
            .ok_or(BracketError::CorruptMatch(match_id))?;
        m.scheduled_at = scheduled_at;
        m.court = court;
        let updated = m.clone();
        record.tournament.touch();
        Ok(updated)
    }

    fn list_standings(&self, tournament_id: Uuid) -> BracketResult<Vec<Standing>> {
        let entry = self
            .inner
            .records
            .get(&tournament_id)
            .ok_or(BracketError::TournamentNotFound(tournament_id))?;
        Ok(entry.standings.values().cloned().collect())
    }

    fn set_status(
        &self,
        tournament_id: Uuid,
        target: TournamentStatus,
    ) -> BracketResult<StatusChange> {
        let mut entry = self
            .inner
            .records
            .get_mut(&tournament_id)
            .ok_or(BracketError::TournamentNotFound(tournament_id))?;
        let record = entry.value_mut();
        let previous = record.tournament.status;
        if let Transition::Advanced { .. } = lifecycle::transition(previous, target)? {
            record.tournament.status = target;
            record.tournament.touch();
        }
        Ok(StatusChange {
            previous,
            tournament: record.tournament.clone(),
        })
    }
}

fn apply_slot_writes(arena: &mut BTreeMap<ArenaKey, Match>, writes: &[SlotWrite]) {
    for write in writes {
        if let Some(m) = arena.get_mut(&(write.round, write.position)) {
            match write.slot {
                Slot::Player1 => m.player1 = Some(write.occupant),
                Slot::Player2 => m.player2 = Some(write.occupant),
            }
        }
    }
}

impl BracketStore for MemoryBracketStore {
    fn create_tournament(
        &self,
        tournament: Tournament,
    ) -> BoxFuture<'static, BracketResult<Tournament>> {
        let store = self.clone();
        Box::pin(async move { store.create_tournament(tournament) })
    }

    fn find_tournament(&self, id: Uuid) -> BoxFuture<'static, BracketResult<Tournament>> {
        let store = self.clone();
        Box::pin(async move { store.find_tournament(id) })
    }

    fn list_tournaments(&self) -> BoxFuture<'static, BracketResult<Vec<Tournament>>> {
        let store = self.clone();
        Box::pin(async move { store.list_tournaments() })
    }

    fn delete_tournament(&self, id: Uuid) -> BoxFuture<'static, BracketResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.delete_tournament(id) })
    }

    fn enroll_participant(
        &self,
        tournament_id: Uuid,
        participant: Participant,
        capacity: usize,
    ) -> BoxFuture<'static, BracketResult<Participant>> {
        let store = self.clone();
        Box::pin(async move { store.enroll_participant(tournament_id, participant, capacity) })
    }

    fn withdraw_participant(
        &self,
        tournament_id: Uuid,
        participant_id: Uuid,
    ) -> BoxFuture<'static, BracketResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.withdraw_participant(tournament_id, participant_id) })
    }

    fn list_participants(
        &self,
        tournament_id: Uuid,
    ) -> BoxFuture<'static, BracketResult<Vec<Participant>>> {
        let store = self.clone();
        Box::pin(async move { store.list_participants(tournament_id) })
    }

    fn initialize_bracket(
        &self,
        tournament_id: Uuid,
        shuffle_unseeded: bool,
    ) -> BoxFuture<'static, BracketResult<Vec<Match>>> {
        let store = self.clone();
        Box::pin(async move { store.initialize_bracket(tournament_id, shuffle_unseeded) })
    }

    fn list_matches(&self, tournament_id: Uuid) -> BoxFuture<'static, BracketResult<Vec<Match>>> {
        let store = self.clone();
        Box::pin(async move { store.list_matches(tournament_id) })
    }

    fn record_result(
        &self,
        match_id: Uuid,
        player1_score: u32,
        player2_score: u32,
    ) -> BoxFuture<'static, BracketResult<RecordedResult>> {
        let store = self.clone();
        Box::pin(async move { store.record_result(match_id, player1_score, player2_score) })
    }

    fn schedule_match(
        &self,
        match_id: Uuid,
        scheduled_at: Option<SystemTime>,
        court: Option<String>,
    ) -> BoxFuture<'static, BracketResult<Match>> {
        let store = self.clone();
        Box::pin(async move { store.schedule_match(match_id, scheduled_at, court) })
    }

    fn list_standings(
        &self,
        tournament_id: Uuid,
    ) -> BoxFuture<'static, BracketResult<Vec<Standing>>> {
        let store = self.clone();
        Box::pin(async move { store.list_standings(tournament_id) })
    }

    fn set_status(
        &self,
        tournament_id: Uuid,
        target: TournamentStatus,
    ) -> BoxFuture<'static, BracketResult<StatusChange>> {
        let store = self.clone();
        Box::pin(async move { store.set_status(tournament_id, target) })
    }

    fn health_check(&self) -> BoxFuture<'static, BracketResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAPACITY: usize = 64;

    fn tournament(format: Format) -> Tournament {
        Tournament::new(Uuid::new_v4(), None, "club open".into(), format)
    }

    /// Create a tournament and enroll `n` unseeded participants in order.
    fn seeded_store(format: Format, n: usize) -> (MemoryBracketStore, Uuid, Vec<Participant>) {
        let store = MemoryBracketStore::new();
        let created = store.create_tournament(tournament(format)).unwrap();
        let participants: Vec<Participant> = (0..n)
            .map(|i| {
                let participant = Participant::new(
                    created.id,
                    Uuid::new_v4(),
                    format!("member {i}"),
                    None,
                );
                store
                    .enroll_participant(created.id, participant, CAPACITY)
                    .unwrap()
            })
            .collect();
        (store, created.id, participants)
    }

    fn match_at(store: &MemoryBracketStore, tournament_id: Uuid, key: ArenaKey) -> Match {
        store
            .list_matches(tournament_id)
            .unwrap()
            .into_iter()
            .find(|m| (m.round, m.position) == key)
            .unwrap()
    }

    fn standing_of(store: &MemoryBracketStore, tournament_id: Uuid, participant: Uuid) -> Standing {
        store
            .list_standings(tournament_id)
            .unwrap()
            .into_iter()
            .find(|s| s.participant_id == participant)
            .unwrap()
    }

    #[test]
    fn create_fetch_and_delete_roundtrip() {
        let store = MemoryBracketStore::new();
        let created = store.create_tournament(tournament(Format::Knockout)).unwrap();

        assert_eq!(store.find_tournament(created.id).unwrap(), created);

        store.delete_tournament(created.id).unwrap();
        assert_eq!(
            store.find_tournament(created.id),
            Err(BracketError::TournamentNotFound(created.id))
        );
    }

    #[test]
    fn deleting_a_tournament_drops_its_matches() {
        let (store, tournament_id, _) = seeded_store(Format::Knockout, 4);
        let matches = store.initialize_bracket(tournament_id, false).unwrap();

        store.delete_tournament(tournament_id).unwrap();

        assert_eq!(
            store.record_result(matches[0].id, 21, 15),
            Err(BracketError::MatchNotFound(matches[0].id))
        );
    }

    #[test]
    fn duplicate_member_enrollment_is_rejected() {
        let (store, tournament_id, participants) = seeded_store(Format::Knockout, 2);
        let duplicate = Participant::new(
            tournament_id,
            participants[0].member_id,
            "same member again".into(),
            None,
        );

        assert_eq!(
            store.enroll_participant(tournament_id, duplicate, CAPACITY),
            Err(BracketError::AlreadyEnrolled(participants[0].member_id))
        );
    }

    #[test]
    fn enrollment_capacity_is_enforced() {
        let (store, tournament_id, _) = seeded_store(Format::Knockout, 2);
        let extra = Participant::new(tournament_id, Uuid::new_v4(), "late".into(), None);

        assert_eq!(
            store.enroll_participant(tournament_id, extra, 2),
            Err(BracketError::TournamentFull { capacity: 2 })
        );
    }

    #[test]
    fn enrollment_closes_once_the_bracket_exists() {
        let (store, tournament_id, participants) = seeded_store(Format::Knockout, 4);
        store.initialize_bracket(tournament_id, false).unwrap();

        let late = Participant::new(tournament_id, Uuid::new_v4(), "late".into(), None);
        assert_eq!(
            store.enroll_participant(tournament_id, late, CAPACITY),
            Err(BracketError::BracketAlreadyInitialized(tournament_id))
        );
        assert_eq!(
            store.withdraw_participant(tournament_id, participants[0].id),
            Err(BracketError::BracketAlreadyInitialized(tournament_id))
        );
    }

    #[test]
    fn withdrawal_works_before_initialization() {
        let (store, tournament_id, participants) = seeded_store(Format::Knockout, 3);

        store
            .withdraw_participant(tournament_id, participants[1].id)
            .unwrap();

        let remaining = store.list_participants(tournament_id).unwrap();
        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|p| p.id != participants[1].id));

        assert_eq!(
            store.withdraw_participant(tournament_id, participants[1].id),
            Err(BracketError::ParticipantNotFound(participants[1].id))
        );
    }

    #[test]
    fn knockout_initialization_builds_the_ordered_arena() {
        let (store, tournament_id, participants) = seeded_store(Format::Knockout, 4);

        let matches = store.initialize_bracket(tournament_id, false).unwrap();

        let keys: Vec<ArenaKey> = matches.iter().map(|m| (m.round, m.position)).collect();
        assert_eq!(keys, vec![(0, 0), (0, 1), (1, 0)]);
        assert_eq!(matches[0].player1, Some(participants[0].id));
        assert_eq!(matches[0].player2, Some(participants[1].id));
        assert_eq!(matches[1].player1, Some(participants[2].id));
        assert_eq!(matches[1].player2, Some(participants[3].id));
        assert!(!matches[2].players_decided());
    }

    #[test]
    fn bracket_is_generated_once() {
        let (store, tournament_id, _) = seeded_store(Format::Knockout, 4);
        store.initialize_bracket(tournament_id, false).unwrap();

        assert_eq!(
            store.initialize_bracket(tournament_id, false),
            Err(BracketError::BracketAlreadyInitialized(tournament_id))
        );
    }

    #[test]
    fn listing_matches_is_read_only() {
        let (store, tournament_id, _) = seeded_store(Format::Knockout, 4);
        store.initialize_bracket(tournament_id, false).unwrap();

        let first = store.list_matches(tournament_id).unwrap();
        let second = store.list_matches(tournament_id).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn initialization_needs_two_participants() {
        let (store, tournament_id, _) = seeded_store(Format::Knockout, 1);

        assert_eq!(
            store.initialize_bracket(tournament_id, false),
            Err(BracketError::InsufficientParticipants { found: 1 })
        );
    }

    #[test]
    fn round_robin_initialization_builds_the_pair_list() {
        let (store, tournament_id, _) = seeded_store(Format::RoundRobin, 3);

        let matches = store.initialize_bracket(tournament_id, false).unwrap();

        let keys: Vec<ArenaKey> = matches.iter().map(|m| (m.round, m.position)).collect();
        assert_eq!(keys, vec![(0, 1), (0, 2), (0, 5)]);
        assert!(matches.iter().all(|m| m.players_decided()));
    }

    #[test]
    fn byes_route_to_the_first_contested_match() {
        let (store, tournament_id, participants) = seeded_store(Format::Knockout, 5);

        store.initialize_bracket(tournament_id, false).unwrap();

        let lone = participants[4].id;
        let bye_match = match_at(&store, tournament_id, (0, 2));
        assert_eq!(bye_match.player1, Some(lone));
        assert_eq!(bye_match.player2, None);
        assert_eq!(bye_match.status, MatchStatus::Scheduled);
        // Both round-1 siblings of the lone entrant are entrant-free, so the
        // routing continues into the final's player2 slot.
        assert_eq!(match_at(&store, tournament_id, (1, 1)).player1, Some(lone));
        assert_eq!(match_at(&store, tournament_id, (2, 0)).player2, Some(lone));
        assert!(store.list_standings(tournament_id).unwrap().is_empty());
    }

    #[test]
    fn recording_settles_standings_and_advances_the_winner() {
        let (store, tournament_id, participants) = seeded_store(Format::Knockout, 4);
        let matches = store.initialize_bracket(tournament_id, false).unwrap();
        let (a, b, c, d) = (
            participants[0].id,
            participants[1].id,
            participants[2].id,
            participants[3].id,
        );

        let first = store.record_result(matches[0].id, 21, 15).unwrap();
        assert_eq!(first.settled.winner, Some(a));
        assert_eq!(first.settled.status, MatchStatus::Completed);
        assert_eq!(first.advanced_to, Some((1, 0)));

        let second = store.record_result(matches[1].id, 21, 18).unwrap();
        assert_eq!(second.settled.winner, Some(c));

        let final_match = match_at(&store, tournament_id, (1, 0));
        assert_eq!(final_match.player1, Some(a));
        assert_eq!(final_match.player2, Some(c));

        assert_eq!(standing_of(&store, tournament_id, a).wins, 1);
        assert_eq!(standing_of(&store, tournament_id, b).losses, 1);
        assert_eq!(standing_of(&store, tournament_id, b).points_for, 15);
        assert_eq!(standing_of(&store, tournament_id, d).points_against, 21);

        let decider = store.record_result(final_match.id, 22, 20).unwrap();
        assert_eq!(decider.settled.winner, Some(a));
        assert_eq!(decider.advanced_to, None);
        assert_eq!(standing_of(&store, tournament_id, a).matches_played, 2);
        assert_eq!(standing_of(&store, tournament_id, c).matches_played, 2);
    }

    #[test]
    fn matches_played_counts_completed_appearances() {
        let (store, tournament_id, _) = seeded_store(Format::Knockout, 4);
        store.initialize_bracket(tournament_id, false).unwrap();

        store
            .record_result(match_at(&store, tournament_id, (0, 0)).id, 21, 15)
            .unwrap();
        store
            .record_result(match_at(&store, tournament_id, (0, 1)).id, 21, 18)
            .unwrap();
        store
            .record_result(match_at(&store, tournament_id, (1, 0)).id, 22, 20)
            .unwrap();

        let matches = store.list_matches(tournament_id).unwrap();
        let standings = store.list_standings(tournament_id).unwrap();
        assert_eq!(standings.len(), 4);
        for row in standings {
            let appearances = matches
                .iter()
                .filter(|m| m.status == MatchStatus::Completed && m.involves(row.participant_id))
                .count();
            assert_eq!(row.matches_played as usize, appearances);
        }
    }

    #[test]
    fn tied_knockout_scores_leave_state_untouched() {
        let (store, tournament_id, _) = seeded_store(Format::Knockout, 4);
        let matches = store.initialize_bracket(tournament_id, false).unwrap();

        assert_eq!(
            store.record_result(matches[0].id, 11, 11),
            Err(BracketError::TiedKnockoutScore { score: 11 })
        );

        let untouched = match_at(&store, tournament_id, (0, 0));
        assert_eq!(untouched.status, MatchStatus::Scheduled);
        assert_eq!(untouched.winner, None);
        assert!(store.list_standings(tournament_id).unwrap().is_empty());
    }

    #[test]
    fn round_robin_draw_counts_for_both_sides() {
        let (store, tournament_id, participants) = seeded_store(Format::RoundRobin, 2);
        let matches = store.initialize_bracket(tournament_id, false).unwrap();

        let drawn = store.record_result(matches[0].id, 9, 9).unwrap();
        assert_eq!(drawn.settled.winner, None);
        assert_eq!(drawn.advanced_to, None);

        for participant in &participants {
            let row = standing_of(&store, tournament_id, participant.id);
            assert_eq!((row.matches_played, row.wins, row.losses, row.draws), (1, 0, 0, 1));
        }
    }

    #[test]
    fn round_robin_re_record_reverses_the_previous_result() {
        let (store, tournament_id, participants) = seeded_store(Format::RoundRobin, 2);
        let matches = store.initialize_bracket(tournament_id, false).unwrap();
        let (first, second) = (participants[0].id, participants[1].id);

        store.record_result(matches[0].id, 21, 15).unwrap();
        let corrected = store.record_result(matches[0].id, 15, 21).unwrap();
        assert_eq!(corrected.settled.winner, Some(second));

        let first_row = standing_of(&store, tournament_id, first);
        assert_eq!(
            (first_row.matches_played, first_row.wins, first_row.losses),
            (1, 0, 1)
        );
        assert_eq!((first_row.points_for, first_row.points_against), (15, 21));
        let second_row = standing_of(&store, tournament_id, second);
        assert_eq!(
            (second_row.matches_played, second_row.wins, second_row.losses),
            (1, 1, 0)
        );
    }

    #[test]
    fn an_advanced_winner_locks_the_result() {
        let (store, tournament_id, _) = seeded_store(Format::Knockout, 4);
        let matches = store.initialize_bracket(tournament_id, false).unwrap();

        store.record_result(matches[0].id, 21, 15).unwrap();

        assert_eq!(
            store.record_result(matches[0].id, 15, 21),
            Err(BracketError::ResultLocked(matches[0].id))
        );
    }

    #[test]
    fn the_final_can_be_re_recorded() {
        let (store, tournament_id, participants) = seeded_store(Format::Knockout, 2);
        let matches = store.initialize_bracket(tournament_id, false).unwrap();

        store.record_result(matches[0].id, 21, 15).unwrap();
        let corrected = store.record_result(matches[0].id, 19, 21).unwrap();

        assert_eq!(corrected.settled.winner, Some(participants[1].id));
        let row = standing_of(&store, tournament_id, participants[0].id);
        assert_eq!((row.matches_played, row.wins, row.losses), (1, 0, 1));
    }

    #[test]
    fn recording_needs_both_opponents_decided() {
        let (store, tournament_id, _) = seeded_store(Format::Knockout, 4);
        store.initialize_bracket(tournament_id, false).unwrap();

        let final_match = match_at(&store, tournament_id, (1, 0));
        assert_eq!(
            store.record_result(final_match.id, 21, 15),
            Err(BracketError::OpponentsUndetermined(final_match.id))
        );
    }

    #[test]
    fn completed_tournaments_reject_results() {
        let (store, tournament_id, _) = seeded_store(Format::Knockout, 4);
        let matches = store.initialize_bracket(tournament_id, false).unwrap();
        store
            .set_status(tournament_id, TournamentStatus::Completed)
            .unwrap();

        assert_eq!(
            store.record_result(matches[0].id, 21, 15),
            Err(BracketError::TournamentCompleted(tournament_id))
        );
    }

    #[test]
    fn status_moves_forward_only() {
        let (store, tournament_id, _) = seeded_store(Format::Knockout, 2);

        let opened = store
            .set_status(tournament_id, TournamentStatus::InProgress)
            .unwrap();
        assert_eq!(opened.previous, TournamentStatus::Upcoming);
        assert_eq!(opened.tournament.status, TournamentStatus::InProgress);

        let unchanged = store
            .set_status(tournament_id, TournamentStatus::InProgress)
            .unwrap();
        assert_eq!(unchanged.previous, TournamentStatus::InProgress);

        assert_eq!(
            store.set_status(tournament_id, TournamentStatus::Upcoming),
            Err(BracketError::InvalidTransition {
                from: TournamentStatus::InProgress,
                to: TournamentStatus::Upcoming,
            })
        );
    }

    #[test]
    fn schedule_metadata_can_be_set_and_cleared() {
        let (store, tournament_id, _) = seeded_store(Format::Knockout, 2);
        let matches = store.initialize_bracket(tournament_id, false).unwrap();
        let when = SystemTime::now();

        let scheduled = store
            .schedule_match(matches[0].id, Some(when), Some("court 2".into()))
            .unwrap();
        assert_eq!(scheduled.scheduled_at, Some(when));
        assert_eq!(scheduled.court.as_deref(), Some("court 2"));

        let cleared = store.schedule_match(matches[0].id, None, None).unwrap();
        assert_eq!(cleared.scheduled_at, None);
        assert_eq!(cleared.court, None);

        let unknown = Uuid::new_v4();
        assert_eq!(
            store.schedule_match(unknown, None, None),
            Err(BracketError::MatchNotFound(unknown))
        );
    }
}
