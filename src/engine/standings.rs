use crate::engine::model::Standing;

/// Points awarded for a win.
pub const POINTS_PER_WIN: u32 = 3;
/// Points awarded to each side of a draw.
pub const POINTS_PER_DRAW: u32 = 1;

impl Standing {
    /// Competition points, derived: 3 per win plus 1 per draw.
    pub fn points(&self) -> u32 {
        POINTS_PER_WIN * self.wins + POINTS_PER_DRAW * self.draws
    }
}

/// A standing row paired with its 1-based rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedStanding {
    /// Position in the ranking, starting at 1; ties are not shared.
    pub rank: u32,
    /// The aggregate row.
    pub standing: Standing,
}

/// Order a tournament's standing rows into the final ranking.
///
/// Sort key, descending: points, wins, draws; remaining ties break by
/// ascending participant id so the order is total and reproducible. Ranks
/// are the 1-based sorted indexes, never compressed.
pub fn rank(mut rows: Vec<Standing>) -> Vec<RankedStanding> {
    rows.sort_by(|a, b| {
        b.points()
            .cmp(&a.points())
            .then_with(|| b.wins.cmp(&a.wins))
            .then_with(|| b.draws.cmp(&a.draws))
            .then_with(|| a.participant_id.cmp(&b.participant_id))
    });
    rows.into_iter()
        .enumerate()
        .map(|(index, standing)| RankedStanding {
            rank: index as u32 + 1,
            standing,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn row(wins: u32, losses: u32, draws: u32) -> Standing {
        let mut standing = Standing::new(Uuid::new_v4(), Uuid::new_v4());
        standing.matches_played = wins + losses + draws;
        standing.wins = wins;
        standing.losses = losses;
        standing.draws = draws;
        standing
    }

    #[test]
    fn points_are_three_per_win_plus_one_per_draw() {
        assert_eq!(row(0, 0, 0).points(), 0);
        assert_eq!(row(2, 1, 0).points(), 6);
        assert_eq!(row(1, 0, 2).points(), 5);
    }

    #[test]
    fn higher_points_rank_first() {
        let leader = row(3, 0, 0);
        let trailer = row(1, 2, 0);
        let ranked = rank(vec![trailer.clone(), leader.clone()]);

        assert_eq!(ranked[0].standing, leader);
        assert_eq!(ranked[1].standing, trailer);
        assert_eq!((ranked[0].rank, ranked[1].rank), (1, 2));
    }

    #[test]
    fn equal_points_fall_back_to_wins() {
        // 3 points each: one outright win beats three draws.
        let winner = row(1, 2, 0);
        let drawer = row(0, 0, 3);
        let ranked = rank(vec![drawer.clone(), winner.clone()]);

        assert_eq!(ranked[0].standing, winner);
        assert_eq!(ranked[1].standing, drawer);
    }

    #[test]
    fn full_ties_order_by_participant_id() {
        let mut tied: Vec<Standing> = (0..3).map(|_| row(1, 1, 0)).collect();
        tied.sort_by_key(|s| std::cmp::Reverse(s.participant_id));

        let ranked = rank(tied.clone());

        let mut expected: Vec<Uuid> = tied.iter().map(|s| s.participant_id).collect();
        expected.sort();
        let actual: Vec<Uuid> = ranked.iter().map(|r| r.standing.participant_id).collect();
        assert_eq!(actual, expected);
        let ranks: Vec<u32> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }
}
