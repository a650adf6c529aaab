use super::super::{collector_priority, CollectionContext, StatCollector, StatRecord, StatsError};
use super::side_scores;
use crate::round::{MatchRecord, Side};

pub const WIN_POINTS: i64 = 4;
pub const DRAW_POINTS: i64 = 2;
pub const LOSS_POINTS: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    pub fn from_scores(own: i64, other: i64) -> Self {
        match own.cmp(&other) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Equal => Outcome::Draw,
            std::cmp::Ordering::Less => Outcome::Loss,
        }
    }

    pub fn points(self) -> i64 {
        match self {
            Outcome::Win => WIN_POINTS,
            Outcome::Draw => DRAW_POINTS,
            Outcome::Loss => LOSS_POINTS,
        }
    }
}

/// Awards points and bumps the win/draw/loss counter.
pub struct MatchResultCollector;

impl Default for MatchResultCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchResultCollector {
    pub fn new() -> Self {
        Self
    }
}

impl StatCollector for MatchResultCollector {
    fn collect(
        &self,
        game: &MatchRecord,
        side: Side,
        context: &CollectionContext,
        record: &mut StatRecord,
    ) -> Result<(), StatsError> {
        let (own, other) = side_scores(game, side, context.round)?;
        let outcome = Outcome::from_scores(own, other);

        record.points += outcome.points();
        match outcome {
            Outcome::Win => record.wins += 1,
            Outcome::Draw => record.draws += 1,
            Outcome::Loss => record.losses += 1,
        }
        Ok(())
    }

    fn priority(&self) -> u32 {
        collector_priority::MATCH_RESULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Player, Roster};
    use rstest::rstest;

    fn roster() -> Roster {
        Roster::new(vec![Player::new("alice"), Player::new("bob")]).unwrap()
    }

    #[rstest]
    #[case(Side::A, 3, 1, Outcome::Win)]
    #[case(Side::B, 3, 1, Outcome::Loss)]
    #[case(Side::A, 2, 2, Outcome::Draw)]
    #[case(Side::B, 0, 1, Outcome::Win)]
    fn scores_each_side(
        #[case] side: Side,
        #[case] score_a: i64,
        #[case] score_b: i64,
        #[case] expected: Outcome,
    ) {
        let roster = roster();
        let context = CollectionContext::new(1, &roster);
        let game = MatchRecord::pending("alice", "bob").with_scores(score_a, score_b);
        let mut record = StatRecord::default();

        MatchResultCollector::new()
            .collect(&game, side, &context, &mut record)
            .unwrap();

        assert_eq!(record.points, expected.points());
        assert_eq!(record.wins, u32::from(expected == Outcome::Win));
        assert_eq!(record.draws, u32::from(expected == Outcome::Draw));
        assert_eq!(record.losses, u32::from(expected == Outcome::Loss));
    }

    #[test]
    fn errors_when_score_missing() {
        let roster = roster();
        let context = CollectionContext::new(3, &roster);
        let game = MatchRecord::pending("alice", "bob");
        let mut record = StatRecord::default();

        let result = MatchResultCollector::new().collect(&game, Side::A, &context, &mut record);

        assert!(matches!(
            result,
            Err(StatsError::IncompleteRound { round: 3, .. })
        ));
        assert_eq!(record, StatRecord::default());
    }
}
