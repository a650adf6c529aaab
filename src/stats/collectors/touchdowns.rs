use super::super::{collector_priority, CollectionContext, StatCollector, StatRecord, StatsError};
use super::side_scores;
use crate::round::{MatchRecord, Side};

/// Accumulates touchdowns scored and conceded from the primary score columns.
pub struct TouchdownCollector;

impl Default for TouchdownCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchdownCollector {
    pub fn new() -> Self {
        Self
    }
}

impl StatCollector for TouchdownCollector {
    fn collect(
        &self,
        game: &MatchRecord,
        side: Side,
        context: &CollectionContext,
        record: &mut StatRecord,
    ) -> Result<(), StatsError> {
        let (scored, conceded) = side_scores(game, side, context.round)?;
        record.touchdown_scored += scored;
        record.touchdown_conceded += conceded;
        record.touchdown_diff = record.touchdown_scored - record.touchdown_conceded;
        Ok(())
    }

    fn priority(&self) -> u32 {
        collector_priority::TOUCHDOWNS
    }
}
