use super::super::{collector_priority, CollectionContext, StatCollector, StatRecord, StatsError};
use crate::config::{TierTable, TIER_STATISTIC};
use crate::round::{MatchRecord, Side};

/// Stores the entity's tier weight, looked up from its roster attribute.
/// The value is set, not accumulated.
pub struct TierCollector {
    tiers: TierTable,
}

impl TierCollector {
    pub fn new(tiers: TierTable) -> Self {
        Self { tiers }
    }
}

impl StatCollector for TierCollector {
    fn collect(
        &self,
        game: &MatchRecord,
        side: Side,
        context: &CollectionContext,
        record: &mut StatRecord,
    ) -> Result<(), StatsError> {
        let weight = context
            .roster
            .player(game.entity(side))
            .and_then(|player| self.tiers.weight_for(player));
        if let Some(weight) = weight {
            record.set_extra(TIER_STATISTIC, weight);
        }
        Ok(())
    }

    fn priority(&self) -> u32 {
        collector_priority::ROSTER_LOOKUP
    }
}
