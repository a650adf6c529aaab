use tracing::warn;

use super::super::{collector_priority, CollectionContext, StatCollector, StatRecord, StatsError};
use crate::round::{MatchRecord, Side};

/// Reads a reported cell: blank counts as zero, then integer, then decimal.
/// Anything else is not a number.
pub fn coerce_stat_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed
        .parse::<i64>()
        .map(|value| value as f64)
        .or_else(|_| trimmed.parse::<f64>())
        .ok()
}

/// Adds configured side-suffixed columns (`casualtiesA`/`casualtiesB`) to
/// the matching statistic. Rows without the column are skipped.
pub struct ExtraColumnCollector {
    stats: Vec<String>,
}

impl ExtraColumnCollector {
    pub fn new(stats: Vec<String>) -> Self {
        Self { stats }
    }
}

impl StatCollector for ExtraColumnCollector {
    fn collect(
        &self,
        game: &MatchRecord,
        side: Side,
        context: &CollectionContext,
        record: &mut StatRecord,
    ) -> Result<(), StatsError> {
        for stat in &self.stats {
            let Some(raw) = game.extra(stat, side) else {
                continue;
            };
            match coerce_stat_value(raw) {
                Some(value) => record.add_extra(stat, value),
                None => warn!(
                    round = context.round,
                    entity = game.entity(side),
                    stat = %stat,
                    value = raw,
                    "Non-numeric statistic value, leaving it out"
                ),
            }
        }
        Ok(())
    }

    fn priority(&self) -> u32 {
        collector_priority::EXTRA_COLUMNS
    }
}
