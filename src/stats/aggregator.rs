use std::collections::BTreeMap;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

use crate::config::{TieBreakKeys, TierTable, TrackerConfig, TIER_STATISTIC};
use crate::roster::Roster;
use crate::round::{RoundRecord, Side};

use super::{
    collectors::{ExtraColumnCollector, MatchResultCollector, TierCollector, TouchdownCollector},
    ranking::assign_ranks,
    CollectionContext, StatCollector, StatTable, StatsError, BASE_STATISTICS,
};

/// Folds completed rounds into per-entity statistics and ranks the result.
pub struct StatsAggregator {
    statistics: Vec<String>,
    column_statistics: Vec<String>,
    tie_breaks: TieBreakKeys,
    collectors: Vec<Arc<dyn StatCollector>>,
}

impl StatsAggregator {
    pub fn builder() -> StatsAggregatorBuilder {
        StatsAggregatorBuilder::new()
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        if config.tier_tie_break_without_table() {
            warn!("Tier tie-break configured without a tiers table, tier is read from round columns");
        }
        Self::builder()
            .with_statistics(config.statistic_names())
            .with_tie_breaks(config.individual_tie_breaks())
            .with_tiers(config.tiers.clone())
            .build()
    }

    pub fn statistics(&self) -> &[String] {
        &self.statistics
    }

    /// Statistics read from side-suffixed round columns.
    pub fn column_statistics(&self) -> &[String] {
        &self.column_statistics
    }

    pub fn tie_breaks(&self) -> &TieBreakKeys {
        &self.tie_breaks
    }

    /// Previous standings plus one completed round.
    ///
    /// Every non-BYE match must carry both scores; otherwise nothing is
    /// folded and `IncompleteRound` is returned. BYE rows leave the entity's
    /// record untouched.
    #[instrument(skip(self, roster, completed_round, previous), fields(round = completed_round.number))]
    pub fn compute(
        &self,
        roster: &Roster,
        completed_round: &RoundRecord,
        previous: &StatTable,
    ) -> Result<StatTable, StatsError> {
        self.warn_untracked_columns(std::slice::from_ref(completed_round));
        self.fold(roster, completed_round, previous)
    }

    /// Standings rebuilt from scratch by folding every round in order.
    /// Missing columns are reported once per statistic for the whole history.
    pub fn recompute(&self, roster: &Roster, rounds: &[RoundRecord]) -> Result<StatTable, StatsError> {
        self.warn_untracked_columns(rounds);
        rounds
            .iter()
            .try_fold(StatTable::new(), |previous, round| {
                self.fold(roster, round, &previous)
            })
    }

    /// Column statistics absent from some of `rounds`, with the round
    /// numbers that lack them.
    pub fn untracked_columns(&self, rounds: &[RoundRecord]) -> BTreeMap<String, Vec<u32>> {
        let mut missing: BTreeMap<String, Vec<u32>> = BTreeMap::new();
        for round in rounds {
            for stat in self.column_statistics.iter().filter(|stat| !round.tracks(stat)) {
                missing.entry(stat.clone()).or_default().push(round.number);
            }
        }
        missing
    }

    #[instrument(skip_all, fields(round = completed_round.number))]
    fn fold(
        &self,
        roster: &Roster,
        completed_round: &RoundRecord,
        previous: &StatTable,
    ) -> Result<StatTable, StatsError> {
        self.validate_round(roster, completed_round)?;

        let context = CollectionContext::new(completed_round.number, roster);
        let mut table = previous.clone();

        for game in completed_round.matches.iter().filter(|game| !game.is_bye()) {
            for side in Side::iter() {
                let entity = game.entity(side);
                debug!(entity, "Updating W/D/L and touchdowns");
                let record = table.entry(entity, &self.statistics);
                for collector in &self.collectors {
                    collector.collect(game, side, &context, record)?;
                }
            }
        }

        assign_ranks(&mut table, &self.tie_breaks);
        info!(entities = table.len(), "Standings computed");
        Ok(table)
    }

    fn validate_round(&self, roster: &Roster, round: &RoundRecord) -> Result<(), StatsError> {
        if let Some(game) = round.first_incomplete() {
            return Err(StatsError::IncompleteRound {
                round: round.number,
                side_a: game.side_a.clone(),
                side_b: game.side_b.clone(),
            });
        }

        for game in round.matches.iter().filter(|game| !game.is_bye()) {
            for side in Side::iter() {
                let entity = game.entity(side);
                if !roster.contains(entity) {
                    return Err(StatsError::UnknownEntity {
                        round: round.number,
                        entity: entity.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn warn_untracked_columns(&self, rounds: &[RoundRecord]) {
        for (stat, missing) in self.untracked_columns(rounds) {
            warn!(stat = %stat, rounds = ?missing, "Statistic not found in round columns, not tracked");
        }
    }
}

pub struct StatsAggregatorBuilder {
    statistics: Vec<String>,
    tie_breaks: TieBreakKeys,
    tiers: Option<TierTable>,
    collectors: Vec<Arc<dyn StatCollector>>,
}

impl Default for StatsAggregatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsAggregatorBuilder {
    fn new() -> Self {
        Self {
            statistics: BASE_STATISTICS.iter().map(|stat| stat.to_string()).collect(),
            tie_breaks: TieBreakKeys::default(),
            tiers: None,
            collectors: vec![
                Arc::new(MatchResultCollector::new()),
                Arc::new(TouchdownCollector::new()),
            ],
        }
    }

    /// Full ordered statistic list, base set included.
    pub fn with_statistics(mut self, statistics: Vec<String>) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn with_tie_breaks(mut self, tie_breaks: TieBreakKeys) -> Self {
        self.tie_breaks = tie_breaks;
        self
    }

    pub fn with_tiers(mut self, tiers: Option<TierTable>) -> Self {
        self.tiers = tiers;
        self
    }

    pub fn with_collector(mut self, collector: Arc<dyn StatCollector>) -> Self {
        self.collectors.push(collector);
        self
    }

    pub fn build(mut self) -> StatsAggregator {
        let tiers_from_roster = self.tiers.is_some();
        let column_statistics: Vec<String> = self
            .statistics
            .iter()
            .filter(|stat| !BASE_STATISTICS.contains(&stat.as_str()))
            .filter(|stat| !(tiers_from_roster && stat.as_str() == TIER_STATISTIC))
            .cloned()
            .collect();

        if !column_statistics.is_empty() {
            self.collectors
                .push(Arc::new(ExtraColumnCollector::new(column_statistics.clone())));
        }
        if let Some(tiers) = self.tiers {
            self.collectors.push(Arc::new(TierCollector::new(tiers)));
        }
        self.collectors.sort_by_key(|c| c.priority());

        StatsAggregator {
            statistics: self.statistics,
            column_statistics,
            tie_breaks: self.tie_breaks,
            collectors: self.collectors,
        }
    }
}
