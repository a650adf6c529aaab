use tracing::{info, instrument};

use crate::config::{TieBreakKeys, TrackerConfig};
use crate::roster::Roster;

use super::{ranking::assign_ranks, StatRecord, StatTable};

/// Rolls player standings up to team level.
pub struct TeamAggregator {
    statistics: Vec<String>,
    tie_breaks: TieBreakKeys,
}

impl TeamAggregator {
    pub fn new(statistics: Vec<String>, tie_breaks: TieBreakKeys) -> Self {
        Self {
            statistics,
            tie_breaks,
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.statistic_names(), config.team_tie_breaks())
    }

    /// Every roster team gets a zeroed record that absorbs its members'
    /// records; players without a record yet contribute nothing.
    #[instrument(skip_all)]
    pub fn compute(&self, roster: &Roster, player_stats: &StatTable) -> StatTable {
        let mut table = StatTable::new();

        for team in roster.teams() {
            let mut record = StatRecord::with_statistics(&self.statistics);
            for member in &team.members {
                if let Some(member_record) = player_stats.get(member) {
                    record.absorb(member_record);
                }
            }
            table.insert(team.name.clone(), record);
        }

        assign_ranks(&mut table, &self.tie_breaks);
        info!(teams = table.len(), "Team standings computed");
        table
    }
}
