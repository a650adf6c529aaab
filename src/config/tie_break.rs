use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, warn};

use crate::stats::StatRecord;

/// Tie-break names accepted in the configuration, each resolving to one
/// statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TieBreak {
    Points,
    Wins,
    Draws,
    #[strum(to_string = "touchdowns", serialize = "touchdown_scored")]
    Touchdowns,
    TouchdownDiff,
    Casualties,
    Tier,
}

impl TieBreak {
    pub fn stat_name(self) -> &'static str {
        match self {
            TieBreak::Points => "points",
            TieBreak::Wins => "wins",
            TieBreak::Draws => "draws",
            TieBreak::Touchdowns => "touchdown_scored",
            TieBreak::TouchdownDiff => "touchdown_diff",
            TieBreak::Casualties => "casualties",
            TieBreak::Tier => "tier",
        }
    }
}

/// Ordered statistics a ranking sorts on, most significant first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TieBreakKeys(Vec<String>);

impl Default for TieBreakKeys {
    fn default() -> Self {
        Self(
            Self::DEFAULT_STATS
                .iter()
                .map(|stat| stat.to_string())
                .collect(),
        )
    }
}

impl TieBreakKeys {
    pub const DEFAULT_STATS: [&'static str; 2] = ["points", "touchdown_scored"];

    /// Resolves configured tie-break names through the fixed table. Unknown
    /// names are skipped with a warning; if nothing resolves the default
    /// `(points, touchdown_scored)` tuple is used.
    pub fn resolve(names: &[String]) -> Self {
        let mut stats = Vec::with_capacity(names.len());
        for name in names {
            match TieBreak::from_str(name.trim()) {
                Ok(tie_break) => {
                    debug!(tie_break = %tie_break, stat = tie_break.stat_name(), "Sorting by tie-break");
                    stats.push(tie_break.stat_name().to_string());
                }
                Err(_) => warn!(tie_break = %name, "Unknown tie-break, skipping"),
            }
        }

        if stats.is_empty() {
            Self::default()
        } else {
            Self(stats)
        }
    }

    pub fn stats(&self) -> &[String] {
        &self.0
    }

    /// The sort tuple for one record.
    pub fn key_for(&self, record: &StatRecord) -> Vec<f64> {
        self.0.iter().map(|stat| record.get(stat)).collect()
    }
}
