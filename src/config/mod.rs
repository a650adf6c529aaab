//! Tournament configuration, loaded once from YAML and passed to each
//! component explicitly.

pub mod tie_break;

pub use tie_break::{TieBreak, TieBreakKeys};

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::roster::Player;
use crate::stats::BASE_STATISTICS;

pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";
pub const DEFAULT_MAX_SEARCH_STEPS: u64 = 1_000_000;
pub const TIER_STATISTIC: &str = "tier";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Numeric weight looked up from one roster attribute (e.g. race).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TierTable {
    pub attribute: String,
    pub values: HashMap<String, f64>,
}

impl TierTable {
    pub fn weight_for(&self, player: &Player) -> Option<f64> {
        player
            .attribute(&self.attribute)
            .and_then(|value| self.values.get(value.trim()))
            .copied()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub players_file: PathBuf,
    pub rounds_dir: PathBuf,
    pub stats_dir: PathBuf,
    pub random_seed: Option<u64>,
    pub team_size: Option<usize>,
    pub statistics: Vec<String>,
    pub additional_statistics: Vec<String>,
    pub indiv_tie_breakers: Vec<String>,
    pub team_tie_breakers: Vec<String>,
    pub tiers: Option<TierTable>,
    pub max_search_steps: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            players_file: PathBuf::from("config/players.csv"),
            rounds_dir: PathBuf::from("rounds"),
            stats_dir: PathBuf::from("stats"),
            random_seed: None,
            team_size: None,
            statistics: Vec::new(),
            additional_statistics: Vec::new(),
            indiv_tie_breakers: Vec::new(),
            team_tie_breakers: Vec::new(),
            tiers: None,
            max_search_steps: DEFAULT_MAX_SEARCH_STEPS,
        }
    }
}

impl TrackerConfig {
    /// Loads the config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_yaml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Every statistic a record carries: base set, configured statistics,
    /// then whatever the tie-breaks need. Duplicates are dropped.
    pub fn statistic_names(&self) -> Vec<String> {
        let tie_break_stats = self
            .individual_tie_breaks()
            .stats()
            .iter()
            .chain(self.team_tie_breaks().stats())
            .cloned()
            .collect::<Vec<_>>();

        let mut names: Vec<String> = Vec::new();
        let candidates = BASE_STATISTICS
            .iter()
            .map(|stat| stat.to_string())
            .chain(self.statistics.iter().cloned())
            .chain(self.additional_statistics.iter().cloned())
            .chain(tie_break_stats);

        for name in candidates {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// A `tier` tie-break with no tier table falls back to round columns.
    pub fn tier_tie_break_without_table(&self) -> bool {
        self.tiers.is_none()
            && self
                .individual_tie_breaks()
                .stats()
                .iter()
                .chain(self.team_tie_breaks().stats())
                .any(|stat| stat == TIER_STATISTIC)
    }

    pub fn individual_tie_breaks(&self) -> TieBreakKeys {
        TieBreakKeys::resolve(&self.indiv_tie_breakers)
    }

    pub fn team_tie_breaks(&self) -> TieBreakKeys {
        TieBreakKeys::resolve(&self.team_tie_breakers)
    }
}
