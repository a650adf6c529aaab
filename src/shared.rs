use thiserror::Error;

use crate::config::ConfigError;
use crate::pairing::PairingError;
use crate::records::RecordsError;
use crate::roster::RosterError;
use crate::stats::StatsError;

/// Placeholder opponent for an entity that sits out a round.
pub const BYE: &str = "BYE";

/// Rank used for entities that have no statistics yet, so they sort last.
pub const UNRANKED: u32 = 9999;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Validation error: {0}")]
    Validation(#[from] RosterError),

    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    #[error("Pairing error: {0}")]
    Pairing(#[from] PairingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Records error: {0}")]
    Records(#[from] RecordsError),
}

impl TrackerError {
    /// True when the round's standings are still valid despite the failure.
    pub fn standings_remain_valid(&self) -> bool {
        matches!(self, TrackerError::Pairing(_))
    }
}

/// Render a statistic without a trailing `.0` when it holds a whole number.
pub fn format_stat_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
