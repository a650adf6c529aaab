pub mod aggregator;
pub mod collectors;
pub mod ranking;
pub mod team;

mod errors;
pub mod models;

pub use aggregator::{StatsAggregator, StatsAggregatorBuilder};
pub use errors::StatsError;
pub use models::*;
pub use team::TeamAggregator;

use crate::roster::Roster;
use crate::round::{MatchRecord, Side};

/// Priority constants for stat collectors.
/// Lower values run first, so later collectors can read what earlier ones
/// wrote into the record.
pub mod collector_priority {
    /// Win/draw/loss counters and points
    pub const MATCH_RESULT: u32 = 100;
    /// Primary score columns
    pub const TOUCHDOWNS: u32 = 200;
    /// Configured side-suffixed columns
    pub const EXTRA_COLUMNS: u32 = 300;
    /// Values looked up from the roster
    pub const ROSTER_LOOKUP: u32 = 400;
}

/// Folds one side of one completed match into that entity's record.
pub trait StatCollector: Send + Sync {
    fn collect(
        &self,
        game: &MatchRecord,
        side: Side,
        context: &CollectionContext,
        record: &mut StatRecord,
    ) -> Result<(), StatsError>;

    fn priority(&self) -> u32;
}

pub struct CollectionContext<'a> {
    pub round: u32,
    pub roster: &'a Roster,
}

impl<'a> CollectionContext<'a> {
    pub fn new(round: u32, roster: &'a Roster) -> Self {
        Self { round, roster }
    }
}
