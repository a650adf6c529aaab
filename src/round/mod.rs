pub mod models;

pub use models::{MatchRecord, RoundRecord, Side};

/// Highest value handed out when blank cells are filled for a dry run.
pub const SIMULATED_SCORE_MAX: i64 = 4;
