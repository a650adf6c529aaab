mod extra_columns;
mod match_result;
mod tier;
mod touchdowns;

pub use extra_columns::{coerce_stat_value, ExtraColumnCollector};
pub use match_result::{MatchResultCollector, Outcome, DRAW_POINTS, LOSS_POINTS, WIN_POINTS};
pub use tier::TierCollector;
pub use touchdowns::TouchdownCollector;

use crate::round::{MatchRecord, Side};

use super::StatsError;

/// The entity's own score and its opponent's, or an incomplete-round error.
pub(crate) fn side_scores(
    game: &MatchRecord,
    side: Side,
    round: u32,
) -> Result<(i64, i64), StatsError> {
    match (game.score(side), game.score(side.opponent())) {
        (Some(own), Some(other)) => Ok((own, other)),
        _ => Err(StatsError::IncompleteRound {
            round,
            side_a: game.side_a.clone(),
            side_b: game.side_b.clone(),
        }),
    }
}
