use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("Round {round} still in progress - missing scores for {side_a} vs {side_b}")]
    IncompleteRound {
        round: u32,
        side_a: String,
        side_b: String,
    },

    #[error("Round {round} references '{entity}', who is not on the roster")]
    UnknownEntity { round: u32, entity: String },
}
