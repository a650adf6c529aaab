use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PairingError {
    #[error("No rematch-free pairing exists for round {round} (best attempt left {remaining} entities unpaired)")]
    Exhausted { round: u32, remaining: usize },

    #[error("Cannot pair an odd number of teams ({teams}) without a BYE")]
    OddTeamCount { teams: usize },

    #[error("Pairing search gave up after {steps} steps")]
    SearchBudgetExceeded { steps: u64 },
}
