pub mod actions;
pub mod builders;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use actions::{assert_no_rematches, assert_round_well_formed, play_round};
pub use builders::{RosterBuilder, TournamentSetup};
