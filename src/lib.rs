// Library crate for the Touchdown Tracker Swiss tournament manager
// This file exposes the public API for the binary and integration tests

pub mod config;
pub mod output;
pub mod pairing;
pub mod records;
pub mod roster;
pub mod round;
pub mod shared;
pub mod stats;
pub mod tournament;

// Re-export commonly used types for easier access in tests
pub use config::{TieBreak, TieBreakKeys, TierTable, TrackerConfig};
pub use pairing::{
    Pairing, PairingEngine, PairingError, PairingHistory, PairingMode, PairingProjector, Rematch,
};
pub use records::CsvTournamentRepository;
pub use roster::{Player, Roster, RosterError, Team};
pub use round::{MatchRecord, RoundRecord, Side};
pub use shared::{TrackerError, BYE};
pub use stats::{StatRecord, StatTable, StatsAggregator, StatsError, TeamAggregator};
pub use tournament::{
    InMemoryTournamentRepository, RoundSummary, Standings, TournamentRepository,
    TournamentService,
};
