pub mod repository;
pub mod service;

pub use repository::{InMemoryTournamentRepository, TournamentRepository};
pub use service::{RoundSummary, SimulatedRound, Standings, TournamentService, TournamentServiceBuilder};
