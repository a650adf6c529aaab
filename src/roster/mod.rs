mod errors;
pub mod models;

pub use errors::RosterError;
pub use models::{Player, Roster, Team};
