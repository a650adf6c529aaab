pub mod engine;
mod errors;
pub mod history;
pub mod models;
pub mod projector;

pub use engine::PairingEngine;
pub use errors::PairingError;
pub use history::{PairingHistory, Rematch};
pub use models::{Pairing, PairingMode};
pub use projector::{PairingProjector, ProjectedPairing};
