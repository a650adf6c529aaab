use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RosterError {
    #[error("Roster is empty")]
    Empty,

    #[error("Player '{0}' appears more than once")]
    DuplicatePlayer(String),

    #[error("'{0}' is reserved and cannot be used as a player name")]
    ReservedName(String),

    #[error("Player '{player}' has no team assigned")]
    MissingTeam { player: String },

    #[error("Inconsistent team sizes detected -> {sizes}")]
    InconsistentTeamSizes { sizes: String },

    #[error("Expected teams of {expected} players, roster has {actual}")]
    TeamSizeMismatch { expected: usize, actual: usize },

    #[error("Player '{player}' has no tier value for {attribute} '{value}'")]
    MissingTier {
        player: String,
        attribute: String,
        value: String,
    },
}
