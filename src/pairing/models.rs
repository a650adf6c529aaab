use serde::{Deserialize, Serialize};

use crate::roster::Roster;
use crate::round::MatchRecord;
use crate::shared::BYE;

/// One entry of a generated round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pairing {
    Match { side_a: String, side_b: String },
    Bye { entity: String },
}

impl Pairing {
    pub fn new_match(side_a: impl Into<String>, side_b: impl Into<String>) -> Self {
        Pairing::Match {
            side_a: side_a.into(),
            side_b: side_b.into(),
        }
    }

    pub fn bye(entity: impl Into<String>) -> Self {
        Pairing::Bye {
            entity: entity.into(),
        }
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Pairing::Bye { .. })
    }

    /// The real entities placed by this entry.
    pub fn entities(&self) -> Vec<&str> {
        match self {
            Pairing::Match { side_a, side_b } => vec![side_a.as_str(), side_b.as_str()],
            Pairing::Bye { entity } => vec![entity.as_str()],
        }
    }

    /// `(side_a, side_b)` with the BYE sentinel written out.
    pub fn sides(&self) -> (&str, &str) {
        match self {
            Pairing::Match { side_a, side_b } => (side_a, side_b),
            Pairing::Bye { entity } => (entity, BYE),
        }
    }
}

impl From<&Pairing> for MatchRecord {
    fn from(pairing: &Pairing) -> Self {
        let (side_a, side_b) = pairing.sides();
        MatchRecord::pending(side_a, side_b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingMode {
    Individual,
    /// Teams are paired; a leftover team is an error, never a BYE.
    Team,
}

impl PairingMode {
    pub fn for_roster(roster: &Roster) -> Self {
        if roster.is_team_mode() {
            PairingMode::Team
        } else {
            PairingMode::Individual
        }
    }

    pub fn allows_bye(self) -> bool {
        self == PairingMode::Individual
    }
}
