use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::config::TierTable;
use crate::shared::BYE;

use super::RosterError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub team: Option<String>,
    pub attributes: BTreeMap<String, String>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            team: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub members: Vec<String>,
}

/// The validated set of competitors for one invocation.
///
/// Player and team order follow the order of first appearance in the input.
#[derive(Debug, Clone)]
pub struct Roster {
    players: Vec<Player>,
    index: HashMap<String, usize>,
    teams: Vec<Team>,
    team_size: usize,
}

impl Roster {
    pub fn new(players: Vec<Player>) -> Result<Self, RosterError> {
        if players.is_empty() {
            return Err(RosterError::Empty);
        }

        let mut index = HashMap::with_capacity(players.len());
        for (position, player) in players.iter().enumerate() {
            if player.name == BYE {
                return Err(RosterError::ReservedName(player.name.clone()));
            }
            if index.insert(player.name.clone(), position).is_some() {
                return Err(RosterError::DuplicatePlayer(player.name.clone()));
            }
        }

        let teams = Self::group_teams(&players)?;
        let team_size = Self::common_team_size(&teams)?;

        Ok(Self {
            players,
            index,
            teams,
            team_size,
        })
    }

    fn group_teams(players: &[Player]) -> Result<Vec<Team>, RosterError> {
        let has_teams = players.iter().any(|player| player.team.is_some());
        if !has_teams {
            return Ok(Vec::new());
        }

        let mut teams: Vec<Team> = Vec::new();
        for player in players {
            let team_name = match player.team.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => name,
                _ => {
                    return Err(RosterError::MissingTeam {
                        player: player.name.clone(),
                    })
                }
            };

            match teams.iter_mut().find(|team| team.name == team_name) {
                Some(team) => team.members.push(player.name.clone()),
                None => teams.push(Team {
                    name: team_name.to_string(),
                    members: vec![player.name.clone()],
                }),
            }
        }
        Ok(teams)
    }

    fn common_team_size(teams: &[Team]) -> Result<usize, RosterError> {
        let Some(first) = teams.first() else {
            return Ok(1);
        };

        let size = first.members.len();
        if teams.iter().any(|team| team.members.len() != size) {
            let sizes = teams
                .iter()
                .map(|team| format!("{}: {}", team.name, team.members.len()))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(RosterError::InconsistentTeamSizes { sizes });
        }
        Ok(size)
    }

    /// Rejects the roster when the configuration pins a different team size.
    pub fn expect_team_size(self, expected: Option<usize>) -> Result<Self, RosterError> {
        match expected {
            Some(expected) if expected != self.team_size => Err(RosterError::TeamSizeMismatch {
                expected,
                actual: self.team_size,
            }),
            _ => Ok(self),
        }
    }

    /// Every player must carry an attribute value present in the tier table.
    pub fn validate_tiers(&self, tiers: &TierTable) -> Result<(), RosterError> {
        for player in &self.players {
            if tiers.weight_for(player).is_none() {
                return Err(RosterError::MissingTier {
                    player: player.name.clone(),
                    attribute: tiers.attribute.clone(),
                    value: player
                        .attribute(&tiers.attribute)
                        .unwrap_or_default()
                        .to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn team_size(&self) -> usize {
        self.team_size
    }

    pub fn is_team_mode(&self) -> bool {
        self.team_size > 1
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.index.get(name).map(|&position| &self.players[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn player_names(&self) -> Vec<String> {
        self.players.iter().map(|player| player.name.clone()).collect()
    }

    pub fn team_of(&self, player: &str) -> Option<&str> {
        self.player(player).and_then(|player| player.team.as_deref())
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|team| team.name == name)
    }

    pub fn team_names(&self) -> Vec<String> {
        self.teams.iter().map(|team| team.name.clone()).collect()
    }
}
