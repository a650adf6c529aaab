use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::roster::Roster;
use crate::round::RoundRecord;

fn normalized(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Unordered pairs of entities already scheduled against each other.
/// BYE rows are never recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairingHistory {
    pairs: HashSet<(String, String)>,
}

impl PairingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Player-level history from every scheduled match.
    pub fn from_rounds(rounds: &[RoundRecord]) -> Self {
        let mut history = Self::new();
        for game in rounds.iter().flat_map(|round| &round.matches) {
            if !game.is_bye() {
                history.record(&game.side_a, &game.side_b);
            }
        }
        history
    }

    /// Team-level history: each player pair is mapped to the teams its
    /// players belong to. Team columns in the rounds are honored as well.
    pub fn for_teams(rounds: &[RoundRecord], roster: &Roster) -> Self {
        let mut history = Self::new();
        for game in rounds.iter().flat_map(|round| &round.matches) {
            if game.is_bye() {
                continue;
            }
            if let Some((team_a, team_b)) = &game.teams {
                history.record(team_a, team_b);
            }
            if let (Some(team_a), Some(team_b)) =
                (roster.team_of(&game.side_a), roster.team_of(&game.side_b))
            {
                history.record(team_a, team_b);
            }
        }
        history
    }

    /// Adds a pair. Same-entity pairs are ignored.
    pub fn record(&mut self, a: &str, b: &str) {
        if a != b {
            self.pairs.insert(normalized(a, b));
        }
    }

    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.pairs.contains(&normalized(a, b))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Two entities that met in more than one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rematch {
    pub side_a: String,
    pub side_b: String,
    pub rounds: Vec<u32>,
}

impl Rematch {
    /// Player pairs scheduled in more than one round.
    pub fn find_individual(rounds: &[RoundRecord]) -> Vec<Rematch> {
        let mut meetings: BTreeMap<(String, String), BTreeSet<u32>> = BTreeMap::new();
        for round in rounds {
            for game in round.matches.iter().filter(|game| !game.is_bye()) {
                meetings
                    .entry(normalized(&game.side_a, &game.side_b))
                    .or_default()
                    .insert(round.number);
            }
        }
        Self::repeated(meetings)
    }

    /// Team pairs that met in more than one round. Several boards between
    /// the same teams in one round count once.
    pub fn find_team(rounds: &[RoundRecord], roster: &Roster) -> Vec<Rematch> {
        let mut meetings: BTreeMap<(String, String), BTreeSet<u32>> = BTreeMap::new();
        for round in rounds {
            for game in round.matches.iter().filter(|game| !game.is_bye()) {
                let teams = match &game.teams {
                    Some((team_a, team_b)) => Some((team_a.as_str(), team_b.as_str())),
                    None => roster.team_of(&game.side_a).zip(roster.team_of(&game.side_b)),
                };
                if let Some((team_a, team_b)) = teams.filter(|(a, b)| a != b) {
                    meetings
                        .entry(normalized(team_a, team_b))
                        .or_default()
                        .insert(round.number);
                }
            }
        }
        Self::repeated(meetings)
    }

    fn repeated(meetings: BTreeMap<(String, String), BTreeSet<u32>>) -> Vec<Rematch> {
        meetings
            .into_iter()
            .filter(|(_, rounds)| rounds.len() > 1)
            .map(|((side_a, side_b), rounds)| Rematch {
                side_a,
                side_b,
                rounds: rounds.into_iter().collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Player;
    use crate::round::MatchRecord;

    fn team_roster() -> Roster {
        Roster::new(vec![
            Player::new("a1").with_team("Reds"),
            Player::new("a2").with_team("Reds"),
            Player::new("b1").with_team("Blues"),
            Player::new("b2").with_team("Blues"),
        ])
        .unwrap()
    }

    #[test]
    fn history_is_unordered_and_skips_byes() {
        let rounds = vec![RoundRecord::new(
            1,
            vec![MatchRecord::pending("alice", "bob"), MatchRecord::bye("carol")],
        )];

        let history = PairingHistory::from_rounds(&rounds);

        assert!(history.contains("bob", "alice"));
        assert!(!history.contains("carol", crate::shared::BYE));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn team_history_maps_players_to_teams() {
        let rounds = vec![RoundRecord::new(
            1,
            vec![
                MatchRecord::pending("a1", "b2"),
                MatchRecord::pending("a2", "b1"),
            ],
        )];

        let history = PairingHistory::for_teams(&rounds, &team_roster());

        assert!(history.contains("Blues", "Reds"));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn finds_individual_rematches() {
        let rounds = vec![
            RoundRecord::new(1, vec![MatchRecord::pending("alice", "bob")]),
            RoundRecord::new(2, vec![MatchRecord::pending("carol", "alice")]),
            RoundRecord::new(3, vec![MatchRecord::pending("bob", "alice")]),
        ];

        let rematches = Rematch::find_individual(&rounds);

        assert_eq!(
            rematches,
            vec![Rematch {
                side_a: "alice".into(),
                side_b: "bob".into(),
                rounds: vec![1, 3],
            }]
        );
    }

    #[test]
    fn team_boards_in_one_round_are_one_meeting() {
        let roster = team_roster();
        let first = RoundRecord::new(
            1,
            vec![
                MatchRecord::pending("a1", "b1").with_teams("Reds", "Blues"),
                MatchRecord::pending("a2", "b2").with_teams("Reds", "Blues"),
            ],
        );
        assert!(Rematch::find_team(std::slice::from_ref(&first), &roster).is_empty());

        let second = RoundRecord::new(2, vec![MatchRecord::pending("b1", "a2")]);
        let rematches = Rematch::find_team(&[first, second], &roster);
        assert_eq!(rematches.len(), 1);
        assert_eq!(rematches[0].rounds, vec![1, 2]);
    }
}
