use tracing::{debug, warn};

use crate::roster::Roster;
use crate::shared::BYE;
use crate::stats::StatTable;

use super::Pairing;

/// One board of a team round: the player pairing plus the teams it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedPairing {
    pub team_a: String,
    pub team_b: String,
    pub pairing: Pairing,
}

/// Expands team pairings into player boards matched by within-team rank.
pub struct PairingProjector;

impl PairingProjector {
    /// Both rosters are sorted by individual rank (unranked last) and zipped.
    /// When the rosters differ in size the surplus players sit out.
    pub fn project(
        team_pairs: &[Pairing],
        roster: &Roster,
        player_ranking: &StatTable,
    ) -> Vec<ProjectedPairing> {
        let mut boards = Vec::new();

        for team_pair in team_pairs {
            match team_pair {
                Pairing::Match { side_a, side_b } => {
                    let players_a = Self::members_by_rank(roster, side_a, player_ranking);
                    let players_b = Self::members_by_rank(roster, side_b, player_ranking);
                    if players_a.len() != players_b.len() {
                        warn!(
                            team_a = %side_a,
                            team_b = %side_b,
                            "Teams have unequal rosters, surplus players are not paired"
                        );
                    }
                    debug!(team_a = %side_a, team_b = %side_b, "Pairing boards");
                    boards.extend(players_a.into_iter().zip(players_b).map(|(a, b)| {
                        ProjectedPairing {
                            team_a: side_a.clone(),
                            team_b: side_b.clone(),
                            pairing: Pairing::new_match(a, b),
                        }
                    }));
                }
                Pairing::Bye { entity } => {
                    boards.extend(
                        Self::members_by_rank(roster, entity, player_ranking)
                            .into_iter()
                            .map(|player| ProjectedPairing {
                                team_a: entity.clone(),
                                team_b: BYE.to_string(),
                                pairing: Pairing::bye(player),
                            }),
                    );
                }
            }
        }
        boards
    }

    fn members_by_rank(roster: &Roster, team: &str, ranking: &StatTable) -> Vec<String> {
        let mut members = roster
            .team(team)
            .map(|team| team.members.clone())
            .unwrap_or_default();
        members.sort_by_key(|player| ranking.rank_of(player));
        members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Player;
    use crate::stats::StatRecord;

    fn roster() -> Roster {
        Roster::new(vec![
            Player::new("a1").with_team("Reds"),
            Player::new("a2").with_team("Reds"),
            Player::new("b1").with_team("Blues"),
            Player::new("b2").with_team("Blues"),
        ])
        .unwrap()
    }

    fn ranking(order: &[&str]) -> StatTable {
        let mut table = StatTable::new();
        for (position, id) in order.iter().enumerate() {
            table.insert(
                *id,
                StatRecord {
                    rank: position as u32 + 1,
                    ..StatRecord::default()
                },
            );
        }
        table
    }

    #[test]
    fn matches_players_by_rank_within_team() {
        let boards = PairingProjector::project(
            &[Pairing::new_match("Reds", "Blues")],
            &roster(),
            &ranking(&["b2", "a2", "a1", "b1"]),
        );

        let pairings: Vec<&Pairing> = boards.iter().map(|board| &board.pairing).collect();
        assert_eq!(
            pairings,
            vec![&Pairing::new_match("a2", "b2"), &Pairing::new_match("a1", "b1")]
        );
        assert!(boards.iter().all(|board| board.team_a == "Reds" && board.team_b == "Blues"));
    }

    #[test]
    fn unranked_players_keep_roster_order() {
        let boards = PairingProjector::project(
            &[Pairing::new_match("Blues", "Reds")],
            &roster(),
            &StatTable::new(),
        );

        assert_eq!(boards[0].pairing, Pairing::new_match("b1", "a1"));
        assert_eq!(boards[1].pairing, Pairing::new_match("b2", "a2"));
    }

    #[test]
    fn team_bye_gives_every_member_a_bye() {
        let boards = PairingProjector::project(&[Pairing::bye("Reds")], &roster(), &StatTable::new());

        assert_eq!(boards.len(), 2);
        assert!(boards.iter().all(|board| board.pairing.is_bye() && board.team_b == BYE));
    }
}
