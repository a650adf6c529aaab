use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{debug, info, instrument, warn};

use crate::config::TrackerConfig;
use crate::stats::StatTable;

use super::{Pairing, PairingError, PairingHistory, PairingMode};

/// Swiss pairing generator: consecutive pairing in round 1, then a
/// depth-first search that never repeats a matchup.
#[derive(Debug, Clone)]
pub struct PairingEngine {
    max_steps: u64,
}

impl PairingEngine {
    pub fn new(max_steps: u64) -> Self {
        Self { max_steps }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.max_search_steps)
    }

    /// Pairs `entities` for `round`.
    ///
    /// `entities` is the roster order; `ranking` supplies ranks (entities
    /// without a record sort last). `seed` only matters for round 1 without
    /// any standings: `None` keeps roster order.
    #[instrument(skip(self, entities, ranking, history), fields(entities = entities.len()))]
    pub fn generate(
        &self,
        round: u32,
        entities: &[String],
        ranking: &StatTable,
        history: &PairingHistory,
        mode: PairingMode,
        seed: Option<u64>,
    ) -> Result<Vec<Pairing>, PairingError> {
        if mode == PairingMode::Team && entities.len() % 2 == 1 {
            warn!(teams = entities.len(), "Odd number of teams");
            return Err(PairingError::OddTeamCount {
                teams: entities.len(),
            });
        }

        let pairings = if round <= 1 {
            let order = Self::opening_order(entities, ranking, seed);
            Self::pair_consecutively(&order, mode)
        } else {
            let order = Self::rank_order(entities, ranking);
            let mut search = Search {
                history,
                mode,
                steps: 0,
                max_steps: self.max_steps,
                fewest_left: order.len(),
            };
            let found = search.descend(&order, Vec::with_capacity(order.len() / 2 + 1))?;
            debug!(steps = search.steps, "Search finished");
            found.ok_or(PairingError::Exhausted {
                round,
                remaining: search.fewest_left,
            })?
        };

        info!(pairs = pairings.len(), "Pairing generated");
        Ok(pairings)
    }

    fn rank_order(entities: &[String], ranking: &StatTable) -> Vec<String> {
        let mut order = entities.to_vec();
        order.sort_by_key(|entity| ranking.rank_of(entity));
        order
    }

    fn opening_order(entities: &[String], ranking: &StatTable, seed: Option<u64>) -> Vec<String> {
        if !ranking.is_empty() {
            debug!("Ordering by existing standings");
            return Self::rank_order(entities, ranking);
        }

        let mut order = entities.to_vec();
        if let Some(seed) = seed {
            debug!(seed, "No standings, shuffling");
            let mut rng = StdRng::seed_from_u64(seed);
            order.shuffle(&mut rng);
        }
        order
    }

    fn pair_consecutively(order: &[String], mode: PairingMode) -> Vec<Pairing> {
        let mut pairings: Vec<Pairing> = order
            .chunks_exact(2)
            .map(|pair| Pairing::new_match(&pair[0], &pair[1]))
            .collect();

        if let [.., last] = order {
            if order.len() % 2 == 1 && mode.allows_bye() {
                debug!(entity = %last, "Assigning BYE");
                pairings.push(Pairing::bye(last));
            }
        }
        pairings
    }
}

struct Search<'a> {
    history: &'a PairingHistory,
    mode: PairingMode,
    steps: u64,
    max_steps: u64,
    /// Smallest unpaired remainder any branch reached.
    fewest_left: usize,
}

impl Search<'_> {
    /// `remaining` is rank-ordered. Each branch owns its accumulator.
    fn descend(
        &mut self,
        remaining: &[String],
        accumulated: Vec<Pairing>,
    ) -> Result<Option<Vec<Pairing>>, PairingError> {
        self.fewest_left = self.fewest_left.min(remaining.len());
        let (anchor, candidates) = match remaining {
            [] => return Ok(Some(accumulated)),
            [last] => {
                if !self.mode.allows_bye() {
                    return Ok(None);
                }
                debug!(entity = %last, "One entity left, assigning BYE");
                let mut done = accumulated;
                done.push(Pairing::bye(last));
                return Ok(Some(done));
            }
            [anchor, candidates @ ..] => (anchor, candidates),
        };

        for (index, candidate) in candidates.iter().enumerate() {
            if self.history.contains(anchor, candidate) {
                debug!(anchor = %anchor, candidate = %candidate, "Already played, skipping");
                continue;
            }

            self.steps += 1;
            if self.steps > self.max_steps {
                return Err(PairingError::SearchBudgetExceeded {
                    steps: self.max_steps,
                });
            }

            let rest: Vec<String> = candidates
                .iter()
                .enumerate()
                .filter(|(other, _)| *other != index)
                .map(|(_, entity)| entity.clone())
                .collect();
            let mut branch = accumulated.clone();
            branch.push(Pairing::new_match(anchor, candidate));

            if let Some(found) = self.descend(&rest, branch)? {
                return Ok(Some(found));
            }
            debug!(anchor = %anchor, candidate = %candidate, "Backtracking");
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatRecord;
    use rstest::rstest;
    use std::collections::HashSet;

    fn names(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    fn ranked(order: &[&str]) -> StatTable {
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

    fn history(pairs: &[(&str, &str)]) -> PairingHistory {
        let mut history = PairingHistory::new();
        for (a, b) in pairs {
            history.record(a, b);
        }
        history
    }

    fn assert_each_placed_once(pairings: &[Pairing], entities: &[String]) {
        let placed: Vec<&str> = pairings.iter().flat_map(|p| p.entities()).collect();
        let unique: HashSet<&str> = placed.iter().copied().collect();
        assert_eq!(placed.len(), entities.len());
        assert_eq!(unique.len(), entities.len());
        assert!(pairings.iter().filter(|p| p.is_bye()).count() <= 1);
    }

    #[test]
    fn first_round_keeps_roster_order_without_seed() {
        let engine = PairingEngine::new(100);
        let entities = names(&["A", "B", "C", "D"]);

        let pairings = engine
            .generate(1, &entities, &StatTable::new(), &PairingHistory::new(), PairingMode::Individual, None)
            .unwrap();

        assert_eq!(
            pairings,
            vec![Pairing::new_match("A", "B"), Pairing::new_match("C", "D")]
        );
    }

    #[test]
    fn first_round_shuffle_is_deterministic_per_seed() {
        let engine = PairingEngine::new(100);
        let entities = names(&["A", "B", "C", "D", "E", "F", "G", "H"]);
        let run = |seed| {
            engine
                .generate(1, &entities, &StatTable::new(), &PairingHistory::new(), PairingMode::Individual, Some(seed))
                .unwrap()
        };

        assert_eq!(run(7), run(7));
        assert_each_placed_once(&run(7), &entities);
    }

    #[test]
    fn first_round_odd_count_gives_last_entity_a_bye() {
        let engine = PairingEngine::new(100);
        let entities = names(&["A", "B", "C", "D", "E"]);

        let pairings = engine
            .generate(1, &entities, &StatTable::new(), &PairingHistory::new(), PairingMode::Individual, None)
            .unwrap();

        assert_eq!(pairings.len(), 3);
        assert_eq!(pairings[2], Pairing::bye("E"));
        assert_each_placed_once(&pairings, &entities);
    }

    #[test]
    fn first_round_with_standings_follows_rank() {
        let engine = PairingEngine::new(100);
        let entities = names(&["A", "B", "C", "D"]);

        let pairings = engine
            .generate(1, &entities, &ranked(&["D", "B", "A", "C"]), &PairingHistory::new(), PairingMode::Individual, Some(3))
            .unwrap();

        assert_eq!(
            pairings,
            vec![Pairing::new_match("D", "B"), Pairing::new_match("A", "C")]
        );
    }

    #[test]
    fn anchor_takes_best_ranked_fresh_opponent() {
        let engine = PairingEngine::new(100);
        let entities = names(&["A", "B", "C", "D"]);

        let pairings = engine
            .generate(
                2,
                &entities,
                &ranked(&["C", "A", "D", "B"]),
                &history(&[("A", "B"), ("C", "D")]),
                PairingMode::Individual,
                None,
            )
            .unwrap();

        assert_eq!(
            pairings,
            vec![Pairing::new_match("C", "A"), Pairing::new_match("D", "B")]
        );
    }

    #[test]
    fn backtracks_when_lower_boards_would_rematch() {
        let engine = PairingEngine::new(100);
        let entities = names(&["A", "B", "C", "D"]);

        let pairings = engine
            .generate(
                2,
                &entities,
                &ranked(&["A", "B", "C", "D"]),
                &history(&[("C", "D")]),
                PairingMode::Individual,
                None,
            )
            .unwrap();

        assert_eq!(
            pairings,
            vec![Pairing::new_match("A", "C"), Pairing::new_match("B", "D")]
        );
    }

    #[test]
    fn odd_count_gives_lowest_remaining_a_bye() {
        let engine = PairingEngine::new(100);
        let entities = names(&["A", "B", "C"]);

        let pairings = engine
            .generate(2, &entities, &ranked(&["A", "B", "C"]), &history(&[("A", "B")]), PairingMode::Individual, None)
            .unwrap();

        assert_eq!(pairings, vec![Pairing::new_match("A", "C"), Pairing::bye("B")]);
    }

    #[test]
    fn unranked_entities_are_paired_last() {
        let engine = PairingEngine::new(100);
        let entities = names(&["newcomer", "A", "B", "C"]);

        let pairings = engine
            .generate(2, &entities, &ranked(&["A", "B", "C"]), &PairingHistory::new(), PairingMode::Individual, None)
            .unwrap();

        assert_eq!(
            pairings,
            vec![Pairing::new_match("A", "B"), Pairing::new_match("C", "newcomer")]
        );
    }

    #[test]
    fn exhausted_search_reports_round() {
        let engine = PairingEngine::new(100);
        let entities = names(&["A", "B", "C", "D"]);
        let everyone = history(&[("A", "B"), ("A", "C"), ("A", "D"), ("B", "C"), ("B", "D"), ("C", "D")]);

        let result = engine.generate(4, &entities, &ranked(&["A", "B", "C", "D"]), &everyone, PairingMode::Individual, None);

        assert_eq!(result, Err(PairingError::Exhausted { round: 4, remaining: 4 }));
    }

    #[test]
    fn exhaustion_reports_deepest_unpaired_remainder() {
        let engine = PairingEngine::new(100);
        let entities = names(&["A", "B", "C", "D"]);
        let played = history(&[("A", "D"), ("B", "D"), ("C", "D")]);

        let result = engine.generate(3, &entities, &ranked(&["A", "B", "C", "D"]), &played, PairingMode::Individual, None);

        assert_eq!(result, Err(PairingError::Exhausted { round: 3, remaining: 2 }));
    }

    #[test]
    fn step_budget_bounds_the_search() {
        let engine = PairingEngine::new(1);
        let entities = names(&["A", "B", "C", "D"]);

        let result = engine.generate(2, &entities, &ranked(&["A", "B", "C", "D"]), &history(&[("C", "D")]), PairingMode::Individual, None);

        assert_eq!(result, Err(PairingError::SearchBudgetExceeded { steps: 1 }));
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    fn odd_team_count_always_fails(#[case] round: u32) {
        let engine = PairingEngine::new(100);
        let teams = names(&["Reds", "Blues", "Greens"]);

        let result = engine.generate(round, &teams, &StatTable::new(), &PairingHistory::new(), PairingMode::Team, None);

        assert_eq!(result, Err(PairingError::OddTeamCount { teams: 3 }));
    }

    #[test]
    fn team_mode_never_uses_bye() {
        let engine = PairingEngine::new(100);
        let teams = names(&["Reds", "Blues", "Greens", "Golds"]);
        let played = history(&[("Reds", "Blues"), ("Greens", "Golds"), ("Reds", "Greens"), ("Blues", "Golds")]);

        let pairings = engine
            .generate(3, &teams, &ranked(&["Reds", "Blues", "Greens", "Golds"]), &played, PairingMode::Team, None)
            .unwrap();

        assert_eq!(
            pairings,
            vec![Pairing::new_match("Reds", "Golds"), Pairing::new_match("Blues", "Greens")]
        );
    }
}
