use std::collections::{HashMap, HashSet};

use touchdown_tracker::{
    MatchRecord, RoundRecord, TournamentRepository, BYE,
};

use super::TournamentSetup;

// ============================================================================
// Actions
// ============================================================================

/// Enters deterministic results for the latest round: side A scores
/// `round % 3`, side B `(round + len(side B)) % 4`.
pub fn play_round(setup: &TournamentSetup) -> RoundRecord {
    let mut rounds = setup.repository.load_rounds().expect("rounds load");
    let mut round = rounds.pop().expect("a round to play");
    let number = round.number as i64;

    for game in round.matches.iter_mut().filter(|game| !game.is_bye()) {
        game.score_a = Some(number % 3);
        game.score_b = Some((number + game.side_b.len() as i64) % 4);
    }
    setup.repository.save_round(&round).expect("round saved");
    round
}

// ============================================================================
// Assertions
// ============================================================================

/// Every entity placed exactly once, at most one BYE, and only for an odd count.
pub fn assert_round_well_formed(matches: &[MatchRecord], entities: usize) {
    let mut seen = HashSet::new();
    for game in matches {
        assert!(seen.insert(game.side_a.clone()), "{} placed twice", game.side_a);
        if game.side_b != BYE {
            assert!(seen.insert(game.side_b.clone()), "{} placed twice", game.side_b);
        }
    }
    assert_eq!(seen.len(), entities, "every entity placed");

    let byes = matches.iter().filter(|game| game.is_bye()).count();
    assert!(byes <= 1, "at most one BYE per round");
    assert_eq!(byes == 1, entities % 2 == 1, "BYE only for odd counts");
}

/// No unordered pair of real entities met in two different rounds.
pub fn assert_no_rematches(rounds: &[RoundRecord]) {
    let mut met: HashMap<(String, String), u32> = HashMap::new();
    for round in rounds {
        for game in round.matches.iter().filter(|game| !game.is_bye()) {
            let key = if game.side_a <= game.side_b {
                (game.side_a.clone(), game.side_b.clone())
            } else {
                (game.side_b.clone(), game.side_a.clone())
            };
            if let Some(previous) = met.insert(key.clone(), round.number) {
                panic!("{key:?} met in rounds {previous} and {}", round.number);
            }
        }
    }
}
