use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use strum_macros::EnumIter;

use crate::shared::BYE;

use super::SIMULATED_SCORE_MAX;

/// Which half of a match row an entity occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Column name for a side-suffixed statistic, e.g. `casualtiesA`.
    pub fn column(self, stat: &str) -> String {
        format!("{stat}{self}")
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Side::A => "A",
                Side::B => "B",
            }
        )
    }
}

/// One played or pending game.
///
/// Extra statistics keep their raw cell text; the aggregator decides how to
/// coerce them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchRecord {
    pub teams: Option<(String, String)>,
    pub side_a: String,
    pub side_b: String,
    pub score_a: Option<i64>,
    pub score_b: Option<i64>,
    pub extras: BTreeMap<String, (String, String)>,
}

impl MatchRecord {
    pub fn pending(side_a: impl Into<String>, side_b: impl Into<String>) -> Self {
        Self {
            side_a: side_a.into(),
            side_b: side_b.into(),
            ..Self::default()
        }
    }

    pub fn bye(entity: impl Into<String>) -> Self {
        Self::pending(entity, BYE)
    }

    pub fn with_scores(mut self, score_a: i64, score_b: i64) -> Self {
        self.score_a = Some(score_a);
        self.score_b = Some(score_b);
        self
    }

    pub fn with_teams(mut self, team_a: impl Into<String>, team_b: impl Into<String>) -> Self {
        self.teams = Some((team_a.into(), team_b.into()));
        self
    }

    pub fn with_extra(
        mut self,
        stat: impl Into<String>,
        value_a: impl Into<String>,
        value_b: impl Into<String>,
    ) -> Self {
        self.extras
            .insert(stat.into(), (value_a.into(), value_b.into()));
        self
    }

    pub fn is_bye(&self) -> bool {
        self.side_a == BYE || self.side_b == BYE
    }

    pub fn is_complete(&self) -> bool {
        self.score_a.is_some() && self.score_b.is_some()
    }

    pub fn entity(&self, side: Side) -> &str {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        }
    }

    pub fn score(&self, side: Side) -> Option<i64> {
        match side {
            Side::A => self.score_a,
            Side::B => self.score_b,
        }
    }

    pub fn extra(&self, stat: &str, side: Side) -> Option<&str> {
        self.extras.get(stat).map(|(a, b)| match side {
            Side::A => a.as_str(),
            Side::B => b.as_str(),
        })
    }
}

/// All matches of one round, in file order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoundRecord {
    pub number: u32,
    pub matches: Vec<MatchRecord>,
    /// Extra statistics that have an `A`/`B` column pair in this round.
    pub extra_columns: Vec<String>,
}

impl RoundRecord {
    /// Builds a round whose extra columns are the union of its matches' extras.
    pub fn new(number: u32, matches: Vec<MatchRecord>) -> Self {
        let mut extra_columns: Vec<String> = Vec::new();
        for game in &matches {
            for stat in game.extras.keys() {
                if !extra_columns.contains(stat) {
                    extra_columns.push(stat.clone());
                }
            }
        }
        Self {
            number,
            matches,
            extra_columns,
        }
    }

    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.extra_columns = columns;
        self
    }

    pub fn tracks(&self, stat: &str) -> bool {
        self.extra_columns.iter().any(|column| column == stat)
    }

    pub fn has_team_columns(&self) -> bool {
        self.matches.iter().any(|game| game.teams.is_some())
    }

    pub fn first_incomplete(&self) -> Option<&MatchRecord> {
        self.matches
            .iter()
            .find(|game| !game.is_bye() && !game.is_complete())
    }

    pub fn is_complete(&self) -> bool {
        self.first_incomplete().is_none()
    }

    /// Fills every blank score and extra cell with a random value in
    /// `0..=SIMULATED_SCORE_MAX`. BYE rows are left alone. Returns the number
    /// of cells filled.
    pub fn fill_blank_scores(&mut self, rng: &mut impl Rng) -> usize {
        let mut filled = 0;
        let columns = self.extra_columns.clone();

        for game in self.matches.iter_mut().filter(|game| !game.is_bye()) {
            for score in [&mut game.score_a, &mut game.score_b] {
                if score.is_none() {
                    *score = Some(rng.random_range(0..=SIMULATED_SCORE_MAX));
                    filled += 1;
                }
            }

            for stat in &columns {
                let cells = game.extras.entry(stat.clone()).or_default();
                for cell in [&mut cells.0, &mut cells.1] {
                    if cell.trim().is_empty() {
                        *cell = rng.random_range(0..=SIMULATED_SCORE_MAX).to_string();
                        filled += 1;
                    }
                }
            }
        }

        filled
    }
}
