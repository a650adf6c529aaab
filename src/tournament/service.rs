use rand::{rngs::StdRng, SeedableRng};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::config::{TierTable, TrackerConfig};
use crate::pairing::{PairingEngine, PairingHistory, PairingMode, PairingProjector, Rematch};
use crate::roster::Roster;
use crate::round::{MatchRecord, RoundRecord};
use crate::shared::TrackerError;
use crate::stats::{StatCollector, StatTable, StatsAggregator, TeamAggregator};

use super::TournamentRepository;

/// Standings after the last completed round.
#[derive(Debug, Clone, PartialEq)]
pub struct Standings {
    /// Number of rounds folded in; 0 before the first round.
    pub round: u32,
    pub players: StatTable,
    pub teams: Option<StatTable>,
}

/// Outcome of a successful `advance`.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub round: u32,
    pub standings: Standings,
    pub matches: Vec<MatchRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedRound {
    pub round: u32,
    pub filled: usize,
}

/// One state transition per call: standings for the finished round, then
/// the next round's pairing.
pub struct TournamentService {
    repository: Arc<dyn TournamentRepository>,
    aggregator: StatsAggregator,
    team_aggregator: TeamAggregator,
    engine: PairingEngine,
    tiers: Option<TierTable>,
    team_size: Option<usize>,
    random_seed: Option<u64>,
}

impl TournamentService {
    pub fn builder(repository: Arc<dyn TournamentRepository>) -> TournamentServiceBuilder {
        TournamentServiceBuilder::new(repository)
    }

    pub fn aggregator(&self) -> &StatsAggregator {
        &self.aggregator
    }

    /// Checks the roster against the configured team size and tier table.
    pub fn prepare_roster(&self, roster: Roster) -> Result<Roster, TrackerError> {
        let roster = roster.expect_team_size(self.team_size)?;
        if let Some(tiers) = &self.tiers {
            roster.validate_tiers(tiers)?;
        }
        Ok(roster)
    }

    /// Current standings, computed from every stored round. Nothing is written.
    #[instrument(skip_all)]
    pub fn standings(&self, roster: &Roster) -> Result<Standings, TrackerError> {
        let rounds = self.repository.load_rounds()?;
        self.compute_standings(roster, &rounds)
    }

    /// Saves standings for the completed rounds, then generates and saves
    /// the next round. On a pairing failure the saved standings stay valid
    /// and no round is written.
    #[instrument(skip_all)]
    pub fn advance(&self, roster: &Roster) -> Result<RoundSummary, TrackerError> {
        let rounds = self.repository.load_rounds()?;
        let standings = self.compute_standings(roster, &rounds)?;

        if !rounds.is_empty() {
            let statistics = self.aggregator.statistics();
            self.repository.save_standings(&standings.players, statistics)?;
            if let Some(teams) = &standings.teams {
                self.repository.save_team_standings(teams, statistics)?;
            }
        }

        let next = rounds.len() as u32 + 1;
        let matches = self.pair_round(next, roster, &rounds, &standings)?;
        let round = RoundRecord::new(next, matches)
            .with_columns(self.aggregator.column_statistics().to_vec());
        self.repository.save_round(&round)?;

        info!(round = next, matches = round.matches.len(), "Round generated");
        Ok(RoundSummary {
            round: next,
            standings,
            matches: round.matches,
        })
    }

    /// Pairs that met in more than one stored round.
    pub fn audit(&self, roster: &Roster) -> Result<Vec<Rematch>, TrackerError> {
        let rounds = self.repository.load_rounds()?;
        let rematches = match PairingMode::for_roster(roster) {
            PairingMode::Individual => Rematch::find_individual(&rounds),
            PairingMode::Team => Rematch::find_team(&rounds, roster),
        };
        for rematch in &rematches {
            warn!(
                side_a = %rematch.side_a,
                side_b = %rematch.side_b,
                rounds = ?rematch.rounds,
                "Rematch found"
            );
        }
        Ok(rematches)
    }

    /// Fills blank result cells of the latest round with random values.
    pub fn simulate(&self, seed: Option<u64>) -> Result<Option<SimulatedRound>, TrackerError> {
        let rounds = self.repository.load_rounds()?;
        let Some(mut round) = rounds.into_iter().last() else {
            warn!("No round to simulate");
            return Ok(None);
        };

        let filled = match seed {
            Some(seed) => round.fill_blank_scores(&mut StdRng::seed_from_u64(seed)),
            None => round.fill_blank_scores(&mut rand::rng()),
        };
        self.repository.save_round(&round)?;

        info!(round = round.number, filled, "Round simulated");
        Ok(Some(SimulatedRound {
            round: round.number,
            filled,
        }))
    }

    fn compute_standings(
        &self,
        roster: &Roster,
        rounds: &[RoundRecord],
    ) -> Result<Standings, TrackerError> {
        let players = self.aggregator.recompute(roster, rounds)?;
        let teams = (roster.is_team_mode() && !rounds.is_empty())
            .then(|| self.team_aggregator.compute(roster, &players));
        Ok(Standings {
            round: rounds.len() as u32,
            players,
            teams,
        })
    }

    fn pair_round(
        &self,
        round: u32,
        roster: &Roster,
        rounds: &[RoundRecord],
        standings: &Standings,
    ) -> Result<Vec<MatchRecord>, TrackerError> {
        let mode = PairingMode::for_roster(roster);
        match mode {
            PairingMode::Individual => {
                let history = PairingHistory::from_rounds(rounds);
                let pairings = self.engine.generate(
                    round,
                    &roster.player_names(),
                    &standings.players,
                    &history,
                    mode,
                    self.random_seed,
                )?;
                Ok(pairings.iter().map(MatchRecord::from).collect())
            }
            PairingMode::Team => {
                let history = PairingHistory::for_teams(rounds, roster);
                let empty = StatTable::new();
                let team_ranking = standings.teams.as_ref().unwrap_or(&empty);
                let team_pairs = self.engine.generate(
                    round,
                    &roster.team_names(),
                    team_ranking,
                    &history,
                    mode,
                    self.random_seed,
                )?;
                let boards = PairingProjector::project(&team_pairs, roster, &standings.players);
                Ok(boards
                    .into_iter()
                    .map(|board| {
                        MatchRecord::from(&board.pairing).with_teams(board.team_a, board.team_b)
                    })
                    .collect())
            }
        }
    }
}

pub struct TournamentServiceBuilder {
    repository: Arc<dyn TournamentRepository>,
    config: TrackerConfig,
    collectors: Vec<Arc<dyn StatCollector>>,
}

impl TournamentServiceBuilder {
    fn new(repository: Arc<dyn TournamentRepository>) -> Self {
        Self {
            repository,
            config: TrackerConfig::default(),
            collectors: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a collector on top of the ones derived from the config.
    pub fn with_collector(mut self, collector: Arc<dyn StatCollector>) -> Self {
        self.collectors.push(collector);
        self
    }

    pub fn build(self) -> TournamentService {
        let aggregator = self
            .collectors
            .into_iter()
            .fold(
                StatsAggregator::builder()
                    .with_statistics(self.config.statistic_names())
                    .with_tie_breaks(self.config.individual_tie_breaks())
                    .with_tiers(self.config.tiers.clone()),
                |builder, collector| builder.with_collector(collector),
            )
            .build();

        TournamentService {
            repository: self.repository,
            aggregator,
            team_aggregator: TeamAggregator::from_config(&self.config),
            engine: PairingEngine::from_config(&self.config),
            tiers: self.config.tiers,
            team_size: self.config.team_size,
            random_seed: self.config.random_seed,
        }
    }
}
