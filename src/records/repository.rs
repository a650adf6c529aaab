use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::config::TrackerConfig;
use crate::round::RoundRecord;
use crate::stats::StatTable;
use crate::tournament::TournamentRepository;

use super::{list_round_files, read_round, round_file_name, write_round, write_standings, RecordsError};

pub const STATISTICS_FILE: &str = "statistics.csv";
pub const TEAM_STATISTICS_FILE: &str = "team_statistics.csv";

/// Round files and standings tables on disk.
#[derive(Debug, Clone)]
pub struct CsvTournamentRepository {
    rounds_dir: PathBuf,
    stats_dir: PathBuf,
}

impl CsvTournamentRepository {
    pub fn new(rounds_dir: impl Into<PathBuf>, stats_dir: impl Into<PathBuf>) -> Self {
        Self {
            rounds_dir: rounds_dir.into(),
            stats_dir: stats_dir.into(),
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(&config.rounds_dir, &config.stats_dir)
    }

    pub fn rounds_dir(&self) -> &Path {
        &self.rounds_dir
    }

    pub fn round_path(&self, number: u32) -> PathBuf {
        self.rounds_dir.join(round_file_name(number))
    }

    pub fn standings_path(&self) -> PathBuf {
        self.stats_dir.join(STATISTICS_FILE)
    }

    pub fn team_standings_path(&self) -> PathBuf {
        self.stats_dir.join(TEAM_STATISTICS_FILE)
    }
}

impl TournamentRepository for CsvTournamentRepository {
    #[instrument(skip(self), fields(dir = %self.rounds_dir.display()))]
    fn load_rounds(&self) -> Result<Vec<RoundRecord>, RecordsError> {
        list_round_files(&self.rounds_dir)?
            .into_iter()
            .map(|(number, path)| {
                debug!(path = %path.display(), "Loading round");
                read_round(&path, number)
            })
            .collect()
    }

    fn save_round(&self, round: &RoundRecord) -> Result<(), RecordsError> {
        write_round(&self.round_path(round.number), round)
    }

    fn save_standings(&self, standings: &StatTable, statistics: &[String]) -> Result<(), RecordsError> {
        write_standings(&self.standings_path(), "Player", standings, statistics)
    }

    fn save_team_standings(
        &self,
        standings: &StatTable,
        statistics: &[String],
    ) -> Result<(), RecordsError> {
        write_standings(&self.team_standings_path(), "Team", standings, statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::MatchRecord;

    #[test]
    fn rounds_round_trip_through_directory() {
        let dir = tempfile::tempdir().unwrap();
        let repository = CsvTournamentRepository::new(dir.path().join("rounds"), dir.path().join("stats"));
        assert!(repository.load_rounds().unwrap().is_empty());

        repository
            .save_round(&RoundRecord::new(
                1,
                vec![
                    MatchRecord::pending("alice", "bob").with_scores(3, 1),
                    MatchRecord::bye("carol"),
                ],
            ))
            .unwrap();
        repository
            .save_round(&RoundRecord::new(2, vec![MatchRecord::pending("carol", "alice")]))
            .unwrap();

        let rounds = repository.load_rounds().unwrap();
        assert_eq!(rounds.len(), 2);
        assert!(rounds[0].is_complete());
        assert!(!rounds[1].is_complete());
        assert!(repository.round_path(2).exists());
    }

    #[test]
    fn standings_go_to_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let repository = CsvTournamentRepository::new(dir.path().join("rounds"), dir.path().join("stats"));
        let statistics = vec!["rank".to_string()];

        repository.save_standings(&StatTable::new(), &statistics).unwrap();
        repository.save_team_standings(&StatTable::new(), &statistics).unwrap();

        assert!(repository.standings_path().exists());
        assert!(repository.team_standings_path().exists());
    }
}
