use std::fmt::Write;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use touchdown_tracker::{
    records::load_roster, CsvTournamentRepository, Roster, TournamentService, TrackerConfig,
};

// ============================================================================
// Roster Builder
// ============================================================================

pub struct RosterBuilder {
    teams: Option<usize>,
    players: usize,
    race: bool,
}

impl RosterBuilder {
    /// `count` players without teams.
    pub fn individuals(count: usize) -> Self {
        Self {
            teams: None,
            players: count,
            race: false,
        }
    }

    /// `teams` teams of `size` players each.
    pub fn teams(teams: usize, size: usize) -> Self {
        Self {
            teams: Some(teams),
            players: teams * size,
            race: false,
        }
    }

    /// Adds a `Race` column alternating Orc/Elf.
    pub fn with_races(mut self) -> Self {
        self.race = true;
        self
    }

    pub fn to_csv(&self) -> String {
        let mut csv = String::from("Player");
        if self.teams.is_some() {
            csv.push_str(",Team");
        }
        if self.race {
            csv.push_str(",Race");
        }
        csv.push('\n');

        for index in 0..self.players {
            let _ = write!(csv, "p{index:02}");
            if let Some(teams) = self.teams {
                let _ = write!(csv, ",T{}", index % teams);
            }
            if self.race {
                csv.push_str(if index % 2 == 0 { ",Orc" } else { ",Elf" });
            }
            csv.push('\n');
        }
        csv
    }
}

// ============================================================================
// Tournament Setup
// ============================================================================

/// A tournament directory with roster, rounds and stats under a temp dir.
pub struct TournamentSetup {
    pub dir: TempDir,
    pub config: TrackerConfig,
    pub repository: Arc<CsvTournamentRepository>,
    pub service: TournamentService,
    pub roster: Roster,
}

impl TournamentSetup {
    pub fn new(roster: RosterBuilder) -> Self {
        Self::with_config(roster, TrackerConfig::default())
    }

    pub fn with_config(roster: RosterBuilder, mut config: TrackerConfig) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        config.players_file = dir.path().join("players.csv");
        config.rounds_dir = dir.path().join("rounds");
        config.stats_dir = dir.path().join("stats");
        fs::write(&config.players_file, roster.to_csv()).expect("roster written");

        let repository = Arc::new(CsvTournamentRepository::from_config(&config));
        let service = TournamentService::builder(repository.clone())
            .with_config(config.clone())
            .build();
        let roster = service
            .prepare_roster(load_roster(&config.players_file).expect("roster loads"))
            .expect("roster valid");

        Self {
            dir,
            config,
            repository,
            service,
            roster,
        }
    }

    pub fn stats_file(&self) -> PathBuf {
        self.repository.standings_path()
    }

    pub fn team_stats_file(&self) -> PathBuf {
        self.repository.team_standings_path()
    }
}
