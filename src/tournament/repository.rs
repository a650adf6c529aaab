use std::sync::RwLock;

use crate::records::RecordsError;
use crate::round::RoundRecord;
use crate::stats::StatTable;

/// Storage for round records and the standings derived from them.
pub trait TournamentRepository: Send + Sync {
    /// Every stored round, ordered by round number.
    fn load_rounds(&self) -> Result<Vec<RoundRecord>, RecordsError>;
    fn save_round(&self, round: &RoundRecord) -> Result<(), RecordsError>;
    fn save_standings(&self, standings: &StatTable, statistics: &[String]) -> Result<(), RecordsError>;
    fn save_team_standings(
        &self,
        standings: &StatTable,
        statistics: &[String],
    ) -> Result<(), RecordsError>;
}

#[derive(Debug, Default)]
pub struct InMemoryTournamentRepository {
    rounds: RwLock<Vec<RoundRecord>>,
    standings: RwLock<Option<StatTable>>,
    team_standings: RwLock<Option<StatTable>>,
}

impl InMemoryTournamentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rounds(rounds: Vec<RoundRecord>) -> Self {
        Self {
            rounds: RwLock::new(rounds),
            ..Self::default()
        }
    }

    pub fn standings(&self) -> Result<Option<StatTable>, RecordsError> {
        Ok(self.standings.read().map_err(|_| RecordsError::Poisoned)?.clone())
    }

    pub fn team_standings(&self) -> Result<Option<StatTable>, RecordsError> {
        Ok(self
            .team_standings
            .read()
            .map_err(|_| RecordsError::Poisoned)?
            .clone())
    }

    /// Replaces a stored round, e.g. to enter results.
    pub fn update_round(&self, round: RoundRecord) -> Result<(), RecordsError> {
        self.save_round(&round)
    }
}

impl TournamentRepository for InMemoryTournamentRepository {
    fn load_rounds(&self) -> Result<Vec<RoundRecord>, RecordsError> {
        Ok(self.rounds.read().map_err(|_| RecordsError::Poisoned)?.clone())
    }

    fn save_round(&self, round: &RoundRecord) -> Result<(), RecordsError> {
        let mut rounds = self.rounds.write().map_err(|_| RecordsError::Poisoned)?;
        match rounds.iter_mut().find(|stored| stored.number == round.number) {
            Some(stored) => *stored = round.clone(),
            None => {
                rounds.push(round.clone());
                rounds.sort_by_key(|stored| stored.number);
            }
        }
        Ok(())
    }

    fn save_standings(&self, standings: &StatTable, _statistics: &[String]) -> Result<(), RecordsError> {
        *self.standings.write().map_err(|_| RecordsError::Poisoned)? = Some(standings.clone());
        Ok(())
    }

    fn save_team_standings(
        &self,
        standings: &StatTable,
        _statistics: &[String],
    ) -> Result<(), RecordsError> {
        *self
            .team_standings
            .write()
            .map_err(|_| RecordsError::Poisoned)? = Some(standings.clone());
        Ok(())
    }
}
