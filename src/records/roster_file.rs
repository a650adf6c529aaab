use std::path::Path;
use tracing::{info, warn};

use crate::roster::{Player, Roster};

use super::RecordsError;

const PLAYER_COLUMN: &str = "Player";
const TEAM_COLUMN: &str = "Team";

/// Reads the roster CSV.
///
/// The `Player` column holds the name (the first column when absent), an
/// optional `Team` column switches the roster to team mode and every other
/// column becomes an attribute. Rows shorter than the header are skipped.
pub fn load_roster(path: &Path) -> Result<Roster, RecordsError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(RecordsError::csv(path))?;

    let headers = reader.headers().map_err(RecordsError::csv(path))?.clone();
    let name_index = headers
        .iter()
        .position(|header| header == PLAYER_COLUMN)
        .unwrap_or(0);
    let team_index = headers.iter().position(|header| header == TEAM_COLUMN);

    let mut players = Vec::new();
    for row in reader.records() {
        let row = row.map_err(RecordsError::csv(path))?;
        if row.len() < headers.len() {
            warn!(
                line = row.position().map(|p| p.line()).unwrap_or_default(),
                "Skipping short roster row"
            );
            continue;
        }

        let mut player = Player::new(&row[name_index]);
        if let Some(team_index) = team_index {
            player.team = Some(row[team_index].to_string());
        }
        for (index, (header, value)) in headers.iter().zip(row.iter()).enumerate() {
            if index != name_index && Some(index) != team_index {
                player = player.with_attribute(header, value);
            }
        }
        players.push(player);
    }

    let roster = Roster::new(players)?;
    info!(
        players = roster.players().len(),
        teams = roster.teams().len(),
        path = %path.display(),
        "Roster loaded"
    );
    Ok(roster)
}
