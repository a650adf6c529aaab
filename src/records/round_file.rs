use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::round::{MatchRecord, RoundRecord, Side};

use super::RecordsError;

const TEAM_A: &str = "TeamA";
const TEAM_B: &str = "TeamB";
const PLAYER_A: &str = "PlayerA";
const PLAYER_B: &str = "PlayerB";
const TOUCHDOWN: &str = "Touchdown";

pub fn round_file_name(number: u32) -> String {
    format!("round{number}.csv")
}

fn round_number(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix("round")?
        .strip_suffix(".csv")?
        .parse()
        .ok()
}

/// Round files in `dir`, sorted by round number. A missing directory has no
/// rounds; unrelated files are ignored.
pub fn list_round_files(dir: &Path) -> Result<Vec<(u32, PathBuf)>, RecordsError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(RecordsError::io(dir)(e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(RecordsError::io(dir))?.path();
        let number = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(round_number);
        match number {
            Some(number) => files.push((number, path)),
            None => debug!(path = %path.display(), "Ignoring non-round file"),
        }
    }
    files.sort_by_key(|(number, _)| *number);
    Ok(files)
}

struct Columns {
    teams: Option<(usize, usize)>,
    players: (usize, usize),
    scores: (usize, usize),
    extras: Vec<(String, usize, usize)>,
}

impl Columns {
    fn locate(path: &Path, headers: &csv::StringRecord) -> Result<Self, RecordsError> {
        let find = |name: &str| headers.iter().position(|header| header == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| RecordsError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
        };

        let teams = find(TEAM_A).zip(find(TEAM_B));
        let players = (require(PLAYER_A)?, require(PLAYER_B)?);
        let score_a = Side::A.column(TOUCHDOWN);
        let score_b = Side::B.column(TOUCHDOWN);
        let scores = (require(&score_a)?, require(&score_b)?);

        let reserved = [TEAM_A, TEAM_B, PLAYER_A, PLAYER_B, score_a.as_str(), score_b.as_str()];
        let extras = headers
            .iter()
            .enumerate()
            .filter(|(_, header)| !reserved.contains(header))
            .filter_map(|(index_a, header)| {
                let stat = header.strip_suffix(&Side::A.to_string())?;
                let index_b = find(&Side::B.column(stat))?;
                Some((stat.to_string(), index_a, index_b))
            })
            .collect();

        Ok(Self {
            teams,
            players,
            scores,
            extras,
        })
    }
}

fn parse_score(
    path: &Path,
    record: &csv::StringRecord,
    index: usize,
) -> Result<Option<i64>, RecordsError> {
    let raw = record.get(index).unwrap_or_default();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| RecordsError::InvalidScore {
        path: path.to_path_buf(),
        line: record.position().map(|p| p.line()).unwrap_or_default(),
        value: raw.to_string(),
    })
}

/// Reads one round file. Missing trailing cells are blank; rows without a
/// `PlayerA` are skipped.
pub fn read_round(path: &Path, number: u32) -> Result<RoundRecord, RecordsError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(RecordsError::csv(path))?;
    let headers = reader.headers().map_err(RecordsError::csv(path))?.clone();
    let columns = Columns::locate(path, &headers)?;

    let mut matches = Vec::new();
    for row in reader.records() {
        let row = row.map_err(RecordsError::csv(path))?;
        let cell = |index: usize| row.get(index).unwrap_or_default().to_string();

        let side_a = cell(columns.players.0);
        if side_a.is_empty() {
            continue;
        }

        let mut game = MatchRecord::pending(side_a, cell(columns.players.1));
        game.score_a = parse_score(path, &row, columns.scores.0)?;
        game.score_b = parse_score(path, &row, columns.scores.1)?;
        if let Some((team_a, team_b)) = columns.teams {
            game.teams = Some((cell(team_a), cell(team_b)));
        }
        game.extras = columns
            .extras
            .iter()
            .map(|(stat, a, b)| (stat.clone(), (cell(*a), cell(*b))))
            .collect::<BTreeMap<_, _>>();
        matches.push(game);
    }

    let extra_columns = columns.extras.into_iter().map(|(stat, _, _)| stat).collect();
    Ok(RoundRecord::new(number, matches).with_columns(extra_columns))
}

/// Writes a round file; team columns are written when any match has teams.
pub fn write_round(path: &Path, round: &RoundRecord) -> Result<(), RecordsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(RecordsError::io(parent))?;
    }
    let with_teams = round.has_team_columns();

    let mut header: Vec<String> = Vec::new();
    if with_teams {
        header.extend([TEAM_A.to_string(), TEAM_B.to_string()]);
    }
    header.extend([
        PLAYER_A.to_string(),
        PLAYER_B.to_string(),
        Side::A.column(TOUCHDOWN),
        Side::B.column(TOUCHDOWN),
    ]);
    for stat in &round.extra_columns {
        header.extend([Side::A.column(stat), Side::B.column(stat)]);
    }

    let mut writer = csv::Writer::from_path(path).map_err(RecordsError::csv(path))?;
    writer.write_record(&header).map_err(RecordsError::csv(path))?;

    let score = |value: Option<i64>| value.map(|v| v.to_string()).unwrap_or_default();
    for game in &round.matches {
        let mut row: Vec<String> = Vec::with_capacity(header.len());
        if with_teams {
            let (team_a, team_b) = game.teams.clone().unwrap_or_default();
            row.extend([team_a, team_b]);
        }
        row.extend([
            game.side_a.clone(),
            game.side_b.clone(),
            score(game.score_a),
            score(game.score_b),
        ]);
        for stat in &round.extra_columns {
            for side in [Side::A, Side::B] {
                row.push(game.extra(stat, side).unwrap_or_default().to_string());
            }
        }
        writer.write_record(&row).map_err(RecordsError::csv(path))?;
    }
    writer.flush().map_err(RecordsError::io(path))?;

    info!(path = %path.display(), matches = round.matches.len(), "Round saved");
    Ok(())
}
