//! Standings rendering: terminal table and JSON.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::shared::format_stat_value;
use crate::stats::StatTable;
use crate::tournament::Standings;

#[derive(Serialize)]
struct JsonStanding {
    name: String,
    rank: u32,
    statistics: BTreeMap<String, f64>,
}

#[derive(Serialize)]
struct JsonOutput {
    generated_at: DateTime<Utc>,
    round: u32,
    standings: Vec<JsonStanding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    team_standings: Option<Vec<JsonStanding>>,
}

/// A fixed-width table: rank, name, then one column per statistic.
pub fn render_table(table: &StatTable, key_column: &str, statistics: &[String]) -> String {
    let statistics: Vec<&String> = statistics.iter().filter(|stat| *stat != "rank").collect();
    let name_width = table
        .ids()
        .iter()
        .map(String::len)
        .chain([key_column.len()])
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    let _ = write!(out, "{:>4} | {:<name_width$}", "#", key_column);
    for stat in &statistics {
        let _ = write!(out, " | {:>w$}", stat, w = stat.len());
    }
    out.push('\n');
    let _ = writeln!(out, "{}", "-".repeat(out.trim_end().len()));

    for (id, record) in table.iter() {
        let _ = write!(out, "{:>4} | {:<name_width$}", record.rank, id);
        for stat in &statistics {
            let _ = write!(out, " | {:>w$}", format_stat_value(record.get(stat)), w = stat.len());
        }
        out.push('\n');
    }
    out
}

fn json_rows(table: &StatTable, statistics: &[String]) -> Vec<JsonStanding> {
    table
        .iter()
        .map(|(id, record)| JsonStanding {
            name: id.to_string(),
            rank: record.rank,
            statistics: statistics
                .iter()
                .filter(|stat| *stat != "rank")
                .map(|stat| (stat.clone(), record.get(stat)))
                .collect(),
        })
        .collect()
}

pub fn to_json(standings: &Standings, statistics: &[String]) -> Result<String, serde_json::Error> {
    let output = JsonOutput {
        generated_at: Utc::now(),
        round: standings.round,
        standings: json_rows(&standings.players, statistics),
        team_standings: standings
            .teams
            .as_ref()
            .map(|teams| json_rows(teams, statistics)),
    };
    serde_json::to_string_pretty(&output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatRecord;

    fn standings() -> Standings {
        let mut players = StatTable::new();
        players.insert(
            "bob",
            StatRecord {
                rank: 1,
                points: 4,
                ..StatRecord::default()
            },
        );
        players.insert(
            "alice",
            StatRecord {
                rank: 2,
                ..StatRecord::default()
            },
        );
        Standings {
            round: 1,
            players,
            teams: None,
        }
    }

    fn statistics() -> Vec<String> {
        vec!["rank".into(), "points".into()]
    }

    #[test]
    fn table_lists_entities_in_rank_order() {
        let rendered = render_table(&standings().players, "Player", &statistics());
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "   # | Player | points");
        assert_eq!(lines[2], "   1 | bob    |      4");
        assert_eq!(lines[3], "   2 | alice  |      0");
    }

    #[test]
    fn json_carries_round_and_standings() {
        let json = to_json(&standings(), &statistics()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["round"], 1);
        assert_eq!(value["standings"][0]["name"], "bob");
        assert_eq!(value["standings"][0]["statistics"]["points"], 4.0);
        assert!(value.get("team_standings").is_none());
        assert!(value["generated_at"].as_str().is_some());
    }
}
