use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::shared::UNRANKED;

/// Statistics every record carries, in file column order.
pub const BASE_STATISTICS: [&str; 8] = [
    "rank",
    "points",
    "wins",
    "draws",
    "losses",
    "touchdown_scored",
    "touchdown_conceded",
    "touchdown_diff",
];

/// Accumulated statistics for one player or team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatRecord {
    pub rank: u32,
    pub points: i64,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub touchdown_scored: i64,
    pub touchdown_conceded: i64,
    pub touchdown_diff: i64,
    /// Configured statistics beyond the base set.
    pub extra: BTreeMap<String, f64>,
}

impl StatRecord {
    /// A zeroed record tracking the given statistics. Base names are ignored.
    pub fn with_statistics(statistics: &[String]) -> Self {
        let extra = statistics
            .iter()
            .filter(|stat| !BASE_STATISTICS.contains(&stat.as_str()))
            .map(|stat| (stat.clone(), 0.0))
            .collect();
        Self {
            extra,
            ..Self::default()
        }
    }

    pub fn get(&self, stat: &str) -> f64 {
        match stat {
            "rank" => self.rank as f64,
            "points" => self.points as f64,
            "wins" => self.wins as f64,
            "draws" => self.draws as f64,
            "losses" => self.losses as f64,
            "touchdown_scored" => self.touchdown_scored as f64,
            "touchdown_conceded" => self.touchdown_conceded as f64,
            "touchdown_diff" => self.touchdown_diff as f64,
            other => self.extra.get(other).copied().unwrap_or_default(),
        }
    }

    pub fn add_extra(&mut self, stat: &str, value: f64) {
        *self.extra.entry(stat.to_string()).or_default() += value;
    }

    pub fn set_extra(&mut self, stat: &str, value: f64) {
        self.extra.insert(stat.to_string(), value);
    }

    /// Adds every statistic of `other` except rank.
    pub fn absorb(&mut self, other: &StatRecord) {
        self.points += other.points;
        self.wins += other.wins;
        self.draws += other.draws;
        self.losses += other.losses;
        self.touchdown_scored += other.touchdown_scored;
        self.touchdown_conceded += other.touchdown_conceded;
        self.touchdown_diff += other.touchdown_diff;
        for (stat, value) in &other.extra {
            self.add_extra(stat, *value);
        }
    }
}

/// Records keyed by entity id, kept in standings order.
///
/// New entities are appended, so entities that tie on every key keep the
/// order in which they were first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatTable {
    order: Vec<String>,
    records: HashMap<String, StatRecord>,
}

impl StatTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&StatRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// The record for `id`, created zeroed on first use.
    pub fn entry(&mut self, id: &str, statistics: &[String]) -> &mut StatRecord {
        if !self.records.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.records
            .entry(id.to_string())
            .or_insert_with(|| StatRecord::with_statistics(statistics))
    }

    pub fn insert(&mut self, id: impl Into<String>, record: StatRecord) {
        let id = id.into();
        if !self.records.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.records.insert(id, record);
    }

    pub fn ids(&self) -> &[String] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatRecord)> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id).map(|record| (id.as_str(), record)))
    }

    /// The entity's rank, or [`UNRANKED`] when it has no record yet.
    pub fn rank_of(&self, id: &str) -> u32 {
        match self.records.get(id) {
            Some(record) if record.rank > 0 => record.rank,
            _ => UNRANKED,
        }
    }

    pub(crate) fn set_order(&mut self, order: Vec<String>) {
        debug_assert_eq!(order.len(), self.order.len());
        self.order = order;
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut StatRecord> {
        self.records.get_mut(id)
    }
}
