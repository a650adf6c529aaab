use std::fs;
use std::path::Path;
use tracing::info;

use crate::shared::format_stat_value;
use crate::stats::StatTable;

use super::RecordsError;

/// Rewrites a standings file: `key_column` followed by every statistic, one
/// row per entity in rank order.
pub fn write_standings(
    path: &Path,
    key_column: &str,
    standings: &StatTable,
    statistics: &[String],
) -> Result<(), RecordsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(RecordsError::io(parent))?;
    }

    let mut writer = csv::Writer::from_path(path).map_err(RecordsError::csv(path))?;
    let header = std::iter::once(key_column).chain(statistics.iter().map(String::as_str));
    writer.write_record(header).map_err(RecordsError::csv(path))?;

    for (id, record) in standings.iter() {
        let row = std::iter::once(id.to_string())
            .chain(statistics.iter().map(|stat| format_stat_value(record.get(stat))));
        writer.write_record(row).map_err(RecordsError::csv(path))?;
    }
    writer.flush().map_err(RecordsError::io(path))?;

    info!(path = %path.display(), rows = standings.len(), "Standings saved");
    Ok(())
}
