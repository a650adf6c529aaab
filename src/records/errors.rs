use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::roster::RosterError;

#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("{path} has no {column} column")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Invalid score {value:?} in {path}, line {line}")]
    InvalidScore {
        path: PathBuf,
        line: u64,
        value: String,
    },

    #[error("Invalid roster: {0}")]
    Roster(#[from] RosterError),

    #[error("Record store lock poisoned")]
    Poisoned,
}

impl RecordsError {
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| RecordsError::Io { path, source }
    }

    pub(crate) fn csv(path: &Path) -> impl FnOnce(csv::Error) -> Self {
        let path = path.to_path_buf();
        move |source| RecordsError::Csv { path, source }
    }
}
