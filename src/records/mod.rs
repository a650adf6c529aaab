//! CSV persistence: roster, round files and standings tables.

mod errors;
pub mod repository;
pub mod roster_file;
pub mod round_file;
pub mod stats_file;

pub use errors::RecordsError;
pub use repository::CsvTournamentRepository;
pub use roster_file::load_roster;
pub use round_file::{list_round_files, read_round, round_file_name, write_round};
pub use stats_file::write_standings;
