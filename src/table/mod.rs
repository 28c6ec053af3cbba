pub mod reader;
pub mod writer;

pub use reader::{read_leaderboard_csv, read_leaderboard_csv_file};
pub use writer::{
    ensure_dir, ensure_parent_dir, write_events_file, write_leaderboard_csv,
    write_leaderboard_file, write_rows_file, CsvRow,
};
