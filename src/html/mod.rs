pub mod extractor;
pub mod score;

pub use extractor::{
    extract_leaderboard, extract_rows, read_leaderboard_file, ExtractionSummary, LeaderboardPage,
    RowOutcome,
};
pub use score::{decompose, decompose_record};
