use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeaderboardError {
    #[error("Invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    #[error("Invalid event id: {0}")]
    InvalidEventId(String),

    #[error("Invalid division: {0}")]
    InvalidDivision(String),

    #[error("Event metadata error: {0}")]
    EventMetadata(String),

    #[error("Leaderboard table error: {0}")]
    Table(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, LeaderboardError>;
