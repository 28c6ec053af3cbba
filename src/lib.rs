pub mod config;
pub mod error;
pub mod events;
pub mod html;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod reshape;
pub mod table;
pub mod xlsx;

pub use config::{AnalysisConfig, ChartStyle, LeaderboardSelectors};
pub use error::{LeaderboardError, Result};
pub use model::*;
