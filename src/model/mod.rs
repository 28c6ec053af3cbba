pub mod athlete;
pub mod event;
pub mod leaderboard;
pub mod metrics;
pub mod placement;

pub use athlete::{AthleteRecord, Division, EventScore};
pub use event::{Day, EventId, EventMetadata, EventTable};
pub use leaderboard::{LeaderboardRow, LeaderboardTable};
pub use metrics::{
    ClutchScore, ConsistencyScore, SpecializationRow, SpecializationSummary, TrendRow, TrendTotal,
    VersatilityScore,
};
pub use placement::{PlacementEntry, UnpivotedRow};
