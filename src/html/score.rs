//! Per-event score decomposition: `"<rank>: <score> | (<delta>)"`

use crate::model::{AthleteRecord, EventScore, LeaderboardRow};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // A letter prefix on the rank ("T3" for a tie) is dropped. Group 2 is
    // greedy so the score runs up to the last pipe that is followed by a
    // parenthesised delta; group 3 runs to the last closing paren.
    static ref SCORE_PATTERN: Regex =
        Regex::new(r"^\s*[A-Za-z]*\s*(\d+)\s*:\s*(\S.*)\|\s*\((.+)\)\s*$").unwrap();
}

/// Split a raw score string into placement, score text and score delta.
///
/// Strings that don't match the pattern yield an all-absent score.
pub fn decompose(raw: &str) -> EventScore {
    let Some(caps) = SCORE_PATTERN.captures(raw) else {
        return EventScore::absent();
    };

    let placement = caps[1].parse::<u32>().ok();
    let score = caps[2].trim();
    let delta = caps[3].trim();

    match placement {
        Some(p) if !score.is_empty() && !delta.is_empty() => EventScore {
            placement: Some(p),
            score: Some(score.to_string()),
            delta: Some(delta.to_string()),
        },
        _ => EventScore::absent(),
    }
}

/// Replace each raw event string of a record with its decomposed fields
pub fn decompose_record(record: &AthleteRecord) -> LeaderboardRow {
    LeaderboardRow {
        rank: record.rank,
        athlete: record.name.clone(),
        points: record.points,
        division: record.division,
        events: record
            .events
            .iter()
            .map(|raw| raw.as_deref().map(decompose).unwrap_or_default())
            .collect(),
    }
}
