//! Participation point arithmetic.
//!
//! A registration earns `max_score * percent / 100` points, where `percent`
//! comes from the registration's evaluation (0 when unevaluated). Cancelled
//! registrations earn nothing and are left out of the breakdown entirely.
//! No rounding happens here; formatting is a presentation concern.

use serde::Serialize;

/// One registration as seen by the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub activity_name: String,
    pub max_score: i32,
    pub cancelled: bool,
    /// Evaluation percent, `None` when the registration was never rated.
    pub percent: Option<f64>,
}

/// Earned points for a single activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreLine {
    pub activity_name: String,
    pub max_score: i32,
    pub percent: f64,
    pub point: f64,
}

/// Per-student breakdown and total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreCard {
    pub lines: Vec<ScoreLine>,
    pub total: f64,
}

pub fn earned_points(max_score: i32, percent: f64) -> f64 {
    f64::from(max_score) * percent / 100.0
}

impl ScoreCard {
    pub fn tally<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ScoreEntry>,
    {
        let mut card = Self::default();
        for entry in entries.into_iter().filter(|e| !e.cancelled) {
            let percent = entry.percent.unwrap_or(0.0);
            let point = earned_points(entry.max_score, percent);
            card.total += point;
            card.lines.push(ScoreLine {
                activity_name: entry.activity_name,
                max_score: entry.max_score,
                percent,
                point,
            });
        }
        card
    }
}
