//! Round scoring — window spread, queue-order inversions, per-drink penalties.
//!
//! A round starts at 100 points. The two round-level deductions appear in
//! the breakdown; per-drink penalties are already itemized on each
//! [`FinishedDrink`] and are only summed here.

use serde::{Deserialize, Serialize};

use crate::drinks::Category;
use crate::round::FinishedDrink;

/// Scoring weights.
pub mod constants {
    pub const BASE_SCORE: f64 = 100.0;
    /// Finish windows up to this many seconds are free.
    pub const WINDOW_GRACE_SECONDS: f64 = 60.0;
    /// Points per second of window beyond the grace period.
    pub const WINDOW_PENALTY_PER_SECOND: f64 = 0.2;
    /// Points per category pair out of recommended order.
    pub const INVERSION_PENALTY: f64 = 6.0;
}

pub const WINDOW_PENALTY: &str = "window penalty";
pub const ORDERING_PENALTY: &str = "ordering penalty";

/// Degradation-aware finishing order: the drink that warms with no
/// protection first, the ice-held drink next, the sub-zero drink last.
pub const RECOMMENDED_ORDER: [Category; 3] = [
    Category::NonChilled,
    Category::OnTheRocks,
    Category::StraightUp,
];

/// A named point deduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Penalty {
    pub label: String,
    pub points: f64,
}

impl Penalty {
    pub fn new(label: impl Into<String>, points: f64) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }
}

/// Final score plus round-level deductions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundScore {
    /// Clamped to [0, 100].
    pub score: f64,
    pub breakdown: Vec<Penalty>,
}

/// Sum of penalty points.
pub fn total_penalty_points(penalties: &[Penalty]) -> f64 {
    penalties.iter().map(|p| p.points).sum()
}

/// Spread between the earliest and latest finish times. Zero for fewer
/// than two drinks.
pub fn window_seconds(finished: &[FinishedDrink]) -> f64 {
    if finished.len() < 2 {
        return 0.0;
    }
    let (min, max) = finished
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), f| {
            (lo.min(f.finished_at), hi.max(f.finished_at))
        });
    max - min
}

fn recommended_rank(category: Category) -> usize {
    match category {
        Category::NonChilled => 0,
        Category::OnTheRocks => 1,
        Category::StraightUp => 2,
    }
}

/// Count category pairs whose relative order in `queue` disagrees with
/// [`RECOMMENDED_ORDER`].
pub fn count_inversions(queue: &[Category]) -> usize {
    let mut inversions = 0;
    for (i, &a) in queue.iter().enumerate() {
        for &b in &queue[i + 1..] {
            if recommended_rank(a) > recommended_rank(b) {
                inversions += 1;
            }
        }
    }
    inversions
}

/// Score a completed round.
///
/// - `finished`: the round timeline (per-drink penalties are deducted)
/// - `window_seconds`: finish-time spread, see [`window_seconds`]
/// - `chosen_queue`: the category priority the player picked
pub fn score_round(
    finished: &[FinishedDrink],
    window_seconds: f64,
    chosen_queue: &[Category],
) -> RoundScore {
    use constants::*;

    let mut breakdown = Vec::new();

    if window_seconds > WINDOW_GRACE_SECONDS {
        breakdown.push(Penalty::new(
            WINDOW_PENALTY,
            (window_seconds - WINDOW_GRACE_SECONDS) * WINDOW_PENALTY_PER_SECOND,
        ));
    }

    let inversions = count_inversions(chosen_queue);
    if inversions > 0 {
        breakdown.push(Penalty::new(
            ORDERING_PENALTY,
            inversions as f64 * INVERSION_PENALTY,
        ));
    }

    let drink_points: f64 = finished
        .iter()
        .map(|f| total_penalty_points(&f.penalties))
        .sum();

    let score = BASE_SCORE - total_penalty_points(&breakdown) - drink_points;

    RoundScore {
        score: score.clamp(0.0, BASE_SCORE),
        breakdown,
    }
}
