//! Finish queue — category priority, suggested serving order, and
//! back-to-back simulation of a whole round.
//!
//! The queue is the player's chosen category priority. It only breaks ties
//! for the suggested order; in free-choice rounds the player may ignore it.
//!
//! ```
//! use barback_logic::drinks::Category;
//! use barback_logic::queue::{preview, simulate_finish, validate_queue};
//!
//! let queue = [Category::NonChilled, Category::OnTheRocks, Category::StraightUp];
//! assert!(validate_queue(&queue).is_empty());
//! let sim = simulate_finish(&preview(&queue));
//! assert_eq!(sim.finished.len(), 7);
//! ```

use serde::{Deserialize, Serialize};

use crate::drinks::{generate_orders, Category, Drink};
use crate::round::FinishedDrink;
use crate::scoring::window_seconds;

/// Number of categories a startable queue must hold.
pub const QUEUE_LEN: usize = 3;

/// Priority given to categories missing from the queue.
const UNQUEUED_PRIORITY: usize = 99;

/// Queue validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// Queue must name every category exactly once.
    WrongLength(usize),
    /// Category listed more than once.
    Duplicate(Category),
}

/// Check whether a queue can start a round, returning all errors found.
pub fn validate_queue(queue: &[Category]) -> Vec<QueueError> {
    let mut errors = Vec::new();

    if queue.len() != QUEUE_LEN {
        errors.push(QueueError::WrongLength(queue.len()));
    }

    for (i, category) in queue.iter().enumerate() {
        let first_seen = queue.iter().position(|c| c == category) == Some(i);
        let repeated = queue[i + 1..].contains(category);
        if first_seen && repeated {
            errors.push(QueueError::Duplicate(*category));
        }
    }

    errors
}

/// Sort position of a category within the queue.
pub fn priority_of(category: Category, queue: &[Category]) -> usize {
    queue
        .iter()
        .position(|&c| c == category)
        .unwrap_or(UNQUEUED_PRIORITY)
}

/// Suggested serving order: queue priority first, then shortest finish
/// time. Stable, so ties keep their input order.
pub fn sort_by_finish_queue(drinks: &[Drink], queue: &[Category]) -> Vec<Drink> {
    let mut sorted = drinks.to_vec();
    sorted.sort_by(|a, b| {
        priority_of(a.category, queue)
            .cmp(&priority_of(b.category, queue))
            .then(a.finish_seconds.total_cmp(&b.finish_seconds))
    });
    sorted
}

/// Suggested order for a fresh round.
pub fn preview(queue: &[Category]) -> Vec<Drink> {
    sort_by_finish_queue(&generate_orders(), queue)
}

/// Outcome of finishing drinks back-to-back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub finished: Vec<FinishedDrink>,
    pub total_seconds: f64,
    pub window_seconds: f64,
}

/// Finish `drinks_in_order` one after another from a clock of zero.
///
/// Each drink waits until the previous one is done, then takes its own
/// finish time.
pub fn simulate_finish(drinks_in_order: &[Drink]) -> Simulation {
    let mut clock = 0.0;
    let mut finished = Vec::with_capacity(drinks_in_order.len());

    for drink in drinks_in_order {
        let wait = clock;
        clock += drink.finish_seconds;
        finished.push(FinishedDrink::evaluate(drink.clone(), wait, clock));
    }

    let window = window_seconds(&finished);
    Simulation {
        finished,
        total_seconds: clock,
        window_seconds: window,
    }
}
