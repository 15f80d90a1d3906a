//! Round state machine — pure transitions over immutable snapshots.
//!
//! The caller owns a [`RoundState`] and replaces it with the value returned
//! by [`RoundState::apply`] after every player action. Nothing here mutates
//! shared state or reads a wall clock; the simulated clock only moves when a
//! drink is finished.
//!
//! ```
//! use barback_logic::round::{Action, RoundMode, RoundState};
//! use barback_logic::scoring::RECOMMENDED_ORDER;
//!
//! let mut state = RoundState::start(&RECOMMENDED_ORDER, RoundMode::FreeChoice);
//! state = state.apply(&Action::Finish("martini".into()));
//! assert_eq!(state.clock(), 14.0);
//! assert_eq!(state.remaining().len(), 6);
//! ```

use serde::{Deserialize, Serialize};

use crate::drinks::{generate_orders, Category, Drink};
use crate::physics::evaluate_drink;
use crate::queue::sort_by_finish_queue;
use crate::scoring::{score_round, window_seconds, Penalty};

/// A drink after it has been finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishedDrink {
    pub drink: Drink,
    /// Clock value when finishing began.
    pub wait_seconds: f64,
    /// Clock value when the drink was done.
    pub finished_at: f64,
    /// Serving temperature in Celsius.
    pub temperature: f64,
    /// Dilution fraction (on-the-rocks only).
    pub dilution: Option<f64>,
    pub penalties: Vec<Penalty>,
}

impl FinishedDrink {
    /// Evaluate `drink` after waiting `wait_seconds`, done at `finished_at`.
    pub fn evaluate(drink: Drink, wait_seconds: f64, finished_at: f64) -> Self {
        let reading = evaluate_drink(&drink, wait_seconds);
        Self {
            drink,
            wait_seconds,
            finished_at,
            temperature: reading.temperature,
            dilution: reading.dilution,
            penalties: reading.penalties,
        }
    }
}

/// How the player picks the next drink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundMode {
    /// Drinks are finished strictly in the suggested order.
    #[default]
    Sequential,
    /// Any remaining drink may be finished next.
    FreeChoice,
}

/// A player action against the current round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Finish the drink with this id.
    Finish(String),
    /// Finish whichever drink the queue suggests next.
    FinishNext,
    /// Abandon the round and start over with the same queue and mode.
    Reset,
}

/// Result of a completed round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Clamped to [0, 100].
    pub score: f64,
    pub total_seconds: f64,
    pub window_seconds: f64,
    /// Round-level deductions (window, ordering).
    pub breakdown: Vec<Penalty>,
    pub timeline: Vec<FinishedDrink>,
}

/// Snapshot of a round in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    queue: Vec<Category>,
    mode: RoundMode,
    clock: f64,
    remaining: Vec<Drink>,
    timeline: Vec<FinishedDrink>,
}

impl RoundState {
    /// Begin a round with the full catalog.
    ///
    /// The queue is taken as given; callers should check it with
    /// [`crate::queue::validate_queue`] first.
    pub fn start(queue: &[Category], mode: RoundMode) -> Self {
        Self {
            queue: queue.to_vec(),
            mode,
            clock: 0.0,
            remaining: generate_orders(),
            timeline: Vec::new(),
        }
    }

    pub fn queue(&self) -> &[Category] {
        &self.queue
    }

    pub fn mode(&self) -> RoundMode {
        self.mode
    }

    /// Simulated seconds since the round started.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Drinks not yet finished, in catalog order.
    pub fn remaining(&self) -> &[Drink] {
        &self.remaining
    }

    /// Finished drinks, oldest first.
    pub fn timeline(&self) -> &[FinishedDrink] {
        &self.timeline
    }

    pub fn last_finished(&self) -> Option<&FinishedDrink> {
        self.timeline.last()
    }

    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Remaining drinks in suggested serving order.
    pub fn suggested_order(&self) -> Vec<Drink> {
        sort_by_finish_queue(&self.remaining, &self.queue)
    }

    /// The drink the queue would serve next.
    pub fn next_suggested(&self) -> Option<Drink> {
        self.suggested_order().into_iter().next()
    }

    /// Apply an action, returning the next snapshot.
    ///
    /// Selections that cannot be honoured (unknown or already finished ids,
    /// out-of-order picks in a sequential round, anything after the round is
    /// complete) leave the state unchanged.
    pub fn apply(&self, action: &Action) -> RoundState {
        match action {
            Action::Reset => Self::start(&self.queue, self.mode),
            Action::FinishNext => match self.next_suggested() {
                Some(next) => self.finish(&next.id),
                None => self.clone(),
            },
            Action::Finish(id) => {
                if self.mode == RoundMode::Sequential {
                    let is_next = self.next_suggested().is_some_and(|d| &d.id == id);
                    if !is_next {
                        tracing::debug!("Ignoring out-of-order pick '{}' in sequential round", id);
                        return self.clone();
                    }
                }
                self.finish(id)
            }
        }
    }

    fn finish(&self, id: &str) -> RoundState {
        let Some(index) = self.remaining.iter().position(|d| d.id == id) else {
            tracing::debug!("Ignoring pick '{}': not among remaining drinks", id);
            return self.clone();
        };

        let mut next = self.clone();
        let drink = next.remaining.remove(index);
        let wait = next.clock;
        next.clock += drink.finish_seconds;
        let finished = FinishedDrink::evaluate(drink, wait, next.clock);

        tracing::debug!(
            "Finished {} at {:.0}s (waited {:.0}s, {:.1}°C, {} penalties)",
            finished.drink.id,
            finished.finished_at,
            finished.wait_seconds,
            finished.temperature,
            finished.penalties.len()
        );

        next.timeline.push(finished);

        if next.is_complete() && tracing::enabled!(tracing::Level::INFO) {
            let result = next.summarize();
            tracing::info!(
                "Round complete: score={:.1} total={:.0}s window={:.0}s",
                result.score,
                result.total_seconds,
                result.window_seconds
            );
        }

        next
    }

    /// Final result, once every drink has been finished.
    pub fn result(&self) -> Option<RoundResult> {
        if !self.is_complete() || self.timeline.is_empty() {
            return None;
        }
        Some(self.summarize())
    }

    fn summarize(&self) -> RoundResult {
        let window = window_seconds(&self.timeline);
        let scored = score_round(&self.timeline, window, &self.queue);
        RoundResult {
            score: scored.score,
            total_seconds: self.clock,
            window_seconds: window,
            breakdown: scored.breakdown,
            timeline: self.timeline.clone(),
        }
    }
}

/// Play a whole round in suggested order.
pub fn play_sequential(queue: &[Category]) -> RoundResult {
    let mut state = RoundState::start(queue, RoundMode::Sequential);
    while !state.is_complete() {
        state = state.apply(&Action::FinishNext);
    }
    state.summarize()
}
