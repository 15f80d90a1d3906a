//! Integration tests for a full round.
//!
//! Exercises: queue → preview → RoundState transitions → RoundResult,
//! and checks the round state machine against the back-to-back simulation.
//!
//! All tests are pure logic — no UI, no I/O.

use barback_logic::drinks::{find_drink, generate_orders, Category, Drink, IceSurface};
use barback_logic::physics::{dilution_at, evaluate_drink, temp_at};
use barback_logic::queue::{preview, simulate_finish, validate_queue};
use barback_logic::round::{play_sequential, Action, RoundMode, RoundState};
use barback_logic::scoring::{
    count_inversions, score_round, window_seconds, ORDERING_PENALTY, RECOMMENDED_ORDER,
    WINDOW_PENALTY,
};

// ── Helpers ────────────────────────────────────────────────────────────

fn all_queues() -> Vec<[Category; 3]> {
    use Category::*;
    vec![
        [NonChilled, OnTheRocks, StraightUp],
        [NonChilled, StraightUp, OnTheRocks],
        [OnTheRocks, NonChilled, StraightUp],
        [OnTheRocks, StraightUp, NonChilled],
        [StraightUp, NonChilled, OnTheRocks],
        [StraightUp, OnTheRocks, NonChilled],
    ]
}

fn play(queue: &[Category], mode: RoundMode, picks: &[&str]) -> RoundState {
    picks
        .iter()
        .fold(RoundState::start(queue, mode), |state, id| {
            state.apply(&Action::Finish((*id).to_string()))
        })
}

// ── Round flow ─────────────────────────────────────────────────────────

#[test]
fn every_valid_queue_completes_in_range() {
    for queue in all_queues() {
        assert!(validate_queue(&queue).is_empty());
        let result = play_sequential(&queue);
        assert_eq!(result.timeline.len(), 7);
        assert!((0.0..=100.0).contains(&result.score), "{queue:?}");
        assert_eq!(result.total_seconds, 81.0);
    }
}

#[test]
fn recommended_queue_scores_best() {
    let best = play_sequential(&RECOMMENDED_ORDER).score;
    for queue in all_queues() {
        assert!(play_sequential(&queue).score <= best + 1e-9, "{queue:?}");
    }
}

#[test]
fn recommended_queue_has_no_ordering_entry() {
    let result = play_sequential(&RECOMMENDED_ORDER);
    assert!(result.breakdown.iter().all(|p| p.label != ORDERING_PENALTY));
}

#[test]
fn ordering_entry_tracks_inversions() {
    for queue in all_queues() {
        let result = play_sequential(&queue);
        let points: f64 = result
            .breakdown
            .iter()
            .filter(|p| p.label == ORDERING_PENALTY)
            .map(|p| p.points)
            .sum();
        assert!((points - count_inversions(&queue) as f64 * 6.0).abs() < 1e-9);
    }
}

#[test]
fn sequential_round_equals_simulation() {
    for queue in all_queues() {
        let result = play_sequential(&queue);
        let sim = simulate_finish(&preview(&queue));
        let scored = score_round(&sim.finished, sim.window_seconds, &queue);
        assert_eq!(result.timeline, sim.finished);
        assert_eq!(result.score, scored.score);
        assert_eq!(result.breakdown, scored.breakdown);
    }
}

#[test]
fn free_choice_round_by_id() {
    let picks = [
        "lager",
        "white-wine",
        "negroni",
        "julep",
        "old-fashioned",
        "daiquiri",
        "martini",
    ];
    let state = play(&RECOMMENDED_ORDER, RoundMode::FreeChoice, &picks);
    assert!(state.is_complete());
    let order: Vec<&str> = state.timeline().iter().map(|f| f.drink.id.as_str()).collect();
    assert_eq!(order, picks);

    let result = state.result().unwrap();
    assert_eq!(result.total_seconds, 81.0);
    assert_eq!(result.window_seconds, window_seconds(state.timeline()));
}

#[test]
fn sequential_mode_ignores_free_picks() {
    // Martini is last in the recommended order; picking it first does nothing.
    let state = play(&RECOMMENDED_ORDER, RoundMode::Sequential, &["martini", "white-wine"]);
    assert_eq!(state.timeline().len(), 1);
    assert_eq!(state.timeline()[0].drink.id, "white-wine");
}

#[test]
fn per_drink_values_reported_after_each_finish() {
    let state = RoundState::start(&RECOMMENDED_ORDER, RoundMode::FreeChoice);
    let state = state.apply(&Action::Finish("negroni".into()));
    let negroni = state.last_finished().unwrap();
    assert_eq!(negroni.dilution, Some(0.0));
    assert_eq!(negroni.penalties.len(), 1);

    let state = state.apply(&Action::Finish("martini".into()));
    let martini = state.last_finished().unwrap();
    assert_eq!(martini.wait_seconds, 12.0);
    assert!(martini.dilution.is_none());
    assert!(martini.temperature < 0.0);
    assert!(martini.penalties.is_empty());
}

#[test]
fn clock_never_decreases() {
    let mut state = RoundState::start(&RECOMMENDED_ORDER, RoundMode::FreeChoice);
    let mut prev = state.clock();
    for id in ["julep", "nope", "martini", "julep", "lager"] {
        state = state.apply(&Action::Finish(id.into()));
        assert!(state.clock() >= prev);
        prev = state.clock();
    }
    assert_eq!(state.clock(), 14.0 + 14.0 + 8.0);
}

#[test]
fn reset_mid_round() {
    let state = play(&RECOMMENDED_ORDER, RoundMode::FreeChoice, &["lager", "martini"]);
    let fresh = state.apply(&Action::Reset);
    assert_eq!(fresh.clock(), 0.0);
    assert_eq!(fresh.remaining(), generate_orders().as_slice());
    assert!(fresh.timeline().is_empty());
    assert_eq!(fresh.mode(), RoundMode::FreeChoice);
}

// ── Reference scenarios ────────────────────────────────────────────────

#[test]
fn straight_up_one_time_constant() {
    let t = temp_at(120.0, -4.0, 22.0, 120.0);
    assert!((t - 12.43).abs() < 0.01);
    let martini = Drink {
        start_temp: -4.0,
        ..find_drink("martini").unwrap()
    };
    let reading = evaluate_drink(&martini, 120.0);
    assert!((reading.penalties[0].points - 14.9).abs() < 0.05);
}

#[test]
fn standard_ice_on_target_at_sixty_seconds() {
    assert!((dilution_at(60.0, IceSurface::Standard) - 0.33).abs() < 1e-12);
    let negroni = Drink {
        ideal_dilution: None,
        ..find_drink("negroni").unwrap()
    };
    let reading = evaluate_drink(&negroni, 60.0);
    assert!(reading.penalties[0].points.abs() < 1e-9);
}

fn catalog_with_durations(seconds: &[f64]) -> Vec<Drink> {
    preview(&RECOMMENDED_ORDER)
        .into_iter()
        .zip(seconds)
        .map(|(drink, &finish_seconds)| Drink {
            finish_seconds,
            ..drink
        })
        .collect()
}

#[test]
fn back_to_back_round_with_sixty_second_window() {
    // Seven 10s drinks finish at 10..70, a 60s spread.
    let drinks = catalog_with_durations(&[10.0; 7]);
    assert_eq!(drinks.len(), 7);
    let sim = simulate_finish(&drinks);
    assert_eq!(sim.window_seconds, 60.0);
    assert_eq!(sim.total_seconds, 70.0);

    let scored = score_round(&sim.finished, sim.window_seconds, &RECOMMENDED_ORDER);
    assert!(scored.breakdown.iter().all(|p| p.label != WINDOW_PENALTY));
    assert!(scored.breakdown.is_empty());
}

#[test]
fn back_to_back_round_just_over_window() {
    let drinks = catalog_with_durations(&[10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 11.0]);
    let sim = simulate_finish(&drinks);
    assert_eq!(sim.window_seconds, 61.0);

    let scored = score_round(&sim.finished, sim.window_seconds, &RECOMMENDED_ORDER);
    let window: Vec<_> = scored
        .breakdown
        .iter()
        .filter(|p| p.label == WINDOW_PENALTY)
        .collect();
    assert_eq!(window.len(), 1);
    assert!((window[0].points - 0.2).abs() < 1e-9);
}

#[test]
fn window_boundary_is_exclusive() {
    let at = score_round(&[], 60.0, &RECOMMENDED_ORDER);
    assert!(at.breakdown.iter().all(|p| p.label != WINDOW_PENALTY));
    let over = score_round(&[], 60.5, &RECOMMENDED_ORDER);
    assert!(over.breakdown.iter().any(|p| p.label == WINDOW_PENALTY));
}
