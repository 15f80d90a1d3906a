//! Barback Headless Round Harness
//!
//! Validates the round engine without any UI.
//! Runs entirely in-process — no I/O besides stdout.
//!
//! Usage:
//!   cargo run -p barback-simtest
//!   cargo run -p barback-simtest -- --verbose
//!   cargo run -p barback-simtest -- --json

use barback_logic::drinks::{generate_orders, Category, IceSurface};
use barback_logic::physics::{self, constants as phys};
use barback_logic::queue::{self, QueueError};
use barback_logic::round::{self, Action, RoundMode, RoundState};
use barback_logic::scoring::{self, ORDERING_PENALTY, RECOMMENDED_ORDER, WINDOW_PENALTY};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

// ── Logging ─────────────────────────────────────────────────────────────

/// Default filter when `RUST_LOG` is unset: engine debug lines with
/// `--verbose`, warnings only otherwise.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "barback_logic=debug,info"
    } else {
        "warn"
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

/// One row of the queue sweep, printed with `--verbose`.
#[derive(Debug, Serialize)]
struct SweepRow {
    queue: Vec<Category>,
    inversions: usize,
    score: f64,
    window_seconds: f64,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let json = args.iter().any(|a| a == "--json");

    if json {
        let result = round::play_sequential(&RECOMMENDED_ORDER);
        match serde_json::to_string_pretty(&result) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("failed to serialize round result: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    init_tracing(verbose);
    println!("=== Barback Round Harness ===\n");

    let mut results = Vec::new();

    // 1. Catalog
    results.extend(validate_catalog(verbose));

    // 2. Physical model
    results.extend(validate_physics(verbose));

    // 3. Queue builder
    results.extend(validate_queue_builder(verbose));

    // 4. Scoring
    results.extend(validate_scoring(verbose));

    // 5. Round state machine
    results.extend(validate_round_modes(verbose));

    // 6. Queue sweep
    results.extend(validate_queue_sweep(verbose));

    // 7. Random free-choice plays
    results.extend(validate_random_plays(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn all_queues() -> Vec<Vec<Category>> {
    let mut queues = Vec::new();
    for &a in &Category::ALL {
        for &b in &Category::ALL {
            for &c in &Category::ALL {
                if a != b && b != c && a != c {
                    queues.push(vec![a, b, c]);
                }
            }
        }
    }
    queues
}

// ── 1. Catalog ──────────────────────────────────────────────────────────

fn validate_catalog(verbose: bool) -> Vec<TestResult> {
    println!("--- Catalog ---");
    let mut results = Vec::new();
    let orders = generate_orders();

    results.push(TestResult {
        name: "catalog_size".into(),
        passed: orders.len() == 7,
        detail: format!("{} drinks", orders.len()),
    });

    let missing: Vec<_> = Category::ALL
        .iter()
        .filter(|c| !orders.iter().any(|d| d.category == **c))
        .map(|c| c.name())
        .collect();
    results.push(TestResult {
        name: "catalog_spans_categories".into(),
        passed: missing.is_empty(),
        detail: if missing.is_empty() {
            "all three categories present".into()
        } else {
            format!("missing: {}", missing.join(", "))
        },
    });

    let ice_classes: Vec<_> = orders.iter().filter_map(|d| d.ice_surface).collect();
    let all_ice = IceSurface::ALL.iter().all(|i| ice_classes.contains(i));
    results.push(TestResult {
        name: "catalog_ice_classes".into(),
        passed: all_ice && ice_classes.len() == 3,
        detail: format!("{:?}", ice_classes),
    });

    results.push(TestResult {
        name: "catalog_deterministic".into(),
        passed: generate_orders() == orders,
        detail: "two calls yield identical catalogs".into(),
    });

    if verbose {
        for d in &orders {
            println!(
                "  {:14} {:13} {:>4.0}s {:>5.1}°C",
                d.id,
                d.category.label(),
                d.finish_seconds,
                d.start_temp
            );
        }
    }

    results
}

// ── 2. Physical Model ───────────────────────────────────────────────────

fn validate_physics(_verbose: bool) -> Vec<TestResult> {
    println!("--- Physical Model ---");
    let mut results = Vec::new();

    let t0 = physics::temp_at(0.0, -4.0, phys::AMBIENT_TEMP, 120.0);
    results.push(TestResult {
        name: "temp_zero_wait".into(),
        passed: t0 == -4.0,
        detail: format!("temp_at(0) = {:.3}", t0),
    });

    let t120 = physics::temp_at(120.0, -4.0, phys::AMBIENT_TEMP, 120.0);
    results.push(TestResult {
        name: "temp_one_time_constant".into(),
        passed: (t120 - 12.43).abs() < 0.01,
        detail: format!("temp_at(120, -4, 22, 120) = {:.3}", t120),
    });

    let mut monotone = true;
    let mut prev = t0;
    for step in 1..=600 {
        let t = physics::temp_at(step as f64, -4.0, phys::AMBIENT_TEMP, 120.0);
        if t < prev || t > phys::AMBIENT_TEMP {
            monotone = false;
        }
        prev = t;
    }
    results.push(TestResult {
        name: "temp_monotone_sweep".into(),
        passed: monotone,
        detail: "600 one-second steps warm toward ambient".into(),
    });

    let mut in_range = true;
    for ice in IceSurface::ALL {
        for wait in -10..=400 {
            let d = physics::dilution_at(wait as f64, ice);
            if !(0.0..=phys::MAX_DILUTION).contains(&d) {
                in_range = false;
            }
        }
    }
    results.push(TestResult {
        name: "dilution_bounded".into(),
        passed: in_range,
        detail: "all waits -10..400s within [0, 0.6]".into(),
    });

    let nan_wait = physics::dilution_at(f64::NAN, IceSurface::Crushed);
    results.push(TestResult {
        name: "dilution_nan_wait".into(),
        passed: nan_wait == 0.0,
        detail: format!("dilution_at(NaN, crushed) = {}", nan_wait),
    });

    let d60 = physics::dilution_at(60.0, IceSurface::Standard);
    results.push(TestResult {
        name: "dilution_standard_60s".into(),
        passed: (d60 - 0.33).abs() < 1e-12,
        detail: format!("dilution_at(60, standard) = {:.4}", d60),
    });

    let large = physics::dilution_at(30.0, IceSurface::Large);
    let crushed = physics::dilution_at(30.0, IceSurface::Crushed);
    results.push(TestResult {
        name: "dilution_large_slower".into(),
        passed: large < crushed,
        detail: format!("30s: large={:.3} crushed={:.3}", large, crushed),
    });

    results
}

// ── 3. Queue Builder ────────────────────────────────────────────────────

fn validate_queue_builder(verbose: bool) -> Vec<TestResult> {
    println!("--- Queue Builder ---");
    let mut results = Vec::new();

    let errors = queue::validate_queue(&[Category::OnTheRocks, Category::OnTheRocks]);
    results.push(TestResult {
        name: "queue_rejects_duplicates".into(),
        passed: errors.contains(&QueueError::Duplicate(Category::OnTheRocks))
            && errors.contains(&QueueError::WrongLength(2)),
        detail: format!("{:?}", errors),
    });

    let valid = all_queues()
        .iter()
        .all(|q| queue::validate_queue(q).is_empty());
    results.push(TestResult {
        name: "queue_permutations_valid".into(),
        passed: valid,
        detail: "all 6 permutations accepted".into(),
    });

    let preview = queue::preview(&RECOMMENDED_ORDER);
    let tiers_ok = preview.windows(2).all(|w| {
        let pa = queue::priority_of(w[0].category, &RECOMMENDED_ORDER);
        let pb = queue::priority_of(w[1].category, &RECOMMENDED_ORDER);
        pa < pb || (pa == pb && w[0].finish_seconds <= w[1].finish_seconds)
    });
    results.push(TestResult {
        name: "preview_sorted".into(),
        passed: tiers_ok,
        detail: "category tier, then shortest finish first".into(),
    });

    let sim = queue::simulate_finish(&preview);
    let expected_total: f64 = preview.iter().map(|d| d.finish_seconds).sum();
    results.push(TestResult {
        name: "simulate_total_seconds".into(),
        passed: (sim.total_seconds - expected_total).abs() < 1e-9,
        detail: format!("total {:.0}s, window {:.0}s", sim.total_seconds, sim.window_seconds),
    });

    if verbose {
        for f in &sim.finished {
            println!(
                "  {:14} wait {:>4.0}s done {:>4.0}s {:>6.2}°C {}",
                f.drink.id,
                f.wait_seconds,
                f.finished_at,
                f.temperature,
                f.dilution
                    .map(|d| format!("dilution {:.3}", d))
                    .unwrap_or_default()
            );
        }
    }

    results
}

// ── 4. Scoring ──────────────────────────────────────────────────────────

fn validate_scoring(_verbose: bool) -> Vec<TestResult> {
    println!("--- Scoring ---");
    let mut results = Vec::new();

    let at_boundary = scoring::score_round(&[], 60.0, &RECOMMENDED_ORDER);
    results.push(TestResult {
        name: "window_boundary_exclusive".into(),
        passed: at_boundary
            .breakdown
            .iter()
            .all(|p| p.label != WINDOW_PENALTY),
        detail: "window = 60s adds no entry".into(),
    });

    let reversed = [
        Category::StraightUp,
        Category::OnTheRocks,
        Category::NonChilled,
    ];
    let worst = scoring::score_round(&[], 10_000.0, &reversed);
    results.push(TestResult {
        name: "score_clamped".into(),
        passed: worst.score == 0.0,
        detail: format!("extreme window → {:.1}", worst.score),
    });

    let mut iff_ok = true;
    for q in all_queues() {
        let scored = scoring::score_round(&[], 0.0, &q);
        let has_entry = scored.breakdown.iter().any(|p| p.label == ORDERING_PENALTY);
        if has_entry != (scoring::count_inversions(&q) > 0) {
            iff_ok = false;
        }
    }
    results.push(TestResult {
        name: "ordering_penalty_iff_inversions".into(),
        passed: iff_ok,
        detail: "entry present exactly when inversions > 0".into(),
    });

    results
}

// ── 5. Round Modes ──────────────────────────────────────────────────────

fn validate_round_modes(_verbose: bool) -> Vec<TestResult> {
    println!("--- Round Modes ---");
    let mut results = Vec::new();

    let start = RoundState::start(&RECOMMENDED_ORDER, RoundMode::Sequential);
    let last_id = start
        .suggested_order()
        .last()
        .map(|d| d.id.clone())
        .unwrap_or_default();
    let after = start.apply(&Action::Finish(last_id.clone()));
    results.push(TestResult {
        name: "sequential_rejects_skip".into(),
        passed: after == start,
        detail: format!("picking '{}' first is a no-op", last_id),
    });

    let free = RoundState::start(&RECOMMENDED_ORDER, RoundMode::FreeChoice);
    let after = free.apply(&Action::Finish(last_id.clone()));
    results.push(TestResult {
        name: "free_choice_accepts_skip".into(),
        passed: after.timeline().len() == 1,
        detail: format!("picking '{}' first finishes it", last_id),
    });

    let unknown = free.apply(&Action::Finish("cosmopolitan".into()));
    results.push(TestResult {
        name: "unknown_id_noop".into(),
        passed: unknown == free,
        detail: "unknown drink id leaves state unchanged".into(),
    });

    let reset = after.apply(&Action::Reset);
    results.push(TestResult {
        name: "reset_restores_round".into(),
        passed: reset == free,
        detail: "reset returns a fresh round".into(),
    });

    let played = round::play_sequential(&RECOMMENDED_ORDER);
    let sim = queue::simulate_finish(&queue::preview(&RECOMMENDED_ORDER));
    results.push(TestResult {
        name: "sequential_matches_simulation".into(),
        passed: played.timeline == sim.finished,
        detail: format!("score {:.2}", played.score),
    });

    results
}

// ── 6. Queue Sweep ──────────────────────────────────────────────────────

fn validate_queue_sweep(verbose: bool) -> Vec<TestResult> {
    println!("--- Queue Sweep ---");
    let mut results = Vec::new();

    let rows: Vec<SweepRow> = all_queues()
        .into_iter()
        .map(|q| {
            let result = round::play_sequential(&q);
            SweepRow {
                inversions: scoring::count_inversions(&q),
                score: result.score,
                window_seconds: result.window_seconds,
                queue: q,
            }
        })
        .collect();

    let in_range = rows.iter().all(|r| (0.0..=100.0).contains(&r.score));
    results.push(TestResult {
        name: "sweep_scores_in_range".into(),
        passed: in_range,
        detail: format!("{} queues scored", rows.len()),
    });

    let best = rows
        .iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|r| r.queue.clone())
        .unwrap_or_default();
    results.push(TestResult {
        name: "sweep_recommended_best".into(),
        passed: best == RECOMMENDED_ORDER,
        detail: format!("best queue {:?}", best),
    });

    if verbose {
        for row in &rows {
            match serde_json::to_string(row) {
                Ok(s) => println!("  {}", s),
                Err(e) => tracing::warn!("could not serialize sweep row: {}", e),
            }
        }
    }

    results
}

// ── 7. Random Free-Choice Plays ─────────────────────────────────────────

fn validate_random_plays(verbose: bool) -> Vec<TestResult> {
    println!("--- Random Free-Choice Plays ---");
    let mut results = Vec::new();

    let plays = 200;
    let mut completed = 0;
    let mut clocks_monotone = true;
    let mut scores_in_range = true;
    let mut min_score = f64::INFINITY;
    let mut max_score = f64::NEG_INFINITY;

    for seed in 0..plays {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = RoundState::start(&RECOMMENDED_ORDER, RoundMode::FreeChoice);
        while !state.is_complete() {
            let Some(pick) = state.remaining().choose(&mut rng).map(|d| d.id.clone()) else {
                break;
            };
            let next = state.apply(&Action::Finish(pick));
            if next.clock() < state.clock() {
                clocks_monotone = false;
            }
            state = next;
        }
        if let Some(result) = state.result() {
            completed += 1;
            if !(0.0..=100.0).contains(&result.score) {
                scores_in_range = false;
            }
            min_score = min_score.min(result.score);
            max_score = max_score.max(result.score);
        }
    }

    results.push(TestResult {
        name: "random_plays_complete".into(),
        passed: completed == plays,
        detail: format!("{}/{} rounds completed", completed, plays),
    });
    results.push(TestResult {
        name: "random_plays_clock_monotone".into(),
        passed: clocks_monotone,
        detail: "clock never decreased".into(),
    });
    results.push(TestResult {
        name: "random_plays_scores_in_range".into(),
        passed: scores_in_range,
        detail: format!("scores {:.1}..{:.1}", min_score, max_score),
    });

    if verbose {
        println!(
            "  {} random rounds, score range {:.1}..{:.1}",
            plays, min_score, max_score
        );
    }

    results
}
