//! Pure round simulation logic for Barback.
//!
//! This crate contains the whole bartending-round engine, independent of any
//! UI or runtime. Functions take plain data and return results, making them
//! unit-testable and usable from any view layer or from the headless
//! harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`drinks`] | Categories, ice classes, and the fixed 7-drink catalog |
//! | [`physics`] | Temperature drift, ice dilution, per-drink penalties |
//! | [`queue`] | Category priority, suggested order, back-to-back simulation |
//! | [`round`] | Round snapshots and the `(state, action) → state` transition |
//! | [`scoring`] | Window and ordering deductions, final 0–100 score |

pub mod drinks;
pub mod physics;
pub mod queue;
pub mod round;
pub mod scoring;
