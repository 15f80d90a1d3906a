//! Temperature drift and ice dilution while a drink waits.
//!
//! Straight-up and non-chilled drinks relax exponentially toward room
//! temperature (Newton cooling with a fixed time constant per category).
//! On-the-rocks drinks are held cold by their ice, which melts linearly
//! at a rate set by its surface class.

use serde::{Deserialize, Serialize};

use crate::drinks::{Category, Drink, IceSurface};
use crate::scoring::Penalty;

/// Fixed physical constants.
pub mod constants {
    /// Room temperature in Celsius.
    pub const AMBIENT_TEMP: f64 = 22.0;
    /// Warming time constant for straight-up drinks (seconds).
    pub const STRAIGHT_UP_TIME_CONSTANT: f64 = 120.0;
    /// Warming time constant for non-chilled drinks (seconds).
    pub const NON_CHILLED_TIME_CONSTANT: f64 = 240.0;

    /// Straight-up drinks above this are penalized.
    pub const STRAIGHT_UP_MAX_TEMP: f64 = 0.0;
    /// Points per 10°C above freezing.
    pub const STRAIGHT_UP_PENALTY_PER_10C: f64 = 12.0;

    /// Non-chilled drinks above this are penalized.
    pub const NON_CHILLED_MAX_TEMP: f64 = 12.0;
    /// Penalty baseline; points accrue on degrees above this.
    pub const NON_CHILLED_PENALTY_BASE: f64 = 10.0;
    pub const NON_CHILLED_PENALTY_PER_DEGREE: f64 = 2.0;

    /// Dilution never exceeds this fraction.
    pub const MAX_DILUTION: f64 = 0.6;
    /// Target dilution when a drink does not specify one.
    pub const DEFAULT_IDEAL_DILUTION: f64 = 0.33;
    /// Points per unit of dilution error.
    pub const DILUTION_PENALTY_SCALE: f64 = 80.0;
}

pub const WARM_STRAIGHT_DRINK: &str = "warm straight drink";
pub const DILUTION_OFF_TARGET: &str = "dilution off target";
pub const LOST_CHILL: &str = "lost chill on unchilled drink";

/// Temperature after `wait_seconds` of exponential relaxation toward `ambient`.
///
/// Negative waits are treated as zero.
pub fn temp_at(wait_seconds: f64, start_temp: f64, ambient: f64, time_constant: f64) -> f64 {
    let wait = wait_seconds.max(0.0);
    ambient + (start_temp - ambient) * (-wait / time_constant).exp()
}

/// Dilution fraction after `wait_seconds` on the given ice, clamped to [0, 0.6].
///
/// Negative and NaN waits are treated as zero.
pub fn dilution_at(wait_seconds: f64, ice: IceSurface) -> f64 {
    (wait_seconds.max(0.0) * ice.dilution_rate()).min(constants::MAX_DILUTION)
}

/// Physical state of a drink at the moment it is finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkReading {
    /// Serving temperature in Celsius.
    pub temperature: f64,
    /// Dilution fraction (on-the-rocks only).
    pub dilution: Option<f64>,
    pub penalties: Vec<Penalty>,
}

/// Evaluate a drink that waited `wait_seconds` before being finished.
pub fn evaluate_drink(drink: &Drink, wait_seconds: f64) -> DrinkReading {
    use constants::*;

    match drink.category {
        Category::StraightUp => {
            let temperature = temp_at(
                wait_seconds,
                drink.start_temp,
                AMBIENT_TEMP,
                STRAIGHT_UP_TIME_CONSTANT,
            );
            let mut penalties = Vec::new();
            if temperature > STRAIGHT_UP_MAX_TEMP {
                penalties.push(Penalty::new(
                    WARM_STRAIGHT_DRINK,
                    temperature / 10.0 * STRAIGHT_UP_PENALTY_PER_10C,
                ));
            }
            DrinkReading {
                temperature,
                dilution: None,
                penalties,
            }
        }
        Category::OnTheRocks => {
            let ice = drink.ice_surface.unwrap_or_default();
            let ideal = drink.ideal_dilution.unwrap_or(DEFAULT_IDEAL_DILUTION);
            let dilution = dilution_at(wait_seconds, ice);
            // Ice holds the temperature; only dilution is scored.
            DrinkReading {
                temperature: drink.start_temp,
                dilution: Some(dilution),
                penalties: vec![Penalty::new(
                    DILUTION_OFF_TARGET,
                    (dilution - ideal).abs() * DILUTION_PENALTY_SCALE,
                )],
            }
        }
        Category::NonChilled => {
            let temperature = temp_at(
                wait_seconds,
                drink.start_temp,
                AMBIENT_TEMP,
                NON_CHILLED_TIME_CONSTANT,
            );
            let mut penalties = Vec::new();
            if temperature > NON_CHILLED_MAX_TEMP {
                penalties.push(Penalty::new(
                    LOST_CHILL,
                    (temperature - NON_CHILLED_PENALTY_BASE) * NON_CHILLED_PENALTY_PER_DEGREE,
                ));
            }
            DrinkReading {
                temperature,
                dilution: None,
                penalties,
            }
        }
    }
}
