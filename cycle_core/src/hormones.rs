//! Illustrative hormone curves.
//!
//! These are presentation values for the per-day hormone display, shaped with
//! sinusoids over the normalized cycle position. They carry no physiological
//! accuracy.

use crate::HormoneLevels;
use std::f64::consts::PI;

/// Hormone levels for `current_day_of_cycle` in a cycle of `cycle_length` days
///
/// Estrogen and progesterone stay within `[0.1, 1.0]`, testosterone within
/// `[0.1, 0.5]`. A zero cycle length is treated as one day.
pub fn hormone_levels(current_day_of_cycle: u32, cycle_length: u32) -> HormoneLevels {
    let normalized_day = f64::from(current_day_of_cycle) / f64::from(cycle_length.max(1));

    let estrogen = ((normalized_day * PI * 2.0 - PI / 2.0).sin() * 0.45 + 0.55).clamp(0.1, 1.0);

    // Flat baseline until mid-cycle, then a single luteal hump
    let progesterone = if normalized_day > 0.5 && normalized_day <= 1.0 {
        ((normalized_day - 0.5) * PI).sin() * 0.8 + 0.1
    } else {
        0.1
    }
    .clamp(0.1, 1.0);

    let mid_cycle_boost = if normalized_day > 0.3 && normalized_day < 0.6 {
        0.2
    } else {
        0.0
    };
    let testosterone =
        (((normalized_day + 0.1) * PI * 2.0).sin() * 0.15 + 0.2 + mid_cycle_boost).clamp(0.1, 0.5);

    HormoneLevels {
        estrogen,
        progesterone,
        testosterone,
    }
}
