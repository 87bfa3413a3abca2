//! Cycle projection engine.
//!
//! Turns a `CycleSettings` record into a calendar-dated phase timeline:
//! - Partition one cycle into menstrual, follicular, ovulatory and luteal segments
//! - Repeat the partition for a number of cycles starting at the last period
//! - Answer "which day/phase is this date" and "how long until the next period"
//!
//! Everything here is pure. The projection is recomputed in full whenever the
//! settings change.

use crate::{CycleDay, CyclePhase, CycleSettings, CycleSummary, PhaseLengths, UserCycle};
use chrono::{Duration, NaiveDate};

/// Number of cycles projected when the caller has no preference
pub const DEFAULT_CYCLES_TO_GENERATE: u32 = 2;

/// Upper bound accepted from configuration for the projection horizon
pub const MAX_CYCLES_TO_GENERATE: u32 = 24;

/// Initial allocation cap; longer projections grow the vector as needed
const MAX_PREALLOCATED_DAYS: usize = 4096;

/// The ovulatory window is a fixed number of days
pub const OVULATORY_LENGTH: i64 = 3;

/// Share of the post-period days given to the follicular phase
const FOLLICULAR_SHARE: f64 = 0.4;

/// Split one cycle into its four phase segments
///
/// - Menstrual: the period length
/// - Follicular: `floor((cycle - period) * 0.4)`
/// - Ovulatory: fixed at 3 days
/// - Luteal: whatever remains, possibly negative for pathological settings
pub fn phase_lengths(settings: &CycleSettings) -> PhaseLengths {
    let cycle = i64::from(settings.average_cycle_length);
    let menstrual = i64::from(settings.period_length);
    let follicular = ((cycle - menstrual) as f64 * FOLLICULAR_SHARE).floor() as i64;
    let ovulatory = OVULATORY_LENGTH;
    let luteal = cycle - menstrual - follicular - ovulatory;

    PhaseLengths {
        menstrual,
        follicular,
        ovulatory,
        luteal,
    }
}

/// Phase segments as `(phase, start offset within cycle, length)`
///
/// Offsets accumulate the raw lengths, so a negative segment shifts the
/// segments after it the same way the emitted days are numbered.
fn segments(lengths: &PhaseLengths) -> [(CyclePhase, i64, i64); 4] {
    let mut start = 0;
    CyclePhase::ALL.map(|phase| {
        let len = lengths.of(phase);
        let segment = (phase, start, len);
        start += len;
        segment
    })
}

/// `start` shifted by `days`, or `None` past the calendar's supported range
fn offset_date(start: NaiveDate, days: i64) -> Option<NaiveDate> {
    Duration::try_days(days).and_then(|delta| start.checked_add_signed(delta))
}

/// Project the phase timeline for `cycles_to_generate` consecutive cycles
///
/// Output is sorted by date. `day_of_cycle` restarts at 1 on each cycle's
/// first day. Segments with a non-positive length emit no days. The
/// projection stops at the last representable date.
pub fn project_cycle_days(settings: &CycleSettings, cycles_to_generate: u32) -> Vec<CycleDay> {
    let lengths = phase_lengths(settings);
    if !lengths.is_well_formed() {
        tracing::warn!(
            "Cycle settings produce a malformed partition: {:?} (cycle {}, period {})",
            lengths,
            settings.average_cycle_length,
            settings.period_length
        );
    }

    let cycle_length = i64::from(settings.average_cycle_length);
    let capacity = (cycles_to_generate as usize)
        .saturating_mul(settings.average_cycle_length as usize)
        .min(MAX_PREALLOCATED_DAYS);
    let mut days = Vec::with_capacity(capacity);

    'cycles: for cycle in 0..i64::from(cycles_to_generate) {
        let cycle_start = match cycle
            .checked_mul(cycle_length)
            .and_then(|offset| offset_date(settings.last_period_start_date, offset))
        {
            Some(start) => start,
            None => {
                tracing::warn!("Projection truncated at cycle {}: date out of range", cycle + 1);
                break;
            }
        };

        for (phase, start, len) in segments(&lengths) {
            for i in 0..len {
                let offset = start + i;
                let date = match offset_date(cycle_start, offset) {
                    Some(date) => date,
                    None => {
                        tracing::warn!(
                            "Projection truncated on day {} of cycle {}: date out of range",
                            offset + 1,
                            cycle + 1
                        );
                        break 'cycles;
                    }
                };
                days.push(CycleDay {
                    day_of_cycle: (offset + 1) as u32,
                    date,
                    phase,
                });
            }
        }
    }

    tracing::debug!(
        "Projected {} days over {} cycles from {}",
        days.len(),
        cycles_to_generate,
        settings.last_period_start_date
    );

    days
}

/// Project with the default number of cycles
pub fn project_cycle_days_default(settings: &CycleSettings) -> Vec<CycleDay> {
    project_cycle_days(settings, DEFAULT_CYCLES_TO_GENERATE)
}

/// Find the projected day falling on `target`
pub fn find_cycle_day(days: &[CycleDay], target: NaiveDate) -> Option<&CycleDay> {
    days.iter().find(|d| d.date == target)
}

/// Phase of a given day number, without building a timeline
///
/// Returns `None` for day 0 or days past the end of the cycle.
pub fn phase_for_day(settings: &CycleSettings, day_of_cycle: u32) -> Option<CyclePhase> {
    if day_of_cycle == 0 || day_of_cycle > settings.average_cycle_length {
        return None;
    }

    let offset = i64::from(day_of_cycle) - 1;
    segments(&phase_lengths(settings))
        .into_iter()
        .find(|(_, start, len)| offset >= *start && offset < start + len)
        .map(|(phase, _, _)| phase)
}

/// Whole days from the last period start to `today` (negative if the start is in the future)
pub fn days_since_last_period(last_period_start_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - last_period_start_date).num_days()
}

/// Days remaining until the next period is expected
///
/// Always in `1..=cycle_length`: the start day itself counts as a full cycle
/// away, and start dates in the future wrap with a Euclidean modulo.
/// A zero cycle length has no meaningful answer and yields 0.
pub fn days_until_next_period(
    last_period_start_date: NaiveDate,
    cycle_length: u32,
    today: NaiveDate,
) -> u32 {
    if cycle_length == 0 {
        tracing::warn!("days_until_next_period called with zero cycle length");
        return 0;
    }

    let cycle = i64::from(cycle_length);
    let days_passed = days_since_last_period(last_period_start_date, today);
    (cycle - days_passed.rem_euclid(cycle)) as u32
}

/// Current phase, day and countdown for `today`
///
/// Dates outside the projected span fall back to day 1 of the menstrual phase.
pub fn summarize(settings: &CycleSettings, days: &[CycleDay], today: NaiveDate) -> CycleSummary {
    let (current_phase, current_cycle_day) = match find_cycle_day(days, today) {
        Some(day) => (day.phase, day.day_of_cycle),
        None => {
            tracing::info!(
                "{} is outside the projected span, falling back to day 1",
                today
            );
            (CyclePhase::Menstrual, 1)
        }
    };

    CycleSummary {
        current_phase,
        current_cycle_day,
        days_until_next_period: days_until_next_period(
            settings.last_period_start_date,
            settings.average_cycle_length,
            today,
        ),
    }
}

impl UserCycle {
    /// Build the cached projection for a set of settings
    pub fn from_settings(settings: CycleSettings, today: NaiveDate, cycles_to_generate: u32) -> Self {
        let predicted_cycle_days = project_cycle_days(&settings, cycles_to_generate);
        let summary = summarize(&settings, &predicted_cycle_days, today);

        tracing::info!(
            "Cycle projected: day {} ({}) on {}",
            summary.current_cycle_day,
            summary.current_phase,
            today
        );

        Self {
            current_cycle_start_date: settings.last_period_start_date,
            current_phase: summary.current_phase,
            current_cycle_day: summary.current_cycle_day,
            settings,
            predicted_cycle_days,
        }
    }

    /// Summary for `today` from the cached projection
    pub fn summary(&self, today: NaiveDate) -> CycleSummary {
        summarize(&self.settings, &self.predicted_cycle_days, today)
    }
}
