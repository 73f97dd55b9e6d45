//! Phase resolution and progress arithmetic.
//!
//! Everything here is pure: callers supply the timeline, the cycle start and
//! "now".

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::Phase;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days between `start` and `now`, rounded up.
///
/// The distance is absolute, so a start in the future counts the same as one
/// equally far in the past.
pub fn elapsed_days(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (now - start).num_milliseconds().abs();
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// Index of the phase active on day `elapsed`.
///
/// Past the end of the timeline the last phase stays active. Returns `None`
/// for an empty timeline or a day before the first phase.
pub fn resolve_phase_index(phases: &[Phase], elapsed: i64) -> Option<usize> {
    if let Some(idx) = phases.iter().position(|p| p.contains_day(elapsed)) {
        return Some(idx);
    }
    let last = phases.len().checked_sub(1)?;
    (elapsed > phases[last].end_day).then_some(last)
}

pub fn resolve_phase(phases: &[Phase], elapsed: i64) -> Option<&Phase> {
    resolve_phase_index(phases, elapsed).map(|idx| &phases[idx])
}

fn clamp_percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Progress through a single phase, 0..=100.
///
/// A zero-length phase is complete as soon as it is reached.
pub fn phase_progress_percent(phase: &Phase, elapsed: i64) -> u8 {
    let duration = phase.duration_days();
    if duration <= 0 {
        return 100;
    }
    clamp_percent(100.0 * (elapsed - phase.start_day) as f64 / duration as f64)
}

/// Progress through the whole timeline, 0..=100.
pub fn overall_progress_percent(phases: &[Phase], elapsed: i64) -> u8 {
    let Some(last) = phases.last() else {
        return 0;
    };
    if last.end_day <= 0 {
        return 100;
    }
    clamp_percent(100.0 * elapsed as f64 / last.end_day as f64)
}

/// Non-binding target date for work in `phase`: a few days into the phase,
/// never more than halfway through it.
pub fn estimated_date_for_phase(phase: &Phase, start: DateTime<Utc>) -> DateTime<Utc> {
    let into_phase = (phase.duration_days() / 2).min(3);
    start + Duration::days(phase.start_day + into_phase)
}

pub fn phase_end_date(phase: &Phase, start: DateTime<Utc>) -> DateTime<Utc> {
    start + Duration::days(phase.end_day)
}

/// Snapshot of where a cycle stands at a given instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleProgress {
    pub start: DateTime<Utc>,
    pub elapsed_days: i64,
    pub phase_index: Option<usize>,
    pub phase_percent: u8,
    pub overall_percent: u8,
    pub phase_ends: Option<DateTime<Utc>>,
}

impl CycleProgress {
    pub fn compute(phases: &[Phase], start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let elapsed = elapsed_days(start, now);
        let phase_index = resolve_phase_index(phases, elapsed);
        let phase = phase_index.map(|idx| &phases[idx]);

        Self {
            start,
            elapsed_days: elapsed,
            phase_index,
            phase_percent: phase.map_or(0, |p| phase_progress_percent(p, elapsed)),
            overall_percent: overall_progress_percent(phases, elapsed),
            phase_ends: phase.map(|p| phase_end_date(p, start)),
        }
    }

    pub fn phase<'a>(&self, phases: &'a [Phase]) -> Option<&'a Phase> {
        self.phase_index.and_then(|idx| phases.get(idx))
    }
}
