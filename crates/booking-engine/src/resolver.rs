//! Availability Resolver -- expands a weekly schedule into concrete bookable slots.
//!
//! Pure and deterministic: the same schedule and date always produce the same
//! ordered slot list. No I/O, no clock reads; "past" and "booked" are the
//! conflict filter's concern, not the resolver's.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::schedule::{TimeWindow, WeeklySchedule};

/// Discretization granularity for bookable slots, in minutes. Fixed; not
/// configurable per tutor.
pub const SLOT_MINUTES: u32 = 30;

/// One bookable instant: a date plus the slot's nominal wall-clock start.
///
/// Slots are derived data, regenerated on every schedule or date change and
/// never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    #[serde(with = "crate::schedule::hhmm")]
    pub start: NaiveTime,
}

impl Slot {
    pub fn new(date: NaiveDate, start: NaiveTime) -> Self {
        Self { date, start }
    }
}

/// Expand the schedule's windows for `date` into 30-minute slots.
///
/// Each window emits slots at `start + k * 30min` while the slot's nominal
/// start is strictly before the window end, so a `09:00-10:15` window yields
/// `09:00`, `09:30`, `10:00`. A day with no windows resolves to an empty
/// list, which renders as "unavailable".
///
/// The result is sorted by time-of-day to tolerate out-of-order input
/// windows. Duplicates from overlapping windows are kept as-is.
pub fn resolve_slots(schedule: &WeeklySchedule, date: NaiveDate) -> Vec<Slot> {
    let mut slots: Vec<Slot> = schedule
        .windows_for(date.weekday())
        .iter()
        .flat_map(|window| window_slots(window, date))
        .collect();

    slots.sort_by_key(|slot| slot.start);
    slots
}

fn window_slots(window: &TimeWindow, date: NaiveDate) -> Vec<Slot> {
    let end = minute_of_day(window.end);
    let mut cursor = minute_of_day(window.start);

    let mut out = Vec::new();
    while cursor < end {
        if let Some(start) = time_from_minute(cursor) {
            out.push(Slot { date, start });
        }
        cursor += SLOT_MINUTES;
    }
    out
}

/// Minutes since midnight for a wall-clock time.
pub(crate) fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Inverse of [`minute_of_day`]; `None` for minutes past the end of day.
pub(crate) fn time_from_minute(minute: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(minute / 60, minute % 60, 0)
}
