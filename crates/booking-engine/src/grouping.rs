//! Window Grouper -- collects contiguous slots into display windows.
//!
//! Walks a time-ascending slot list and starts a new window whenever the gap
//! to the previous slot is not exactly one 30-minute step. A 09:00-12:00
//! window and a 14:00-17:00 window on the same day therefore render as two
//! groups, as do two schedule windows separated by any real gap.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::resolver::{minute_of_day, Slot, SLOT_MINUTES};

/// An ordered run of contiguous slots; purely a view artifact, recomputed
/// from the slot list. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    /// Start of the first slot in the run.
    #[serde(with = "crate::schedule::hhmm")]
    pub start: NaiveTime,
    /// Exclusive end: the last slot's start plus one step. A run ending at
    /// 23:30 reports 00:00, meaning the following midnight.
    #[serde(with = "crate::schedule::hhmm")]
    pub end: NaiveTime,
    pub slots: Vec<Slot>,
}

impl AvailabilityWindow {
    pub fn duration_minutes(&self) -> i64 {
        self.slots.len() as i64 * i64::from(SLOT_MINUTES)
    }
}

/// Group a time-ascending slot list into contiguous display windows.
pub fn group_into_windows(slots: &[Slot]) -> Vec<AvailabilityWindow> {
    let mut windows = Vec::new();
    let mut run: Vec<Slot> = Vec::new();

    for &slot in slots {
        if let Some(prev) = run.last() {
            let gap = i64::from(minute_of_day(slot.start)) - i64::from(minute_of_day(prev.start));
            if gap != i64::from(SLOT_MINUTES) {
                windows.extend(seal(std::mem::take(&mut run)));
            }
        }
        run.push(slot);
    }
    windows.extend(seal(run));

    windows
}

fn seal(run: Vec<Slot>) -> Option<AvailabilityWindow> {
    let first = *run.first()?;
    let last = *run.last()?;
    let (end, _wrapped) = last
        .start
        .overflowing_add_signed(Duration::minutes(i64::from(SLOT_MINUTES)));
    Some(AvailabilityWindow {
        start: first.start,
        end,
        slots: run,
    })
}
