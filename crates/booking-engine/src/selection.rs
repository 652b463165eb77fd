//! Range Validator -- the selection state machine over the resolved grid.
//!
//! The user's pick is an explicit tagged variant ([`Selection`]) with a
//! single exhaustive transition function ([`SelectionState::click`]), not a
//! pair of ad hoc booleans. Every rejection is a recoverable, user-facing
//! `Err` value; the state is left untouched and nothing panics.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::conflict::{is_booked, is_past, slot_status, DayContext, SlotStatus};
use crate::resolver::{minute_of_day, time_from_minute, Slot, SLOT_MINUTES};

/// Current state of the user's start/end pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing selected.
    #[default]
    Empty,
    /// A start slot is chosen; the next open-slot click proposes an end.
    StartOnly(Slot),
    /// A validated range. `end` is the exclusive finish instant: the session
    /// occupies `[start, end)`.
    Range { start: Slot, end: Slot },
}

/// The accepted transition produced by a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    /// A start slot was selected.
    Started,
    /// The selection was cleared entirely.
    Cleared,
    /// Only the end was cleared; the start remains selected.
    EndCleared,
    /// A full range was accepted; the caller may proceed to checkout.
    Completed { start: Slot, end: Slot },
    /// Both ends were set; the click began a fresh selection.
    Restarted,
}

/// User-facing rejection messages. State is unchanged on every variant.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    #[error("That time is not available for booking")]
    SlotUnavailable,

    #[error("End time must be after the start time")]
    EndNotAfterStart,

    #[error("Sessions must be at least 30 minutes long")]
    BelowMinimumDuration,

    #[error("The selected range spans unavailable time")]
    SpansUnavailableTime,

    #[error("The start time has passed; pick a new start")]
    StartNoLongerAvailable,
}

/// The selection plus the date it belongs to. Changing the date resets the
/// selection; the caller is responsible for re-resolving slots and
/// re-fetching booked intervals for the new day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    date: NaiveDate,
    selection: Selection,
}

impl SelectionState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            selection: Selection::Empty,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Switch to a new date, clearing any partial or complete selection.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.selection = Selection::Empty;
    }

    /// Drop the selection without changing the date (the grid or conflict
    /// data changed underneath it).
    pub fn clear(&mut self) {
        self.selection = Selection::Empty;
    }

    /// Apply one slot click.
    ///
    /// Deselecting the current start or end always works. Selecting a start
    /// (first click, or a restart while a full range is set) requires the
    /// slot to be open. A candidate end is validated in order: it must be
    /// strictly after the start, at least one step away, reachable through
    /// contiguous unbooked ticks, and the start itself must still be live.
    pub fn click(
        &mut self,
        slot: Slot,
        ctx: &DayContext<'_>,
        now: DateTime<Utc>,
    ) -> Result<Click, SelectionError> {
        match self.selection {
            Selection::StartOnly(start) if slot == start => {
                self.selection = Selection::Empty;
                Ok(Click::Cleared)
            }
            Selection::Range { start, .. } if slot == start => {
                self.selection = Selection::Empty;
                Ok(Click::Cleared)
            }
            Selection::Range { start, end } if slot == end => {
                self.selection = Selection::StartOnly(start);
                Ok(Click::EndCleared)
            }
            Selection::Empty => {
                ensure_open(&slot, ctx, now)?;
                self.selection = Selection::StartOnly(slot);
                Ok(Click::Started)
            }
            Selection::StartOnly(start) => {
                validate_range(start, slot, ctx, now)?;
                self.selection = Selection::Range { start, end: slot };
                Ok(Click::Completed { start, end: slot })
            }
            Selection::Range { .. } => {
                ensure_open(&slot, ctx, now)?;
                self.selection = Selection::StartOnly(slot);
                Ok(Click::Restarted)
            }
        }
    }
}

/// A slot may begin a selection only if it is on the context date, present
/// in the resolved grid, and currently open.
fn ensure_open(
    slot: &Slot,
    ctx: &DayContext<'_>,
    now: DateTime<Utc>,
) -> Result<(), SelectionError> {
    if !ctx.contains(slot) {
        return Err(SelectionError::SlotUnavailable);
    }
    match slot_status(slot, ctx, now) {
        SlotStatus::Open => Ok(()),
        _ => Err(SelectionError::SlotUnavailable),
    }
}

/// Validate `end` as the exclusive finish of a range starting at `start`.
///
/// The end slot itself is not required to be unbooked: a booking beginning
/// exactly at `end` abuts the new session without conflict. Every 30-minute
/// tick from `start` (inclusive) to `end` (exclusive) must exist in the
/// grid and be unbooked.
fn validate_range(
    start: Slot,
    end: Slot,
    ctx: &DayContext<'_>,
    now: DateTime<Utc>,
) -> Result<(), SelectionError> {
    if !ctx.contains(&end) {
        return Err(SelectionError::SlotUnavailable);
    }

    let start_min = minute_of_day(start.start);
    let end_min = minute_of_day(end.start);

    if end_min <= start_min {
        return Err(SelectionError::EndNotAfterStart);
    }
    if end_min - start_min < SLOT_MINUTES {
        return Err(SelectionError::BelowMinimumDuration);
    }

    // Continuity: reject ranges that cross a schedule gap or a booking.
    let mut tick = start_min;
    while tick < end_min {
        let present = ctx
            .slots
            .iter()
            .any(|s| minute_of_day(s.start) == tick);
        if !present {
            return Err(SelectionError::SpansUnavailableTime);
        }
        let Some(tick_time) = time_from_minute(tick) else {
            return Err(SelectionError::SpansUnavailableTime);
        };
        let tick_slot = Slot::new(ctx.date, tick_time);
        if is_booked(&tick_slot, ctx.tz, ctx.booked) {
            return Err(SelectionError::SpansUnavailableTime);
        }
        tick += SLOT_MINUTES;
    }

    // The clock may have crossed the start while the user deliberated.
    if is_past(&start, ctx.tz, now) {
        return Err(SelectionError::StartNoLongerAvailable);
    }

    Ok(())
}
