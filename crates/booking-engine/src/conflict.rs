//! Conflict Filter -- advisory predicates classifying slots at render time.
//!
//! A slot is compared against already-booked intervals and the viewer's
//! clock. Booked intervals are half-open `[start, end)`, so back-to-back
//! sessions abut without a false conflict. These checks exist to stop
//! obviously-invalid selections in the UI; the authoritative conflict check
//! runs server-side at submission. When a slot's instant cannot be resolved
//! (a wall-clock time that does not exist on that date), the filter disables
//! the slot rather than guessing.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::resolver::Slot;

/// Default forward booking window, in days.
pub const DEFAULT_HORIZON_DAYS: i64 = 90;

/// An existing confirmed or pending session on the tutor's calendar.
/// Supplied by the backend for one selected date; read-only here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Render-time classification of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    /// Selectable.
    Open,
    /// Collides with a booked interval.
    Booked,
    /// Nominal instant is behind the viewer's clock (or does not exist on
    /// this date at all).
    Past,
    /// Beyond the forward booking window.
    BeyondHorizon,
}

/// Everything the status and selection checks need about one calendar day.
///
/// Passed explicitly into engine entry points; the engine keeps no ambient
/// state of its own.
#[derive(Debug, Clone, Copy)]
pub struct DayContext<'a> {
    /// The selected calendar date.
    pub date: NaiveDate,
    /// The tutor's IANA timezone; slot wall-clock times are civil times here.
    pub tz: Tz,
    /// Resolved slots for `date`, time-ascending.
    pub slots: &'a [Slot],
    /// Booked intervals fetched for `date`.
    pub booked: &'a [BookedInterval],
    /// Forward booking window in days.
    pub horizon_days: i64,
}

impl<'a> DayContext<'a> {
    pub fn new(date: NaiveDate, tz: Tz, slots: &'a [Slot], booked: &'a [BookedInterval]) -> Self {
        Self {
            date,
            tz,
            slots,
            booked,
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }

    pub fn with_horizon(mut self, days: i64) -> Self {
        self.horizon_days = days;
        self
    }

    /// Whether the slot belongs to this day's resolved grid.
    pub fn contains(&self, slot: &Slot) -> bool {
        slot.date == self.date && self.slots.iter().any(|s| s.start == slot.start)
    }
}

/// Localize a slot's nominal wall-clock instant in the tutor's timezone.
///
/// A DST fold (the repeated hour in autumn) resolves to the earliest
/// mapping. A spring-forward gap has no instant and yields `None`; callers
/// treat such slots as unavailable.
pub fn slot_instant(slot: &Slot, tz: Tz) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&slot.date.and_time(slot.start)) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

/// Whether the slot's instant falls inside any booked interval.
///
/// Half-open comparison: a booking ending at 11:00 does not block the 11:00
/// slot. An unresolvable instant counts as booked -- the filter only ever
/// fails toward disabling a slot it cannot confirm free.
pub fn is_booked(slot: &Slot, tz: Tz, booked: &[BookedInterval]) -> bool {
    match slot_instant(slot, tz) {
        Some(instant) => booked
            .iter()
            .any(|b| b.start <= instant && instant < b.end),
        None => true,
    }
}

/// Whether the slot's instant is strictly before `now`.
pub fn is_past(slot: &Slot, tz: Tz, now: DateTime<Utc>) -> bool {
    match slot_instant(slot, tz) {
        Some(instant) => instant < now,
        None => true,
    }
}

/// Whether the slot lies beyond the forward booking window.
pub fn is_beyond_horizon(slot: &Slot, tz: Tz, now: DateTime<Utc>, horizon_days: i64) -> bool {
    match slot_instant(slot, tz) {
        Some(instant) => instant > now + Duration::days(horizon_days),
        // Unresolvable instants are already disabled by is_past.
        None => false,
    }
}

/// Classify a slot for rendering. Precedence: past, then booked, then
/// horizon; only a slot passing all three is [`SlotStatus::Open`].
pub fn slot_status(slot: &Slot, ctx: &DayContext<'_>, now: DateTime<Utc>) -> SlotStatus {
    if is_past(slot, ctx.tz, now) {
        SlotStatus::Past
    } else if is_booked(slot, ctx.tz, ctx.booked) {
        SlotStatus::Booked
    } else if is_beyond_horizon(slot, ctx.tz, now, ctx.horizon_days) {
        SlotStatus::BeyondHorizon
    } else {
        SlotStatus::Open
    }
}
