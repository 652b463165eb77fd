//! The booking view session: one explicitly-owned object holding the
//! schedule cache, the conflict cache, and the selection for a single
//! tutor view.
//!
//! Fetches are tied to the date they were issued for through a generation
//! ticket. A response arriving after the user moved to a different date
//! presents a stale ticket and is discarded, so the grid is never validated
//! against the wrong day's conflicts.

use booking_engine::{
    group_into_windows, resolve_slots, slot_instant, slot_status, AvailabilityWindow,
    BookedInterval, Click, DayContext, Selection, SelectionState, Slot, SlotStatus,
    WeeklySchedule, DEFAULT_HORIZON_DAYS,
};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{debug, info, warn};

use crate::api::{BookingApi, NewSessionRequest};
use crate::error::{ClientError, SessionError};

/// Conflict data for the selected date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookedState {
    /// A fetch is outstanding; the grid renders but cannot be validated.
    Loading,
    /// Intervals confirmed for the selected date.
    Ready(Vec<BookedInterval>),
    /// The fetch failed. Availability still renders, but selection and
    /// submission stay blocked: bookings are never invented and absent
    /// conflict data is never trusted.
    Unavailable,
}

/// Ties a booked-intervals fetch to the session state it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// All mutable state for one tutor booking view.
pub struct BookingSession {
    tutor_id: String,
    tz: Tz,
    schedule: WeeklySchedule,
    date: NaiveDate,
    booked: BookedState,
    generation: u64,
    selection: SelectionState,
    horizon_days: i64,
}

impl BookingSession {
    /// A fresh session starts with conflicts unconfirmed; issue a ticket
    /// with [`begin_refresh`](Self::begin_refresh) and fetch before
    /// accepting clicks.
    pub fn new(
        tutor_id: impl Into<String>,
        tz: Tz,
        schedule: WeeklySchedule,
        date: NaiveDate,
    ) -> Self {
        Self {
            tutor_id: tutor_id.into(),
            tz,
            schedule,
            date,
            booked: BookedState::Loading,
            generation: 0,
            selection: SelectionState::new(date),
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }

    pub fn with_horizon(mut self, days: i64) -> Self {
        self.horizon_days = days;
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn booked(&self) -> &BookedState {
        &self.booked
    }

    pub fn selection(&self) -> Selection {
        self.selection.selection()
    }

    /// Replace the cached schedule (after the tutor saved an edit). The
    /// resolved grid changes under the selection, so the selection resets.
    pub fn set_schedule(&mut self, schedule: WeeklySchedule) {
        self.schedule = schedule;
        self.selection.clear();
    }

    /// Switch the selected date: clears the selection, invalidates any
    /// in-flight fetch, and demands fresh conflict data for the new day.
    pub fn select_date(&mut self, date: NaiveDate) -> FetchTicket {
        self.date = date;
        self.selection.set_date(date);
        debug!(%date, "date selected; booked intervals pending");
        self.begin_refresh()
    }

    /// Mark conflicts unconfirmed and issue a ticket for the fetch that
    /// will confirm them (initial load, retry after failure, or recovery
    /// after a late conflict).
    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.booked = BookedState::Loading;
        self.generation += 1;
        FetchTicket(self.generation)
    }

    /// Apply a fetch outcome. A stale ticket (the session moved on while
    /// the request was in flight) is discarded; returns whether the
    /// response was applied.
    pub fn apply_booked(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<BookedInterval>, ClientError>,
    ) -> bool {
        if ticket.0 != self.generation {
            debug!(
                got = ticket.0,
                want = self.generation,
                "discarding stale booked-intervals response"
            );
            return false;
        }
        match result {
            Ok(intervals) => {
                info!(date = %self.date, count = intervals.len(), "booked intervals confirmed");
                self.booked = BookedState::Ready(intervals);
            }
            Err(err) => {
                warn!(date = %self.date, error = %err, "booked intervals could not be confirmed");
                self.booked = BookedState::Unavailable;
            }
        }
        true
    }

    /// Issue a ticket, fetch, and apply in one step.
    pub async fn refresh_booked(&mut self, api: &BookingApi) -> bool {
        let ticket = self.begin_refresh();
        let result = api.fetch_booked(&self.tutor_id, self.date).await;
        self.apply_booked(ticket, result)
    }

    /// The resolved slot grid for the selected date.
    pub fn slots(&self) -> Vec<Slot> {
        resolve_slots(&self.schedule, self.date)
    }

    /// The grid grouped into contiguous display windows.
    pub fn windows(&self) -> Vec<AvailabilityWindow> {
        group_into_windows(&self.slots())
    }

    /// Per-slot classification for rendering, or `None` while conflict
    /// data is unconfirmed (render a loading/error affordance instead).
    pub fn statuses(&self, now: DateTime<Utc>) -> Option<Vec<(Slot, SlotStatus)>> {
        let BookedState::Ready(intervals) = &self.booked else {
            return None;
        };
        let slots = self.slots();
        let ctx = DayContext::new(self.date, self.tz, &slots, intervals)
            .with_horizon(self.horizon_days);
        Some(
            slots
                .iter()
                .map(|slot| (*slot, slot_status(slot, &ctx, now)))
                .collect(),
        )
    }

    /// Apply one slot click. Blocked entirely until booked intervals for
    /// the selected date are confirmed.
    pub fn click(&mut self, slot: Slot, now: DateTime<Utc>) -> Result<Click, SessionError> {
        let BookedState::Ready(intervals) = &self.booked else {
            return Err(SessionError::ConflictsUnknown);
        };
        let slots = resolve_slots(&self.schedule, self.date);
        let ctx =
            DayContext::new(self.date, self.tz, &slots, intervals).with_horizon(self.horizon_days);
        Ok(self.selection.click(slot, &ctx, now)?)
    }

    /// Convert a completed selection into the submission body. Requires
    /// confirmed conflict data and a full range.
    pub fn checkout(&self) -> Result<NewSessionRequest, SessionError> {
        if !matches!(self.booked, BookedState::Ready(_)) {
            return Err(SessionError::ConflictsUnknown);
        }
        let Selection::Range { start, end } = self.selection.selection() else {
            return Err(SessionError::NoSelection);
        };
        let requested_start =
            slot_instant(&start, self.tz).ok_or(SessionError::StaleSelection)?;
        let requested_end = slot_instant(&end, self.tz).ok_or(SessionError::StaleSelection)?;
        Ok(NewSessionRequest {
            tutor_id: self.tutor_id.clone(),
            requested_start,
            requested_end,
            subject: None,
            message: None,
        })
    }

    /// Recovery path for a late conflict: the backend rejected the
    /// submission because another student booked first, so the local
    /// conflict view is known stale. Clears the selection and demands a
    /// re-fetch before another attempt.
    pub fn submission_rejected(&mut self) -> FetchTicket {
        warn!(date = %self.date, "submission rejected; refreshing stale conflict view");
        self.selection.clear();
        self.begin_refresh()
    }
}
