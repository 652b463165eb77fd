//! # booking-engine
//!
//! Deterministic session-booking availability for a tutoring marketplace.
//!
//! Turns a tutor's recurring weekly schedule plus already-booked sessions
//! into bookable 30-minute slots for a calendar date, classifies each slot
//! against conflicts, the viewer's clock, and the booking horizon, groups
//! contiguous slots into display windows, and drives the start/end range
//! selection as an explicit state machine.
//!
//! The crate is pure: no I/O, no clock reads, no logging. Callers pass the
//! current instant and the day's data in through [`conflict::DayContext`].
//!
//! ## Modules
//!
//! - [`schedule`] — weekly recurring schedule types and save-time validation
//! - [`resolver`] — schedule + date → ordered list of bookable [`Slot`]s
//! - [`conflict`] — booked/past/horizon predicates and slot classification
//! - [`grouping`] — contiguous slot runs → display windows
//! - [`selection`] — the click-driven range selection state machine
//! - [`error`] — error types

pub mod conflict;
pub mod error;
pub mod grouping;
pub mod resolver;
pub mod schedule;
pub mod selection;

pub use conflict::{
    is_beyond_horizon, is_booked, is_past, slot_instant, slot_status, BookedInterval, DayContext,
    SlotStatus, DEFAULT_HORIZON_DAYS,
};
pub use error::EngineError;
pub use grouping::{group_into_windows, AvailabilityWindow};
pub use resolver::{resolve_slots, Slot, SLOT_MINUTES};
pub use schedule::{TimeWindow, WeeklySchedule};
pub use selection::{Click, Selection, SelectionError, SelectionState};
