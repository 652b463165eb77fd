//! WASM bindings for booking-engine.
//!
//! Exposes slot resolution, slot classification, and window grouping to the
//! browser front end via `wasm-bindgen`. All complex types cross the
//! boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p booking-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/booking-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/booking_engine_wasm.wasm
//! ```

use booking_engine::{
    group_into_windows, resolve_slots, slot_status, BookedInterval, DayContext, Slot,
    SlotStatus, WeeklySchedule,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SlotDto {
    date: String,
    start: String,
}

impl From<&Slot> for SlotDto {
    fn from(slot: &Slot) -> Self {
        Self {
            date: slot.date.format("%Y-%m-%d").to_string(),
            start: slot.start.format("%H:%M").to_string(),
        }
    }
}

#[derive(Serialize)]
struct SlotStatusDto {
    date: String,
    start: String,
    status: SlotStatus,
}

#[derive(Serialize)]
struct WindowDto {
    start: String,
    end: String,
    slots: Vec<SlotDto>,
}

/// Input format for booked intervals passed from JavaScript.
#[derive(Deserialize)]
struct IntervalInput {
    start: String,
    end: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts both RFC 3339 (with timezone offset) and naive local time,
/// which is interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, JsValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

fn parse_timezone(s: &str) -> Result<Tz, JsValue> {
    s.parse()
        .map_err(|_| JsValue::from_str(&format!("Invalid timezone '{}'", s)))
}

fn parse_schedule_json(json: &str) -> Result<WeeklySchedule, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid schedule JSON: {}", e)))
}

/// Convert a JSON array of `{start, end}` objects into `Vec<BookedInterval>`.
fn parse_intervals_json(json: &str) -> Result<Vec<BookedInterval>, JsValue> {
    let inputs: Vec<IntervalInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid intervals JSON: {}", e)))?;

    inputs
        .into_iter()
        .map(|input| {
            let start = parse_datetime(&input.start)?;
            let end = parse_datetime(&input.end)?;
            Ok(BookedInterval { start, end })
        })
        .collect()
}

fn parse_slots_json(json: &str) -> Result<Vec<Slot>, JsValue> {
    #[derive(Deserialize)]
    struct SlotInput {
        date: String,
        start: String,
    }

    let inputs: Vec<SlotInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid slots JSON: {}", e)))?;

    inputs
        .into_iter()
        .map(|input| {
            let date = parse_date(&input.date)?;
            let start = NaiveTime::parse_from_str(&input.start, "%H:%M")
                .map_err(|e| JsValue::from_str(&format!("Invalid time '{}': {}", input.start, e)))?;
            Ok(Slot::new(date, start))
        })
        .collect()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Resolve a tutor's weekly schedule into bookable slots for one date.
///
/// `schedule_json` is the backend's weekly-schedule shape (lowercase day
/// keys, `"HH:MM"` windows); `date` is `YYYY-MM-DD`. Returns a JSON array
/// of `{date, start}` slots, time-ascending.
#[wasm_bindgen(js_name = "resolveSlots")]
pub fn resolve_slots_js(schedule_json: &str, date: &str) -> Result<String, JsValue> {
    let schedule = parse_schedule_json(schedule_json)?;
    let date = parse_date(date)?;

    let slots = resolve_slots(&schedule, date);
    let dtos: Vec<SlotDto> = slots.iter().map(SlotDto::from).collect();
    to_json(&dtos)
}

/// Classify each resolved slot for rendering.
///
/// `booked_json` is a JSON array of `{start, end}` ISO 8601 intervals,
/// `timezone` an IANA identifier, `now` the viewer's current instant.
/// Returns a JSON array of `{date, start, status}` where `status` is one of
/// `"open"`, `"booked"`, `"past"`, `"beyond_horizon"`.
#[wasm_bindgen(js_name = "slotStatuses")]
pub fn slot_statuses_js(
    schedule_json: &str,
    date: &str,
    booked_json: &str,
    timezone: &str,
    now: &str,
) -> Result<String, JsValue> {
    let schedule = parse_schedule_json(schedule_json)?;
    let date = parse_date(date)?;
    let booked = parse_intervals_json(booked_json)?;
    let tz = parse_timezone(timezone)?;
    let now = parse_datetime(now)?;

    let slots = resolve_slots(&schedule, date);
    let ctx = DayContext::new(date, tz, &slots, &booked);

    let dtos: Vec<SlotStatusDto> = slots
        .iter()
        .map(|slot| SlotStatusDto {
            date: slot.date.format("%Y-%m-%d").to_string(),
            start: slot.start.format("%H:%M").to_string(),
            status: slot_status(slot, &ctx, now),
        })
        .collect();
    to_json(&dtos)
}

/// Group a time-ascending slot list into contiguous display windows.
///
/// `slots_json` is a JSON array of `{date, start}` slots as produced by
/// [`resolveSlots`](resolve_slots_js). Returns a JSON array of
/// `{start, end, slots}` windows.
#[wasm_bindgen(js_name = "groupWindows")]
pub fn group_windows_js(slots_json: &str) -> Result<String, JsValue> {
    let slots = parse_slots_json(slots_json)?;

    let windows = group_into_windows(&slots);
    let dtos: Vec<WindowDto> = windows
        .iter()
        .map(|w| WindowDto {
            start: w.start.format("%H:%M").to_string(),
            end: w.end.format("%H:%M").to_string(),
            slots: w.slots.iter().map(SlotDto::from).collect(),
        })
        .collect();
    to_json(&dtos)
}
