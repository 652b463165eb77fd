//! Tests for grouping slots into contiguous display windows.

use booking_engine::{group_into_windows, Slot};
use chrono::{NaiveDate, NaiveTime};

fn slot(h: u32, m: u32) -> Slot {
    Slot::new(
        NaiveDate::from_ymd_opt(2026, 3, 16).unwrap(),
        NaiveTime::from_hms_opt(h, m, 0).unwrap(),
    )
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn gap_splits_slots_into_two_windows() {
    // [09:00, 09:30, 10:00, 14:00, 14:30] → a morning and an afternoon group.
    let slots = vec![
        slot(9, 0),
        slot(9, 30),
        slot(10, 0),
        slot(14, 0),
        slot(14, 30),
    ];

    let windows = group_into_windows(&slots);

    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].start, time(9, 0));
    assert_eq!(windows[0].end, time(10, 30));
    assert_eq!(windows[0].slots.len(), 3);
    assert_eq!(windows[0].duration_minutes(), 90);

    assert_eq!(windows[1].start, time(14, 0));
    assert_eq!(windows[1].end, time(15, 0));
    assert_eq!(windows[1].slots.len(), 2);
}

#[test]
fn fully_contiguous_slots_form_one_window() {
    let slots = vec![slot(9, 0), slot(9, 30), slot(10, 0), slot(10, 30)];
    let windows = group_into_windows(&slots);
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].end, time(11, 0));
    assert_eq!(windows[0].duration_minutes(), 120);
}

#[test]
fn empty_input_produces_no_windows() {
    assert!(group_into_windows(&[]).is_empty());
}

#[test]
fn single_slot_is_its_own_window() {
    let windows = group_into_windows(&[slot(9, 0)]);
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start, time(9, 0));
    assert_eq!(windows[0].end, time(9, 30));
}

#[test]
fn adjacent_schedule_windows_with_a_real_gap_stay_separate() {
    // Two schedule windows 09:00-10:00 and 11:00-12:00 resolve into slots
    // with a 60-minute hole between 09:30 and 11:00.
    let slots = vec![slot(9, 0), slot(9, 30), slot(11, 0), slot(11, 30)];
    let windows = group_into_windows(&slots);
    assert_eq!(windows.len(), 2);
}

#[test]
fn off_step_gap_breaks_a_window() {
    // A 15-minute gap is not one discretization step; the run breaks even
    // though the slots nearly touch.
    let slots = vec![slot(9, 0), slot(9, 30), slot(9, 45)];
    let windows = group_into_windows(&slots);
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[1].start, time(9, 45));
}

#[test]
fn duplicate_slots_split_rather_than_merge() {
    // Duplicates from overlapping schedule windows have a zero-minute gap,
    // which is not one step either.
    let slots = vec![slot(9, 0), slot(9, 30), slot(9, 30), slot(10, 0)];
    let windows = group_into_windows(&slots);
    assert_eq!(windows.len(), 2);
}
