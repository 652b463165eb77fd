//! Tests for the booking session's fetch lifecycle and submission gates.

use booking_client::{BookedState, BookingSession, SessionError};
use booking_engine::{BookedInterval, Click, Selection, Slot, TimeWindow, WeeklySchedule};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

fn tuesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 17).unwrap()
}

/// Mornings on Monday and Tuesday.
fn schedule() -> WeeklySchedule {
    let mut schedule = WeeklySchedule::default();
    schedule.monday = vec![TimeWindow::from_hhmm("09:00", "12:00").unwrap()];
    schedule.tuesday = vec![TimeWindow::from_hhmm("09:00", "12:00").unwrap()];
    schedule
}

fn session() -> BookingSession {
    BookingSession::new("tutor-1", Tz::UTC, schedule(), monday())
}

fn slot(date: NaiveDate, h: u32, m: u32) -> Slot {
    Slot::new(date, NaiveTime::from_hms_opt(h, m, 0).unwrap())
}

fn early() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, 8, 0, 0).unwrap()
}

#[test]
fn clicks_are_blocked_until_conflicts_are_confirmed() {
    let mut session = session();
    assert_eq!(*session.booked(), BookedState::Loading);

    let err = session.click(slot(monday(), 9, 0), early()).unwrap_err();
    assert!(matches!(err, SessionError::ConflictsUnknown));
    assert!(session.statuses(early()).is_none());

    let ticket = session.begin_refresh();
    assert!(session.apply_booked(ticket, Ok(vec![])));
    assert!(session.click(slot(monday(), 9, 0), early()).is_ok());
    assert!(session.statuses(early()).is_some());
}

#[test]
fn stale_fetch_response_is_discarded_after_date_change() {
    let mut session = session();

    // A fetch for Monday goes out, then the user moves to Tuesday before
    // it lands.
    let monday_ticket = session.begin_refresh();
    let tuesday_ticket = session.select_date(tuesday());

    let monday_intervals = vec![BookedInterval {
        start: Utc.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2026, 3, 16, 12, 0, 0).unwrap(),
    }];
    assert!(!session.apply_booked(monday_ticket, Ok(monday_intervals)));
    // Still waiting on Tuesday's data; the wrong day's conflicts were
    // never applied.
    assert_eq!(*session.booked(), BookedState::Loading);

    assert!(session.apply_booked(tuesday_ticket, Ok(vec![])));
    assert_eq!(*session.booked(), BookedState::Ready(vec![]));
}

#[test]
fn failed_fetch_blocks_selection_but_not_rendering() {
    let mut session = session();
    let ticket = session.begin_refresh();
    session.apply_booked(
        ticket,
        Err(booking_client::ClientError::BaseUrl("down".into())),
    );

    assert_eq!(*session.booked(), BookedState::Unavailable);
    // The grid still resolves and groups for display.
    assert!(!session.slots().is_empty());
    assert_eq!(session.windows().len(), 1);
    // But nothing can be selected or submitted.
    assert!(matches!(
        session.click(slot(monday(), 9, 0), early()),
        Err(SessionError::ConflictsUnknown)
    ));
    assert!(matches!(
        session.checkout(),
        Err(SessionError::ConflictsUnknown)
    ));
}

#[test]
fn date_change_resets_selection_and_demands_fresh_conflicts() {
    let mut session = session();
    let ticket = session.begin_refresh();
    session.apply_booked(ticket, Ok(vec![]));
    session.click(slot(monday(), 9, 0), early()).unwrap();

    session.select_date(tuesday());
    assert_eq!(session.selection(), Selection::Empty);
    assert_eq!(*session.booked(), BookedState::Loading);
}

#[test]
fn checkout_converts_the_range_to_utc_instants() {
    let tz: Tz = "America/New_York".parse().unwrap();
    let mut schedule = WeeklySchedule::default();
    schedule.monday = vec![TimeWindow::from_hhmm("09:00", "12:00").unwrap()];
    let mut session = BookingSession::new("tutor-1", tz, schedule, monday());

    let ticket = session.begin_refresh();
    session.apply_booked(ticket, Ok(vec![]));

    // 09:00 EDT on 2026-03-16 is 13:00 UTC.
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 12, 0, 0).unwrap();
    session.click(slot(monday(), 9, 0), now).unwrap();
    let click = session.click(slot(monday(), 10, 30), now).unwrap();
    assert!(matches!(click, Click::Completed { .. }));

    let request = session.checkout().unwrap();
    assert_eq!(request.tutor_id, "tutor-1");
    assert_eq!(
        request.requested_start,
        Utc.with_ymd_and_hms(2026, 3, 16, 13, 0, 0).unwrap()
    );
    assert_eq!(
        request.requested_end,
        Utc.with_ymd_and_hms(2026, 3, 16, 14, 30, 0).unwrap()
    );
}

#[test]
fn checkout_without_a_full_range_is_rejected() {
    let mut session = session();
    let ticket = session.begin_refresh();
    session.apply_booked(ticket, Ok(vec![]));

    assert!(matches!(session.checkout(), Err(SessionError::NoSelection)));

    session.click(slot(monday(), 9, 0), early()).unwrap();
    assert!(matches!(session.checkout(), Err(SessionError::NoSelection)));
}

#[test]
fn late_conflict_clears_the_selection_and_forces_a_refetch() {
    let mut session = session();
    let ticket = session.begin_refresh();
    session.apply_booked(ticket, Ok(vec![]));
    session.click(slot(monday(), 9, 0), early()).unwrap();
    session.click(slot(monday(), 10, 0), early()).unwrap();

    // The backend said someone else got there first.
    let retry_ticket = session.submission_rejected();

    assert_eq!(session.selection(), Selection::Empty);
    assert_eq!(*session.booked(), BookedState::Loading);
    assert!(matches!(
        session.click(slot(monday(), 9, 0), early()),
        Err(SessionError::ConflictsUnknown)
    ));

    // The pre-rejection ticket can no longer apply; only the new one can.
    assert!(!session.apply_booked(ticket, Ok(vec![])));
    assert!(session.apply_booked(retry_ticket, Ok(vec![])));
}

#[test]
fn schedule_update_resets_the_selection() {
    let mut session = session();
    let ticket = session.begin_refresh();
    session.apply_booked(ticket, Ok(vec![]));
    session.click(slot(monday(), 9, 0), early()).unwrap();

    // The tutor saved new hours; the old grid no longer exists.
    let mut updated = WeeklySchedule::default();
    updated.monday = vec![TimeWindow::from_hhmm("14:00", "17:00").unwrap()];
    session.set_schedule(updated);

    assert_eq!(session.selection(), Selection::Empty);
    assert_eq!(session.slots().first().map(|s| s.start),
        Some(NaiveTime::from_hms_opt(14, 0, 0).unwrap()));
}
