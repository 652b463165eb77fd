//! Weekly recurring tutor schedules.
//!
//! A [`WeeklySchedule`] maps each weekday to an ordered list of
//! [`TimeWindow`]s in the tutor's local civil time. The backend serves it
//! keyed by lowercase weekday names with `"HH:MM"` wall-clock strings, and
//! that is exactly the serde shape here. A fresh schedule is empty on all
//! seven days; windows are only changed through an explicit save, which is
//! where [`WeeklySchedule::validate`] runs.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// One recurring availability window, wall-clock only (no date component).
///
/// Invariant: `start < end`. A degenerate window survives deserialization
/// (the resolver simply emits nothing for it) but fails [`WeeklySchedule::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl TimeWindow {
    /// Build a window from `"HH:MM"` strings, validating `start < end`.
    pub fn from_hhmm(start: &str, end: &str) -> Result<Self> {
        let start = parse_hhmm(start)?;
        let end = parse_hhmm(end)?;
        if start >= end {
            return Err(EngineError::InvalidWindow {
                day: "unspecified",
                start: start.format(HHMM_FORMAT).to_string(),
                end: end.format(HHMM_FORMAT).to_string(),
            });
        }
        Ok(Self { start, end })
    }
}

/// A tutor's recurring weekly availability, one window list per day.
///
/// Windows within a day are expected not to overlap; overlaps are tolerated
/// (never deduplicated) but are the tutor's editing mistake, not ours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklySchedule {
    pub monday: Vec<TimeWindow>,
    pub tuesday: Vec<TimeWindow>,
    pub wednesday: Vec<TimeWindow>,
    pub thursday: Vec<TimeWindow>,
    pub friday: Vec<TimeWindow>,
    pub saturday: Vec<TimeWindow>,
    pub sunday: Vec<TimeWindow>,
}

impl WeeklySchedule {
    /// The window list for a given weekday (empty if the day is unset).
    pub fn windows_for(&self, day: Weekday) -> &[TimeWindow] {
        match day {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    /// Mutable access for the schedule editor.
    pub fn windows_for_mut(&mut self, day: Weekday) -> &mut Vec<TimeWindow> {
        match day {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }

    /// Save-time gate: every window must satisfy `start < end`.
    ///
    /// Overlap between windows on the same day is not an error here.
    pub fn validate(&self) -> Result<()> {
        for day in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            for window in self.windows_for(day) {
                if window.start >= window.end {
                    return Err(EngineError::InvalidWindow {
                        day: weekday_name(day),
                        start: window.start.format(HHMM_FORMAT).to_string(),
                        end: window.end.format(HHMM_FORMAT).to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Lowercase day name matching the wire format keys.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

const HHMM_FORMAT: &str = "%H:%M";

fn parse_hhmm(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, HHMM_FORMAT)
        .map_err(|_| EngineError::InvalidTime(s.to_string()))
}

/// Serde adapter for `"HH:MM"` wall-clock strings.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::HHMM_FORMAT;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(HHMM_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, HHMM_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_roundtrips_wire_format() {
        let json = r#"{"monday":[{"start":"09:00","end":"12:00"}],"tuesday":[],"wednesday":[],"thursday":[],"friday":[{"start":"14:00","end":"17:30"}],"saturday":[],"sunday":[]}"#;
        let schedule: WeeklySchedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.monday.len(), 1);
        assert_eq!(
            schedule.friday[0].end,
            NaiveTime::from_hms_opt(17, 30, 0).unwrap()
        );

        let back = serde_json::to_string(&schedule).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn missing_days_default_to_empty() {
        let schedule: WeeklySchedule =
            serde_json::from_str(r#"{"monday":[{"start":"09:00","end":"10:00"}]}"#).unwrap();
        assert!(schedule.sunday.is_empty());
        assert_eq!(schedule.monday.len(), 1);
    }

    #[test]
    fn validate_rejects_inverted_window() {
        let mut schedule = WeeklySchedule::default();
        schedule.wednesday.push(TimeWindow {
            start: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        });
        let err = schedule.validate().unwrap_err();
        assert!(err.to_string().contains("wednesday"));
    }

    #[test]
    fn from_hhmm_rejects_garbage() {
        assert!(TimeWindow::from_hhmm("9am", "10am").is_err());
        assert!(TimeWindow::from_hhmm("10:00", "10:00").is_err());
        assert!(TimeWindow::from_hhmm("09:00", "10:15").is_ok());
    }
}
