use crate::{MeetsiteError, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

pub const MAX_FLEXIBILITY_DAYS: u8 = 14;
pub const DEFAULT_FLEXIBILITY_DAYS: u8 = 3;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| MeetsiteError::InvalidDate(s.to_string()))
}

/// Planned meeting dates plus how many days either side travellers may shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingWindow {
    pub start: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    #[serde(default = "default_flexibility")]
    pub flexibility_days: u8,
}

fn default_flexibility() -> u8 {
    DEFAULT_FLEXIBILITY_DAYS
}

impl MeetingWindow {
    /// Flexibility above 14 days is clamped.
    pub fn new(start: NaiveDate, end: Option<NaiveDate>, flexibility_days: u8) -> Result<Self> {
        if let Some(end) = end {
            if end < start {
                return Err(MeetsiteError::InvalidWindow(format!(
                    "end {} is before start {}",
                    end, start
                )));
            }
        }
        Ok(Self {
            start,
            end,
            flexibility_days: flexibility_days.min(MAX_FLEXIBILITY_DAYS),
        })
    }

    pub fn parse(start: &str, end: Option<&str>, flexibility_days: u8) -> Result<Self> {
        let start = parse_date(start)?;
        let end = end.map(parse_date).transpose()?;
        Self::new(start, end, flexibility_days)
    }

    /// Re-checks a window that came from a config file.
    pub fn validated(self) -> Result<Self> {
        Self::new(self.start, self.end, self.flexibility_days)
    }

    /// The date passed to the flight simulator.
    pub fn departure_date(&self) -> NaiveDate {
        self.start
    }

    pub fn last_day(&self) -> NaiveDate {
        self.end.unwrap_or(self.start)
    }

    pub fn earliest_departure(&self) -> NaiveDate {
        self.start - Duration::days(i64::from(self.flexibility_days))
    }

    pub fn latest_return(&self) -> NaiveDate {
        self.last_day() + Duration::days(i64::from(self.flexibility_days))
    }

    /// Nights between the first and last meeting day.
    pub fn nights(&self) -> i64 {
        (self.last_day() - self.start).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_window() {
        let w = MeetingWindow::parse("2026-03-02", Some("2026-03-05"), 3).unwrap();
        assert_eq!(w.departure_date(), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(w.nights(), 3);
        assert_eq!(w.earliest_departure().to_string(), "2026-02-27");
        assert_eq!(w.latest_return().to_string(), "2026-03-08");
    }

    #[test]
    fn test_single_day_window() {
        let w = MeetingWindow::parse("2026-06-30", None, 0).unwrap();
        assert_eq!(w.nights(), 0);
        assert_eq!(w.last_day(), w.start);
        assert_eq!(w.latest_return(), w.start);
    }

    #[test]
    fn test_flexibility_clamped() {
        let w = MeetingWindow::parse("2026-01-10", None, 30).unwrap();
        assert_eq!(w.flexibility_days, MAX_FLEXIBILITY_DAYS);
    }

    #[test]
    fn test_rejects_inverted_window() {
        let err = MeetingWindow::parse("2026-03-05", Some("2026-03-02"), 1).unwrap_err();
        assert!(matches!(err, MeetsiteError::InvalidWindow(_)));
    }

    #[test]
    fn test_rejects_bad_date() {
        let err = parse_date("02/03/2026").unwrap_err();
        assert!(matches!(err, MeetsiteError::InvalidDate(ref s) if s == "02/03/2026"));
    }

    #[test]
    fn test_flexibility_defaults_in_json() {
        let w: MeetingWindow = serde_json::from_str(r#"{ "start": "2026-04-01" }"#).unwrap();
        assert_eq!(w.flexibility_days, DEFAULT_FLEXIBILITY_DAYS);
        assert!(w.end.is_none());
    }
}
