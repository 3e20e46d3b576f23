//! Booking interval model.
//!
//! A booking is stored by the backend as a wall-clock `date` (`YYYY-MM-DD`),
//! a wall-clock `time` (`H:MM` or `HH:MM`) and a duration in minutes. This
//! module turns those three fields into a half-open `[start, end)` interval
//! and never substitutes the current time when one of them is malformed.

use std::fmt;

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Booking;

/// Wire format of booking dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format of booking times (always zero padded)
pub const TIME_FORMAT: &str = "%H:%M";

/// Reasons an interval cannot be built from its parts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    #[error("booking date is missing")]
    MissingDate,
    #[error("booking time is missing")]
    MissingTime,
    #[error("invalid booking date: {0:?}")]
    InvalidDate(String),
    #[error("invalid booking time: {0:?}")]
    InvalidTime(String),
    #[error("unsupported booking duration: {0} minutes (expected 30 or 60)")]
    UnsupportedDuration(u32),
    #[error("{0} does not exist in the local timezone")]
    NonexistentLocalTime(NaiveDateTime),
}

/// The enumerated booking lengths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BookingDuration {
    HalfHour,
    #[default]
    Hour,
}

impl BookingDuration {
    pub const ALL: [BookingDuration; 2] = [BookingDuration::HalfHour, BookingDuration::Hour];

    pub fn minutes(self) -> u32 {
        match self {
            BookingDuration::HalfHour => 30,
            BookingDuration::Hour => 60,
        }
    }

    pub fn as_duration(self) -> Duration {
        Duration::minutes(i64::from(self.minutes()))
    }
}

impl TryFrom<u32> for BookingDuration {
    type Error = IntervalError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        match minutes {
            30 => Ok(BookingDuration::HalfHour),
            60 => Ok(BookingDuration::Hour),
            other => Err(IntervalError::UnsupportedDuration(other)),
        }
    }
}

impl From<BookingDuration> for u32 {
    fn from(duration: BookingDuration) -> Self {
        duration.minutes()
    }
}

impl fmt::Display for BookingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.minutes())
    }
}

/// Parse a `YYYY-MM-DD` date. Surrounding whitespace is ignored.
pub fn parse_date(raw: &str) -> Result<NaiveDate, IntervalError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IntervalError::MissingDate);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| IntervalError::InvalidDate(raw.to_string()))
}

/// Left-pad the hour of an `H:MM` time so it reads `HH:MM`.
///
/// Anything that is not `digits:digits` is returned unchanged and rejected
/// later by [`parse_time`].
pub fn pad_time(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.split_once(':') {
        Some((hours, minutes)) if hours.len() == 1 && hours.chars().all(|c| c.is_ascii_digit()) => {
            format!("0{}:{}", hours, minutes)
        }
        _ => trimmed.to_string(),
    }
}

/// Parse an `H:MM` or `HH:MM` time of day. A trailing `:SS` is accepted
/// because `<input type="time">` may produce one.
pub fn parse_time(raw: &str) -> Result<NaiveTime, IntervalError> {
    let padded = pad_time(raw);
    if padded.is_empty() {
        return Err(IntervalError::MissingTime);
    }

    let invalid = || IntervalError::InvalidTime(raw.to_string());
    let mut parts = padded.split(':');
    let hours = parts.next().ok_or_else(invalid)?;
    let minutes = parts.next().ok_or_else(invalid)?;
    let seconds = parts.next();
    if parts.next().is_some() || hours.len() != 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    if let Some(seconds) = seconds {
        if seconds.len() != 2 || seconds != "00" {
            return Err(invalid());
        }
    }

    NaiveTime::parse_from_str(&format!("{}:{}", hours, minutes), TIME_FORMAT).map_err(|_| invalid())
}

/// Half-open wall-clock interval occupied by a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookingInterval {
    start: NaiveDateTime,
    end: NaiveDateTime,
    duration: BookingDuration,
}

impl BookingInterval {
    /// Build the interval from already typed parts. Fails when the end
    /// falls outside the representable calendar.
    pub fn new(date: NaiveDate, time: NaiveTime, duration: BookingDuration) -> Result<Self, IntervalError> {
        let start = date.and_time(time);
        let end = start
            .checked_add_signed(duration.as_duration())
            .ok_or_else(|| IntervalError::InvalidDate(date.format(DATE_FORMAT).to_string()))?;
        Ok(Self { start, end, duration })
    }

    /// Build the interval from the raw wire fields of a booking.
    pub fn parse(date: &str, time: &str, duration_minutes: u32) -> Result<Self, IntervalError> {
        let date = parse_date(date)?;
        let time = parse_time(time)?;
        let duration = BookingDuration::try_from(duration_minutes)?;
        Self::new(date, time, duration)
    }

    /// Build the interval from optional form values. Absent values are errors.
    pub fn from_parts(
        date: Option<&str>,
        time: Option<&str>,
        duration_minutes: u32,
    ) -> Result<Self, IntervalError> {
        let date = date.ok_or(IntervalError::MissingDate)?;
        let time = time.ok_or(IntervalError::MissingTime)?;
        Self::parse(date, time, duration_minutes)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Exclusive end, rolling over hour and day boundaries.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn duration(&self) -> BookingDuration {
        self.duration
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end()
    }

    /// Two intervals conflict when they share at least one instant.
    /// Back-to-back bookings (`a.end == b.start`) do not conflict.
    pub fn overlaps(&self, other: &BookingInterval) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Resolve the interval to absolute instants in the viewer's timezone.
    pub fn to_local(&self) -> Result<(DateTime<Local>, DateTime<Local>), IntervalError> {
        Ok((resolve_local(self.start)?, resolve_local(self.end())?))
    }

    /// `YYYY-MM-DD` of the start, as sent to the backend
    pub fn wire_date(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// Zero padded `HH:MM` of the start, as sent to the backend
    pub fn wire_time(&self) -> String {
        self.start.format(TIME_FORMAT).to_string()
    }

    /// `YYYY-MM-DDTHH:MM:SS` start, used for calendar event data attributes
    pub fn start_iso(&self) -> String {
        self.start.format("%Y-%m-%dT%H:%M:%S").to_string()
    }

    pub fn end_iso(&self) -> String {
        self.end().format("%Y-%m-%dT%H:%M:%S").to_string()
    }

    /// Short label such as `09:00 - 10:00`
    pub fn time_range_label(&self) -> String {
        format!("{} - {}", self.start.format(TIME_FORMAT), self.end().format(TIME_FORMAT))
    }
}

impl fmt::Display for BookingInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start_iso(), self.end_iso())
    }
}

fn resolve_local(naive: NaiveDateTime) -> Result<DateTime<Local>, IntervalError> {
    // Ambiguous wall-clock times (DST fall-back) take the earlier instant
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or(IntervalError::NonexistentLocalTime(naive))
}

/// First booking on `table_id` whose interval overlaps `candidate`.
///
/// `exclude_id` skips the booking being edited. Bookings whose own interval
/// cannot be built are ignored here; they are reported where they are rendered.
pub fn find_conflict<'a>(
    candidate: &BookingInterval,
    table_id: i64,
    bookings: &'a [Booking],
    exclude_id: Option<i64>,
) -> Option<&'a Booking> {
    bookings
        .iter()
        .filter(|booking| booking.table_id == table_id)
        .filter(|booking| Some(booking.id) != exclude_id)
        .find(|booking| {
            booking
                .interval()
                .map(|existing| existing.overlaps(candidate))
                .unwrap_or(false)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::booking;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_interval_length_matches_duration() {
        for time in ["9:00", "09:00", "14:30", "7:15"] {
            for minutes in [30, 60] {
                let interval = BookingInterval::parse("2025-06-15", time, minutes).unwrap();
                assert_eq!(interval.end() - interval.start(), Duration::minutes(minutes as i64));
                assert!(interval.end() > interval.start());
            }
        }
    }

    #[test]
    fn test_interval_rolls_over_midnight() {
        let interval = BookingInterval::parse("2025-01-01", "23:45", 30).unwrap();
        assert_eq!(interval.start(), at("2025-01-01", "23:45"));
        assert_eq!(interval.end(), at("2025-01-02", "00:15"));
    }

    #[test]
    fn test_interval_rolls_over_year_end() {
        let interval = BookingInterval::parse("2024-12-31", "23:30", 60).unwrap();
        assert_eq!(interval.end(), at("2025-01-01", "00:30"));
    }

    #[test]
    fn test_end_past_last_representable_day_is_rejected() {
        let late = NaiveTime::from_hms_opt(23, 45, 0).unwrap();
        assert!(matches!(
            BookingInterval::new(NaiveDate::MAX, late, BookingDuration::HalfHour),
            Err(IntervalError::InvalidDate(_))
        ));

        let last_day = NaiveDate::MAX.format(DATE_FORMAT).to_string();
        assert!(matches!(
            BookingInterval::parse(&last_day, "23:45", 30),
            Err(IntervalError::InvalidDate(_))
        ));

        let early = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let interval = BookingInterval::new(NaiveDate::MAX, early, BookingDuration::Hour).unwrap();
        assert_eq!(interval.end() - interval.start(), Duration::minutes(60));
    }

    #[test]
    fn test_single_digit_hour_is_padded() {
        assert_eq!(pad_time("9:00"), "09:00");
        assert_eq!(pad_time(" 9:05 "), "09:05");
        assert_eq!(pad_time("10:00"), "10:00");

        let interval = BookingInterval::parse("2025-03-10", "9:00", 60).unwrap();
        assert_eq!(interval.wire_time(), "09:00");
        assert_eq!(interval.start(), at("2025-03-10", "09:00"));
    }

    #[test]
    fn test_time_with_zero_seconds_is_accepted() {
        let interval = BookingInterval::parse("2025-03-10", "09:00:00", 30).unwrap();
        assert_eq!(interval.wire_time(), "09:00");
    }

    #[test]
    fn test_malformed_inputs_fail_explicitly() {
        assert_eq!(
            BookingInterval::parse("", "09:00", 60),
            Err(IntervalError::MissingDate)
        );
        assert_eq!(
            BookingInterval::parse("2025-03-10", "  ", 60),
            Err(IntervalError::MissingTime)
        );
        assert!(matches!(
            BookingInterval::parse("2025-02-30", "09:00", 60),
            Err(IntervalError::InvalidDate(_))
        ));
        assert!(matches!(
            BookingInterval::parse("10/03/2025", "09:00", 60),
            Err(IntervalError::InvalidDate(_))
        ));
        for bad_time in ["25:00", "9", "09:60", "9:5", "nine", "09:00:30", "09:00:00:00"] {
            assert!(
                matches!(
                    BookingInterval::parse("2025-03-10", bad_time, 60),
                    Err(IntervalError::InvalidTime(_))
                ),
                "{bad_time} should be rejected"
            );
        }
        assert_eq!(
            BookingInterval::parse("2025-03-10", "09:00", 45),
            Err(IntervalError::UnsupportedDuration(45))
        );
        assert_eq!(
            BookingInterval::from_parts(None, Some("09:00"), 60),
            Err(IntervalError::MissingDate)
        );
        assert_eq!(
            BookingInterval::from_parts(Some("2025-03-10"), None, 60),
            Err(IntervalError::MissingTime)
        );
    }

    #[test]
    fn test_duration_serializes_as_minutes() {
        assert_eq!(serde_json::to_string(&BookingDuration::HalfHour).unwrap(), "30");
        assert_eq!(serde_json::from_str::<BookingDuration>("60").unwrap(), BookingDuration::Hour);
        assert!(serde_json::from_str::<BookingDuration>("90").is_err());
    }

    #[test]
    fn test_overlap_is_half_open() {
        let nine = BookingInterval::parse("2025-03-10", "09:00", 60).unwrap();
        let nine_thirty = BookingInterval::parse("2025-03-10", "09:30", 30).unwrap();
        let ten = BookingInterval::parse("2025-03-10", "10:00", 60).unwrap();
        let other_day = BookingInterval::parse("2025-03-11", "09:00", 60).unwrap();

        assert!(nine.overlaps(&nine_thirty));
        assert!(nine_thirty.overlaps(&nine));
        assert!(!nine.overlaps(&ten));
        assert!(!ten.overlaps(&nine));
        assert!(!nine.overlaps(&other_day));
        assert!(nine.contains(at("2025-03-10", "09:59")));
        assert!(!nine.contains(at("2025-03-10", "10:00")));
    }

    #[test]
    fn test_find_conflict_respects_table_and_exclusion() {
        let bookings = vec![
            booking(1, 1, "2025-03-10", "09:00", 60),
            booking(2, 2, "2025-03-10", "09:00", 60),
            booking(3, 1, "2025-03-10", "not-a-time", 60),
        ];
        let candidate = BookingInterval::parse("2025-03-10", "9:30", 30).unwrap();

        assert_eq!(find_conflict(&candidate, 1, &bookings, None).map(|b| b.id), Some(1));
        assert_eq!(find_conflict(&candidate, 2, &bookings, None).map(|b| b.id), Some(2));
        assert!(find_conflict(&candidate, 1, &bookings, Some(1)).is_none());
        assert!(find_conflict(&candidate, 3, &bookings, None).is_none());
    }

    #[test]
    fn test_wire_and_display_formats() {
        let interval = BookingInterval::parse("2025-03-10", "9:00", 60).unwrap();
        assert_eq!(interval.wire_date(), "2025-03-10");
        assert_eq!(interval.start_iso(), "2025-03-10T09:00:00");
        assert_eq!(interval.end_iso(), "2025-03-10T10:00:00");
        assert_eq!(interval.time_range_label(), "09:00 - 10:00");
        assert_eq!(interval.to_string(), "[2025-03-10T09:00:00, 2025-03-10T10:00:00)");
    }

    #[test]
    fn test_to_local_keeps_length() {
        let interval = BookingInterval::parse("2025-03-10", "12:00", 30).unwrap();
        let (start, end) = interval.to_local().unwrap();
        assert_eq!(end - start, Duration::minutes(30));
    }
}
