//! Time grid model of the calendar page.
//!
//! The grid shows one column per visible day (a Monday-first week, or a
//! single day on narrow screens) and one row per slot
//! between `day_start` and `day_end`. Bookings become [`CalendarEvent`]s only
//! when their interval parses; placement is computed in slot units so the
//! view can turn it into CSS offsets.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::interval::{DATE_FORMAT, TIME_FORMAT};
use crate::{Booking, BookingClass, BookingInterval, IntervalError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarConfig {
    pub day_start: NaiveTime,
    pub day_end: NaiveTime,
    pub slot_minutes: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            day_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            day_end: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or_default(),
            slot_minutes: 30,
        }
    }
}

impl CalendarConfig {
    pub fn slot_count(&self) -> usize {
        if self.slot_minutes == 0 || self.day_end <= self.day_start {
            return 0;
        }
        let minutes = (self.day_end - self.day_start).num_minutes();
        (minutes / i64::from(self.slot_minutes)) as usize
    }

    /// Start times of every visible slot
    pub fn time_slots(&self) -> Vec<NaiveTime> {
        let step = Duration::minutes(i64::from(self.slot_minutes));
        (0..self.slot_count())
            .map(|index| self.day_start + step * index as i32)
            .collect()
    }

    fn minutes_to_slots(&self, minutes: i64) -> f64 {
        minutes as f64 / f64::from(self.slot_minutes)
    }
}

/// The Monday starting the week that contains `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Monday..Sunday of the week containing `date`
pub fn week_of(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = week_start(date);
    let mut days = [monday; 7];
    for (offset, day) in days.iter_mut().enumerate() {
        *day = monday + Duration::days(offset as i64);
    }
    days
}

pub fn shift_weeks(date: NaiveDate, weeks: i64) -> NaiveDate {
    date + Duration::weeks(weeks)
}

/// `10 Mar - 16 Mar 2025`
pub fn week_label(date: NaiveDate) -> String {
    let days = week_of(date);
    format!("{} - {}", days[0].format("%-d %b"), days[6].format("%-d %b %Y"))
}

/// Narrowest viewport, in CSS pixels, that opens on the week grid
pub const WEEK_VIEW_MIN_WIDTH: f64 = 768.0;

/// Span of days shown by the time grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarView {
    Week,
    Day,
}

impl CalendarView {
    pub const ALL: [CalendarView; 2] = [CalendarView::Week, CalendarView::Day];

    /// Initial view for a viewport `width` pixels wide
    pub fn for_viewport(width: f64) -> Self {
        if width < WEEK_VIEW_MIN_WIDTH {
            CalendarView::Day
        } else {
            CalendarView::Week
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            CalendarView::Week => "Week",
            CalendarView::Day => "Day",
        }
    }

    /// Columns of the grid around `anchor`
    pub fn days(self, anchor: NaiveDate) -> Vec<NaiveDate> {
        match self {
            CalendarView::Week => week_of(anchor).to_vec(),
            CalendarView::Day => vec![anchor],
        }
    }

    /// Move `anchor` by `steps` whole views
    pub fn shift(self, anchor: NaiveDate, steps: i64) -> NaiveDate {
        match self {
            CalendarView::Week => shift_weeks(anchor, steps),
            CalendarView::Day => anchor + Duration::days(steps),
        }
    }

    pub fn label(self, anchor: NaiveDate) -> String {
        match self {
            CalendarView::Week => week_label(anchor),
            CalendarView::Day => anchor.format("%A, %-d %b %Y").to_string(),
        }
    }
}

/// Wire values pre-filled into the booking form when a slot is clicked
pub fn slot_values(date: NaiveDate, time: NaiveTime) -> (String, String) {
    (
        date.format(DATE_FORMAT).to_string(),
        time.format(TIME_FORMAT).to_string(),
    )
}

/// A booking that can be drawn on the grid
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    pub class: BookingClass,
    pub interval: BookingInterval,
    pub booking: Booking,
}

impl CalendarEvent {
    pub fn from_booking(booking: &Booking) -> Result<Self, IntervalError> {
        let interval = booking.interval()?;
        Ok(Self {
            id: booking.id,
            title: booking.title(),
            class: booking.class(),
            interval,
            booking: booking.clone(),
        })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.interval.start()
    }

    pub fn end(&self) -> NaiveDateTime {
        self.interval.end()
    }
}

/// Convert every booking, returning the renderable events and the bookings
/// that were skipped together with the reason.
pub fn build_events(bookings: &[Booking]) -> (Vec<CalendarEvent>, Vec<(i64, IntervalError)>) {
    let mut events = Vec::with_capacity(bookings.len());
    let mut skipped = Vec::new();
    for booking in bookings {
        match CalendarEvent::from_booking(booking) {
            Ok(event) => events.push(event),
            Err(err) => skipped.push((booking.id, err)),
        }
    }
    (events, skipped)
}

/// An event positioned inside one day column, in slot units
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEvent {
    pub event: CalendarEvent,
    pub top: f64,
    pub height: f64,
    /// Column inside the day for side by side events
    pub lane: usize,
    pub lanes: usize,
}

/// Events of `date` clipped to the visible hours, ordered by start.
///
/// Events that overlap each other share the day column in lanes. An event
/// running past midnight is drawn on its start day only.
pub fn events_for_day(date: NaiveDate, events: &[CalendarEvent], config: &CalendarConfig) -> Vec<PlacedEvent> {
    let visible_start = date.and_time(config.day_start);
    let visible_end = date.and_time(config.day_end);

    let mut day_events: Vec<&CalendarEvent> = events
        .iter()
        .filter(|event| event.interval.date() == date)
        .filter(|event| event.start() < visible_end && event.end() > visible_start)
        .collect();
    day_events.sort_by_key(|event| (event.start(), event.id));

    let mut placed: Vec<PlacedEvent> = Vec::with_capacity(day_events.len());
    // Ends of the events currently occupying each lane of the open cluster
    let mut lane_ends: Vec<NaiveDateTime> = Vec::new();
    let mut cluster_start = 0;

    for event in day_events {
        let cluster_open = lane_ends.iter().any(|end| *end > event.start());
        if !cluster_open {
            close_cluster(&mut placed[cluster_start..], lane_ends.len());
            cluster_start = placed.len();
            lane_ends.clear();
        }

        let lane = match lane_ends.iter().position(|end| *end <= event.start()) {
            Some(free) => {
                lane_ends[free] = event.end();
                free
            }
            None => {
                lane_ends.push(event.end());
                lane_ends.len() - 1
            }
        };

        let top_at = event.start().max(visible_start);
        let bottom_at = event.end().min(visible_end);
        placed.push(PlacedEvent {
            event: event.clone(),
            top: config.minutes_to_slots((top_at - visible_start).num_minutes()),
            height: config.minutes_to_slots((bottom_at - top_at).num_minutes()),
            lane,
            lanes: 1,
        });
    }
    close_cluster(&mut placed[cluster_start..], lane_ends.len());

    placed
}

fn close_cluster(cluster: &mut [PlacedEvent], lanes: usize) {
    for event in cluster {
        event.lanes = lanes.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::booking;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    fn events(bookings: &[Booking]) -> Vec<CalendarEvent> {
        let (events, skipped) = build_events(bookings);
        assert!(skipped.is_empty());
        events
    }

    #[test]
    fn test_week_starts_on_monday() {
        let days = week_of(date("2025-03-12"));
        assert_eq!(days[0], date("2025-03-10"));
        assert_eq!(days[6], date("2025-03-16"));
        assert_eq!(week_of(date("2025-03-16"))[0], date("2025-03-10"));
        assert_eq!(week_of(date("2025-03-10"))[0], date("2025-03-10"));
        assert_eq!(shift_weeks(date("2025-03-10"), -1), date("2025-03-03"));
        assert_eq!(week_label(date("2025-03-12")), "10 Mar - 16 Mar 2025");
    }

    #[test]
    fn test_day_view_for_narrow_screens() {
        assert_eq!(CalendarView::for_viewport(375.0), CalendarView::Day);
        assert_eq!(CalendarView::for_viewport(767.0), CalendarView::Day);
        assert_eq!(CalendarView::for_viewport(768.0), CalendarView::Week);

        let anchor = date("2025-03-12");
        assert_eq!(CalendarView::Day.days(anchor), vec![anchor]);
        assert_eq!(CalendarView::Week.days(anchor).len(), 7);
        assert_eq!(CalendarView::Day.shift(anchor, 1), date("2025-03-13"));
        assert_eq!(CalendarView::Week.shift(anchor, 1), date("2025-03-19"));
        assert_eq!(CalendarView::Day.label(anchor), "Wednesday, 12 Mar 2025");
    }

    #[test]
    fn test_default_slots() {
        let config = CalendarConfig::default();
        let slots = config.time_slots();
        assert_eq!(slots.len(), 28);
        assert_eq!(slots[0], NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(slots[27], NaiveTime::from_hms_opt(21, 30, 0).unwrap());
        assert_eq!(
            slot_values(date("2025-03-10"), slots[2]),
            ("2025-03-10".to_string(), "09:00".to_string())
        );
    }

    #[test]
    fn test_invalid_bookings_are_skipped_not_defaulted() {
        let bookings = vec![
            booking(1, 1, "2025-03-10", "9:00", 60),
            booking(2, 1, "2025-03-10", "", 60),
            booking(3, 1, "2025-03-10", "10:00", 45),
        ];
        let (events, skipped) = build_events(&bookings);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Anna Schmidt - Table 1");
        assert_eq!(
            skipped,
            vec![
                (2, IntervalError::MissingTime),
                (3, IntervalError::UnsupportedDuration(45))
            ]
        );
    }

    #[test]
    fn test_events_are_placed_in_slot_units() {
        let config = CalendarConfig::default();
        let events = events(&[
            booking(1, 1, "2025-03-10", "09:00", 60),
            booking(2, 1, "2025-03-10", "12:30", 30),
            booking(3, 1, "2025-03-11", "09:00", 60),
        ]);

        let placed = events_for_day(date("2025-03-10"), &events, &config);
        assert_eq!(placed.len(), 2);
        assert_eq!((placed[0].top, placed[0].height), (2.0, 2.0));
        assert_eq!((placed[1].top, placed[1].height), (9.0, 1.0));
        assert!(placed.iter().all(|event| event.lanes == 1));
    }

    #[test]
    fn test_overlapping_events_share_lanes() {
        let config = CalendarConfig::default();
        let events = events(&[
            booking(1, 1, "2025-03-10", "09:00", 60),
            booking(2, 2, "2025-03-10", "09:30", 60),
            booking(3, 3, "2025-03-10", "10:00", 30),
            booking(4, 1, "2025-03-10", "14:00", 60),
        ]);

        let placed = events_for_day(date("2025-03-10"), &events, &config);
        let lanes: Vec<(i64, usize, usize)> = placed
            .iter()
            .map(|event| (event.event.id, event.lane, event.lanes))
            .collect();
        assert_eq!(lanes, vec![(1, 0, 2), (2, 1, 2), (3, 0, 2), (4, 0, 1)]);
    }

    #[test]
    fn test_events_outside_visible_hours_are_clipped() {
        let config = CalendarConfig::default();
        let events = events(&[
            booking(1, 1, "2025-03-10", "07:30", 60),
            booking(2, 1, "2025-03-10", "21:30", 60),
            booking(3, 1, "2025-03-10", "06:00", 60),
        ]);

        let placed = events_for_day(date("2025-03-10"), &events, &config);
        assert_eq!(placed.len(), 2);
        assert_eq!((placed[0].top, placed[0].height), (0.0, 1.0));
        assert_eq!((placed[1].top, placed[1].height), (27.0, 1.0));
    }
}
