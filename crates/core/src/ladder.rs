//! # Slot ladder
//!
//! A ladder is the ordered list of bookable windows every day shares. It is
//! built from the enabled [`SlotConfig`] rows only; overlapping templates are
//! kept as they are and simply listed by start time.

use chrono::{Datelike, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{BookingError, BookingResult},
    models::slot_config::SlotConfig,
    range::DateRange,
};

/// One row of the daily ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// `HH:MM`, 24-hour. Identifies the row inside a day.
    pub key: String,
    /// Start as shown to users, e.g. `07:30 AM`.
    pub display: String,
    /// End as shown to users.
    pub end: String,
    #[serde(with = "crate::models::slot_config::time_of_day")]
    pub start_time: NaiveTime,
    #[serde(with = "crate::models::slot_config::time_of_day")]
    pub end_time: NaiveTime,
}

impl TimeWindow {
    pub fn from_config(config: &SlotConfig) -> Self {
        Self {
            key: config.start_time.format("%H:%M").to_string(),
            display: display_time(config.start_time),
            end: display_time(config.end_time),
            start_time: config.start_time,
            end_time: config.end_time,
        }
    }
}

/// One column of the weekly grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekDay {
    /// `YYYY-MM-DD`.
    pub key: String,
    /// e.g. `Monday - 03/06/2024`.
    pub display: String,
    pub date: NaiveDate,
}

impl WeekDay {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            key: date.format("%Y-%m-%d").to_string(),
            display: date.format("%A - %d/%m/%Y").to_string(),
            date,
        }
    }
}

fn display_time(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

/// Enabled configs, ordered by start time, as ladder rows.
pub fn resolve_ladder(configs: &[SlotConfig]) -> Vec<TimeWindow> {
    let mut enabled: Vec<&SlotConfig> = configs.iter().filter(|config| config.enabled).collect();
    enabled.sort_by_key(|config| config.start_time);
    enabled.into_iter().map(TimeWindow::from_config).collect()
}

fn out_of_calendar(date: NaiveDate) -> BookingError {
    BookingError::Validation(format!("Date {date} is outside the supported calendar"))
}

fn shift_days(date: NaiveDate, days: i64) -> BookingResult<NaiveDate> {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.ok_or_else(|| out_of_calendar(date))
}

/// Monday of the week containing `date`. Sunday counts as the seventh day,
/// so it rolls back six days rather than forward one.
pub fn get_monday(date: NaiveDate) -> BookingResult<NaiveDate> {
    shift_days(date, -i64::from(date.weekday().num_days_from_monday()))
}

pub fn week_days(monday: NaiveDate) -> BookingResult<Vec<WeekDay>> {
    (0..7)
        .map(|offset| shift_days(monday, offset).map(WeekDay::new))
        .collect()
}

pub fn previous_week(monday: NaiveDate) -> BookingResult<NaiveDate> {
    shift_days(monday, -7)
}

pub fn next_week(monday: NaiveDate) -> BookingResult<NaiveDate> {
    shift_days(monday, 7)
}

/// Range fetched for a week view: the week before, the week itself and the
/// week after, so browsing one week either way can be answered from cache.
pub fn fetch_window(monday: NaiveDate) -> BookingResult<DateRange> {
    let start = previous_week(monday)?.and_time(NaiveTime::MIN);
    let end = shift_days(monday, 14)?.and_time(NaiveTime::MIN);
    Ok(DateRange {
        start: Utc.from_utc_datetime(&start),
        end: Utc.from_utc_datetime(&end),
    })
}
