// src/models/window.rs

//! Hourly time windows covering the previous calendar day.
//!
//! The search endpoint caps how many results a single query can page through,
//! so a day is queried one hour at a time. The span is calendar aligned: it
//! runs from 00:00 yesterday to 00:00 today regardless of the current minute.

use std::fmt;

use chrono::{Datelike, NaiveDateTime};

use crate::error::{AppError, Result};

/// Number of windows produced per run.
pub const WINDOWS_PER_DAY: usize = 24;

/// A one-hour query window.
///
/// Hours and days render as zero-padded two-digit strings when formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub hour_from: u32,
    pub hour_to: u32,
    /// Day-of-month of `hour_from`
    pub day1: u32,
    /// Day-of-month of `hour_to`
    pub day2: u32,
}

impl TimeWindow {
    /// Split the day before `now` into 24 contiguous one-hour windows.
    ///
    /// Every window starts on yesterday's date; only the last one ends on
    /// today's date, at hour 00.
    pub fn partition(now: NaiveDateTime) -> Result<Vec<TimeWindow>> {
        let today = now.date();
        let yesterday = today
            .pred_opt()
            .ok_or_else(|| AppError::validation(format!("no calendar day precedes {today}")))?;

        let hours: Vec<u32> = (0..WINDOWS_PER_DAY as u32).chain([0]).collect();
        let days: Vec<u32> = std::iter::repeat_n(yesterday.day(), WINDOWS_PER_DAY)
            .chain([today.day()])
            .collect();

        Ok(hours
            .windows(2)
            .zip(days.windows(2))
            .map(|(h, d)| TimeWindow {
                hour_from: h[0],
                hour_to: h[1],
                day1: d[0],
                day2: d[1],
            })
            .collect())
    }

    /// `date_from` query value under the given `YYYY-MM` prefix.
    pub fn date_from(&self, month: &str) -> String {
        format!("{month}-{:02}T{:02}:00:00", self.day1, self.hour_from)
    }

    /// `date_to` query value under the given `YYYY-MM` prefix.
    pub fn date_to(&self, month: &str) -> String {
        format!("{month}-{:02}T{:02}:00:00", self.day2, self.hour_to)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}/{:02}:00 -> {:02}/{:02}:00",
            self.day1, self.hour_from, self.day2, self.hour_to
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_partition_yields_contiguous_day() {
        let windows = TimeWindow::partition(at(2022, 12, 15, 14, 37)).unwrap();

        assert_eq!(windows.len(), WINDOWS_PER_DAY);
        for pair in windows.windows(2) {
            assert_eq!(pair[0].hour_to, pair[1].hour_from);
        }
        for (i, window) in windows.iter().enumerate() {
            assert_eq!(window.hour_from, i as u32);
        }
    }

    #[test]
    fn test_partition_endpoints() {
        let windows = TimeWindow::partition(at(2022, 12, 15, 9, 0)).unwrap();

        let first = windows.first().unwrap();
        assert_eq!((first.hour_from, first.day1), (0, 14));

        let last = windows.last().unwrap();
        assert_eq!(
            *last,
            TimeWindow {
                hour_from: 23,
                hour_to: 0,
                day1: 14,
                day2: 15
            }
        );

        assert!(windows[..23].iter().all(|w| w.day1 == 14 && w.day2 == 14));
    }

    #[test]
    fn test_partition_ignores_time_of_day() {
        let morning = TimeWindow::partition(at(2022, 12, 15, 0, 1)).unwrap();
        let night = TimeWindow::partition(at(2022, 12, 15, 23, 59)).unwrap();
        assert_eq!(morning, night);
    }

    #[test]
    fn test_partition_across_month_boundary() {
        let windows = TimeWindow::partition(at(2023, 1, 1, 12, 0)).unwrap();
        assert_eq!(windows[0].day1, 31);
        assert_eq!(windows[23].day2, 1);
    }

    #[test]
    fn test_partition_before_min_date_fails() {
        let earliest = NaiveDate::MIN.and_hms_opt(0, 0, 0).unwrap();
        assert!(TimeWindow::partition(earliest).is_err());
    }

    #[test]
    fn test_query_dates_are_zero_padded() {
        let window = TimeWindow {
            hour_from: 5,
            hour_to: 6,
            day1: 3,
            day2: 3,
        };
        assert_eq!(window.date_from("2022-12"), "2022-12-03T05:00:00");
        assert_eq!(window.date_to("2022-12"), "2022-12-03T06:00:00");
    }

    #[test]
    fn test_last_window_dates_roll_to_today() {
        let windows = TimeWindow::partition(at(2022, 12, 10, 8, 0)).unwrap();
        let last = windows[23];
        assert_eq!(last.date_from("2022-12"), "2022-12-09T23:00:00");
        assert_eq!(last.date_to("2022-12"), "2022-12-10T00:00:00");
    }

    #[test]
    fn test_display() {
        let window = TimeWindow {
            hour_from: 23,
            hour_to: 0,
            day1: 9,
            day2: 10,
        };
        assert_eq!(window.to_string(), "09/23:00 -> 10/00:00");
    }
}
