//! The inclusive time window occurrences are enumerated over.

use std::fmt;
use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::{CronError, Result};

/// Textual form of window bounds, at minute resolution.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Fixed-width `YYYY-MM-DD HH:MM` bytes.
///
/// Byte-wise ordering of two keys is chronological ordering, so bounds
/// checks never need to build a date-time.
pub(crate) type StampKey = [u8; 16];

/// Length of the `YYYY-MM-DD` prefix of a [`StampKey`].
const DATE_LEN: usize = 10;

/// An inclusive `[earliest, latest]` window at minute resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeWindow {
    earliest: NaiveDateTime,
    latest: NaiveDateTime,
    earliest_key: StampKey,
    latest_key: StampKey,
}

impl TimeWindow {
    /// Creates a window, dropping any seconds from both bounds.
    ///
    /// # Errors
    ///
    /// Returns [`CronError::InvalidWindow`] if `earliest` is after `latest`
    /// and [`CronError::YearOutOfRange`] for years that do not fit in four
    /// digits.
    pub fn new(earliest: NaiveDateTime, latest: NaiveDateTime) -> Result<Self> {
        let earliest = truncate_to_minute(earliest);
        let latest = truncate_to_minute(latest);

        if earliest > latest {
            return Err(CronError::InvalidWindow { earliest, latest });
        }
        for year in [earliest.year(), latest.year()] {
            if !(0..=9999).contains(&year) {
                return Err(CronError::YearOutOfRange(year));
            }
        }

        Ok(TimeWindow {
            earliest,
            latest,
            earliest_key: key_of(&earliest),
            latest_key: key_of(&latest),
        })
    }

    /// Parses both bounds from `YYYY-MM-DD HH:MM` strings.
    ///
    /// ```rust
    /// use cron_timeline::TimeWindow;
    ///
    /// let window = TimeWindow::parse("2011-10-11 00:00", "2011-10-12 00:00").unwrap();
    /// assert_eq!(window.minutes(), 1441);
    ///
    /// assert!(TimeWindow::parse("2011-10-12 00:00", "2011-10-11 00:00").is_err());
    /// ```
    pub fn parse(earliest: &str, latest: &str) -> Result<Self> {
        TimeWindow::new(parse_timestamp(earliest)?, parse_timestamp(latest)?)
    }

    pub fn earliest(&self) -> NaiveDateTime {
        self.earliest
    }

    pub fn latest(&self) -> NaiveDateTime {
        self.latest
    }

    /// Calendar years touched by the window.
    pub fn years(&self) -> RangeInclusive<i32> {
        self.earliest.year()..=self.latest.year()
    }

    /// Whole minutes in the window, counting both endpoints.
    pub fn minutes(&self) -> usize {
        (self.latest - self.earliest).num_minutes() as usize + 1
    }

    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.earliest <= timestamp && timestamp <= self.latest
    }

    /// Whether any minute of the day in `key` can fall inside the window.
    pub(crate) fn admits_day(&self, key: &StampKey) -> bool {
        let day = &key[..DATE_LEN];
        &self.earliest_key[..DATE_LEN] <= day && day <= &self.latest_key[..DATE_LEN]
    }

    pub(crate) fn admits(&self, key: &StampKey) -> bool {
        &self.earliest_key <= key && key <= &self.latest_key
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.earliest.format(TIMESTAMP_FORMAT),
            self.latest.format(TIMESTAMP_FORMAT)
        )
    }
}

/// Parses a `YYYY-MM-DD HH:MM` timestamp.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|source| {
        CronError::InvalidTimestamp {
            value: value.to_string(),
            source,
        }
    })
}

/// Builds the fixed-width key for a candidate.
///
/// Components must already be valid calendar values: a four digit year and
/// two digit month, day, hour and minute.
pub(crate) fn stamp_key(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> StampKey {
    let mut key = *b"0000-00-00 00:00";
    put_digits(&mut key[0..4], year as u32);
    put_digits(&mut key[5..7], month);
    put_digits(&mut key[8..10], day);
    put_digits(&mut key[11..13], hour);
    put_digits(&mut key[14..16], minute);
    key
}

fn put_digits(slots: &mut [u8], mut value: u32) {
    for slot in slots.iter_mut().rev() {
        *slot = b'0' + (value % 10) as u8;
        value /= 10;
    }
}

fn key_of(timestamp: &NaiveDateTime) -> StampKey {
    stamp_key(
        timestamp.year(),
        timestamp.month(),
        timestamp.day(),
        timestamp.hour(),
        timestamp.minute(),
    )
}

fn truncate_to_minute(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_stamp_key_is_zero_padded() {
        assert_eq!(&stamp_key(2011, 1, 2, 3, 4), b"2011-01-02 03:04");
        assert_eq!(&stamp_key(987, 12, 31, 23, 59), b"0987-12-31 23:59");
    }

    #[test]
    fn test_key_order_matches_time_order() {
        let earlier = key_of(&at(2011, 9, 30, 23, 59));
        let later = key_of(&at(2011, 10, 1, 0, 0));
        assert!(earlier < later);
        assert!(stamp_key(2011, 10, 11, 9, 5) < stamp_key(2011, 10, 11, 10, 0));
    }

    #[test]
    fn test_parse_window() {
        let window = TimeWindow::parse("2011-10-11 00:00", " 2011-10-12 00:00 ").unwrap();
        assert_eq!(window.earliest(), at(2011, 10, 11, 0, 0));
        assert_eq!(window.latest(), at(2011, 10, 12, 0, 0));
        assert_eq!(window.to_string(), "2011-10-11 00:00..2011-10-12 00:00");
    }

    #[test]
    fn test_parse_rejects_bad_timestamp() {
        let err = TimeWindow::parse("2011-10-11", "2011-10-12 00:00").unwrap_err();
        assert!(matches!(err, CronError::InvalidTimestamp { .. }));
    }

    #[test]
    fn test_reversed_window_is_rejected() {
        let err = TimeWindow::new(at(2011, 10, 12, 0, 0), at(2011, 10, 11, 0, 0)).unwrap_err();
        assert!(matches!(err, CronError::InvalidWindow { .. }));
    }

    #[test]
    fn test_single_minute_window() {
        let t = at(2011, 10, 11, 12, 30);
        let window = TimeWindow::new(t, t).unwrap();
        assert_eq!(window.minutes(), 1);
        assert!(window.contains(t));
    }

    #[test]
    fn test_seconds_are_truncated() {
        let start = at(2011, 10, 11, 0, 0).with_second(45).unwrap();
        let end = at(2011, 10, 11, 0, 4).with_second(10).unwrap();
        let window = TimeWindow::new(start, end).unwrap();
        assert_eq!(window.earliest(), at(2011, 10, 11, 0, 0));
        assert_eq!(window.minutes(), 5);
    }

    #[test]
    fn test_minutes_count_both_endpoints() {
        let window = TimeWindow::parse("2011-10-11 01:01", "2011-10-11 01:05").unwrap();
        assert_eq!(window.minutes(), 5);
        let window = TimeWindow::parse("2011-10-11 00:00", "2011-10-13 00:12").unwrap();
        assert_eq!(window.minutes(), 2 * 1440 + 13);
    }

    #[test]
    fn test_years_span() {
        let window = TimeWindow::parse("2011-12-31 23:00", "2013-01-01 00:00").unwrap();
        assert_eq!(window.years(), 2011..=2013);
    }

    #[test]
    fn test_admits_day_and_minute() {
        let window = TimeWindow::parse("2011-10-11 06:00", "2011-10-12 00:00").unwrap();
        assert!(window.admits_day(&stamp_key(2011, 10, 11, 0, 0)));
        assert!(window.admits_day(&stamp_key(2011, 10, 12, 23, 59)));
        assert!(!window.admits_day(&stamp_key(2011, 10, 10, 23, 59)));

        assert!(!window.admits(&stamp_key(2011, 10, 11, 5, 59)));
        assert!(window.admits(&stamp_key(2011, 10, 11, 6, 0)));
        assert!(window.admits(&stamp_key(2011, 10, 12, 0, 0)));
        assert!(!window.admits(&stamp_key(2011, 10, 12, 0, 1)));
    }
}
