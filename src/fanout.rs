//! Occurrence enumeration.
//!
//! A schedule is fanned out over the window as a lazy cross product of
//! year, month, day, hour and minute, in that nesting order. Candidates are
//! bounds-checked on their fixed-width `YYYY-MM-DD HH:MM` key before a
//! date-time is built; a day outside the window's date span drops its whole
//! hour × minute block at once. Day-of-week is a filter over the result, it
//! is never iterated.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::schedule::JobSchedule;
use crate::window::{stamp_key, TimeWindow};

/// Lazily yields every timestamp in `window` matched by `schedule`.
///
/// Timestamps come out in nesting order, which is chronological unless a
/// list token was written out of order. Calendar-invalid combinations such
/// as April 31st or hour 24 are skipped, never rolled over.
///
/// # Examples
///
/// ```rust
/// use cron_timeline::{fanout, JobSchedule, TimeWindow};
///
/// let window = TimeWindow::parse("2011-10-06 00:00", "2011-10-17 23:59").unwrap();
/// let happy_hour = JobSchedule::parse_line("0 17 * * 4,5 launch_happy_hour").unwrap();
///
/// assert_eq!(fanout::occurrences(&happy_hour, &window).count(), 4);
/// ```
pub fn occurrences<'a>(
    schedule: &'a JobSchedule,
    window: &'a TimeWindow,
) -> impl Iterator<Item = NaiveDateTime> + 'a {
    let filter_weekdays = !schedule.weekday.covers_domain();

    days(schedule, window)
        .flat_map(move |date| times_on(date, schedule, window))
        .filter(move |timestamp| {
            !filter_weekdays
                || schedule
                    .weekday
                    .contains(timestamp.weekday().num_days_from_sunday())
        })
}

/// Collects [`occurrences`].
pub fn enumerate(schedule: &JobSchedule, window: &TimeWindow) -> Vec<NaiveDateTime> {
    occurrences(schedule, window).collect()
}

/// Real calendar days matched by the day and month columns that the window
/// reaches.
fn days<'a>(
    schedule: &'a JobSchedule,
    window: &'a TimeWindow,
) -> impl Iterator<Item = NaiveDate> + 'a {
    window.years().flat_map(move |year| {
        schedule.month.iter().flat_map(move |month| {
            schedule.day.iter().filter_map(move |day| {
                if !window.admits_day(&stamp_key(year, month, day, 0, 0)) {
                    return None;
                }
                NaiveDate::from_ymd_opt(year, month, day)
            })
        })
    })
}

fn times_on<'a>(
    date: NaiveDate,
    schedule: &'a JobSchedule,
    window: &'a TimeWindow,
) -> impl Iterator<Item = NaiveDateTime> + 'a {
    let (year, month, day) = (date.year(), date.month(), date.day());

    schedule.hour.iter().flat_map(move |hour| {
        schedule.minute.iter().filter_map(move |minute| {
            if !window.admits(&stamp_key(year, month, day, hour, minute)) {
                return None;
            }
            date.and_hms_opt(hour, minute, 0)
        })
    })
}
