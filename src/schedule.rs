//! Parsed crontab lines.

use std::str::FromStr;

use crate::field::{expand, ExpandedField, FieldKind};
use crate::{CronError, Result};

/// The five expanded schedule columns of one crontab line plus its command.
///
/// A schedule is built once per line and never changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobSchedule {
    pub minute: ExpandedField,
    pub hour: ExpandedField,
    pub day: ExpandedField,
    pub month: ExpandedField,
    pub weekday: ExpandedField,
    /// Everything after the fifth column, verbatim.
    pub command: String,
}

impl JobSchedule {
    /// Expands the five column tokens, in crontab order.
    pub fn new(tokens: [&str; 5], command: impl Into<String>) -> Result<Self> {
        let [minute, hour, day, month, weekday] = tokens;
        Ok(JobSchedule {
            minute: expand(FieldKind::Minute, minute)?,
            hour: expand(FieldKind::Hour, hour)?,
            day: expand(FieldKind::Day, day)?,
            month: expand(FieldKind::Month, month)?,
            weekday: expand(FieldKind::Weekday, weekday)?,
            command: command.into(),
        })
    }

    /// `*/5 * * * *`, used to count five-minute marks in a window.
    pub fn every_five_minutes() -> Self {
        JobSchedule {
            minute: ExpandedField::every(FieldKind::Minute, 5),
            hour: ExpandedField::full(FieldKind::Hour),
            day: ExpandedField::full(FieldKind::Day),
            month: ExpandedField::full(FieldKind::Month),
            weekday: ExpandedField::full(FieldKind::Weekday),
            command: String::new(),
        }
    }

    /// Parses `min hour day month weekday command...`.
    ///
    /// Columns are separated by any run of whitespace. The command keeps its
    /// inner whitespace and may be empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cron_timeline::JobSchedule;
    ///
    /// let job = JobSchedule::parse_line("17-21 */3 11 10 * backup.sh --full  /srv").unwrap();
    /// assert_eq!(job.minute.values(), &[17, 18, 19, 20, 21]);
    /// assert_eq!(job.hour.values(), &[0, 3, 6, 9, 12, 15, 18, 21]);
    /// assert_eq!(job.command, "backup.sh --full  /srv");
    /// ```
    pub fn parse_line(line: &str) -> Result<Self> {
        let mut rest = line.trim();
        let mut tokens = [""; 5];

        for (found, slot) in tokens.iter_mut().enumerate() {
            if rest.is_empty() {
                return Err(CronError::MissingFields {
                    found,
                    line: line.to_string(),
                });
            }
            let (token, tail) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            *slot = token;
            rest = tail.trim_start();
        }

        JobSchedule::new(tokens, rest)
    }
}

impl FromStr for JobSchedule {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self> {
        JobSchedule::parse_line(s)
    }
}

/// Whether a crontab line carries a schedule.
///
/// Only lines starting with a digit or `*` do; blanks, comments and
/// environment assignments are skipped.
pub fn is_schedule_line(line: &str) -> bool {
    matches!(line.trim_start().bytes().next(), Some(b'0'..=b'9' | b'*'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let job = JobSchedule::parse_line("*/5 5,6,7 11 10 2 do_some_stuff").unwrap();
        assert_eq!(job.minute.len(), 12);
        assert_eq!(job.hour.values(), &[5, 6, 7]);
        assert_eq!(job.day.values(), &[11]);
        assert_eq!(job.month.values(), &[10]);
        assert_eq!(job.weekday.values(), &[2]);
        assert_eq!(job.command, "do_some_stuff");
    }

    #[test]
    fn test_command_keeps_inner_whitespace() {
        let job: JobSchedule = "0\t17  * * 4,5   launch happy\thour  ".parse().unwrap();
        assert_eq!(job.command, "launch happy\thour");
    }

    #[test]
    fn test_missing_command_is_allowed() {
        let job = JobSchedule::parse_line("* * * * *").unwrap();
        assert_eq!(job.command, "");
    }

    #[test]
    fn test_missing_fields() {
        let err = JobSchedule::parse_line("* * 11").unwrap_err();
        match err {
            CronError::MissingFields { found, line } => {
                assert_eq!(found, 3);
                assert_eq!(line, "* * 11");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_token_reports_field() {
        let err = JobSchedule::parse_line("* 1-2/2 * * * job").unwrap_err();
        assert!(matches!(
            err,
            CronError::InvalidToken {
                field: FieldKind::Hour,
                ..
            }
        ));
    }

    #[test]
    fn test_every_five_minutes() {
        let job = JobSchedule::every_five_minutes();
        assert_eq!(
            job.minute.values(),
            &[0, 5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55]
        );
        assert_eq!(job, JobSchedule::parse_line("*/5 * * * *").unwrap());
    }

    #[test]
    fn test_is_schedule_line() {
        assert!(is_schedule_line("* * * * * job"));
        assert!(is_schedule_line("  17 * * * * job"));
        assert!(!is_schedule_line("# 17 * * * * job"));
        assert!(!is_schedule_line("MAILTO=root"));
        assert!(!is_schedule_line("   "));
        assert!(!is_schedule_line("@daily job"));
    }
}
