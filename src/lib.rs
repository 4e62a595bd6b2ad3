//! # cron_timeline
//!
//! Expand crontab lines into the timestamps they fire at within a time
//! window, and collapse very frequent jobs into a single timeline event.
//!
//! Nothing is executed or scheduled: a crontab is read, each line is fanned
//! out over `[earliest, latest]` and the result is a list of display events
//! ready to be serialized for a timeline widget.
//!
//! ## Usage
//!
//! Add cron_timeline crate to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! cron_timeline = "0.1"
//! ```
//!
//! The scheduling format is the classic five-field crontab line:
//!
//! ```text
//! min   hour   day of month   month   day of week   command
//! *     *      *              *       *             do_something --now
//! ```
//!
//! Each field accepts a number (`17`), a list (`16,46`), a range (`12-23`),
//! `*` or a step (`*/5`). Day of week counts from Sunday = 0.
//!
//! A simple example:
//!
//! ```rust
//! use cron_timeline::rollup::{Cadence, StyleTable};
//! use cron_timeline::{Crontab, TimeWindow};
//!
//! fn main() -> cron_timeline::Result<()> {
//!     let window = TimeWindow::parse("2011-10-11 00:00", "2011-10-12 00:00")?;
//!     let mut crontab = Crontab::new(window, StyleTable::default());
//!
//!     crontab.load_str(
//!         "* * * * * run_every_minute\n\
//!          */6 * * * * run_every_six_minutes\n\
//!          # comments are skipped\n\
//!          30 2 * * 1-5 nightly_backup",
//!     )?;
//!
//!     // every-minute jobs collapse into one event
//!     assert_eq!(crontab.jobs()[0].cadence, Cadence::EveryMinute);
//!     assert_eq!(crontab.jobs()[0].events.len(), 1);
//!
//!     // everything else gets one event per occurrence
//!     assert_eq!(crontab.jobs()[1].events.len(), 241);
//!
//!     // 2011-10-11 was a Tuesday
//!     assert_eq!(crontab.jobs()[2].events[0].title, "02:30 nightly_backup");
//!
//!     let json = crontab.to_json()?;
//!     assert!(json.starts_with(r#"{"dateTimeFormat":"iso8601","events":["#));
//!     Ok(())
//! }
//! ```

pub mod config;
mod crontab;
mod error;
pub mod fanout;
pub mod field;
mod job;
pub mod rollup;
mod schedule;
mod window;

pub use crate::{
    config::Config,
    crontab::{Crontab, Timeline},
    error::CronError,
    field::{expand, ExpandedField, FieldKind},
    job::CronJob,
    schedule::{is_schedule_line, JobSchedule},
    window::{parse_timestamp, TimeWindow, TIMESTAMP_FORMAT},
};

pub type Result<T> = std::result::Result<T, CronError>;
