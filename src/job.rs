//! Expanded job types.
//!
//! This module defines the data structures used to represent one crontab
//! line after it has been fanned out over a time window.

use chrono::NaiveDateTime;

use crate::fanout;
use crate::rollup::{Cadence, DisplayEvent, RollupClassifier};
use crate::schedule::JobSchedule;
use crate::window::TimeWindow;

/// A crontab line together with everything computed from it for one window.
///
/// # Note
///
/// This type is primarily built by [`Crontab`](crate::Crontab) and is not
/// typically constructed directly by user code.
#[derive(Clone, Debug, PartialEq)]
pub struct CronJob {
    /// Position of the job in its crontab, starting at zero.
    ///
    /// Comment and blank lines do not take an id.
    pub id: usize,

    /// The parsed schedule the occurrences were generated from.
    pub schedule: JobSchedule,

    /// Every timestamp in the window the job fires at, in enumeration order.
    pub times: Vec<NaiveDateTime>,

    /// How [`events`](Self::events) were built.
    pub cadence: Cadence,

    /// Display events: one per occurrence, or a single rollup event.
    pub events: Vec<DisplayEvent>,
}

impl CronJob {
    /// Fans `schedule` out over `window` and classifies the result.
    ///
    /// `classifier` must have been built for the same window, otherwise the
    /// cadence comparison is meaningless.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cron_timeline::rollup::{Cadence, RollupClassifier, StyleTable};
    /// use cron_timeline::{CronJob, JobSchedule, TimeWindow};
    ///
    /// let window = TimeWindow::parse("2011-10-11 00:00", "2011-10-12 00:00").unwrap();
    /// let classifier = RollupClassifier::new(&window, StyleTable::default());
    ///
    /// let schedule = JobSchedule::parse_line("*/5 * * * * poll_queue").unwrap();
    /// let job = CronJob::build(0, schedule, &window, &classifier);
    ///
    /// assert_eq!(job.times.len(), 289);
    /// assert_eq!(job.cadence, Cadence::EveryFiveMinutes);
    /// assert_eq!(job.events.len(), 1);
    /// ```
    pub fn build(
        id: usize,
        schedule: JobSchedule,
        window: &TimeWindow,
        classifier: &RollupClassifier,
    ) -> Self {
        let times = fanout::enumerate(&schedule, window);
        let cadence = classifier.classify(times.len());
        let events = classifier.events(cadence, &schedule.command, &times);

        tracing::debug!(
            id,
            command = %schedule.command,
            occurrences = times.len(),
            ?cadence,
            "expanded job"
        );

        CronJob {
            id,
            schedule,
            times,
            cadence,
            events,
        }
    }

    pub fn command(&self) -> &str {
        &self.schedule.command
    }

    pub fn is_rolled_up(&self) -> bool {
        self.cadence != Cadence::None
    }
}
