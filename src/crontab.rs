//! A whole crontab expanded over one time window.
//!
//! [`Crontab`] owns the window, the rollup classifier computed for it and
//! the jobs loaded so far. Jobs can be enumerated on worker threads: the
//! schedules are parsed up front, handed out over a channel and collected
//! back in line order.

use std::path::Path;

use serde::Serialize;

use crate::job::CronJob;
use crate::rollup::{DisplayEvent, RollupClassifier, StyleTable};
use crate::schedule::{is_schedule_line, JobSchedule};
use crate::window::TimeWindow;
use crate::{CronError, Result};

/// Expanded crontab jobs for one time window.
///
/// # Examples
///
/// ```rust
/// use cron_timeline::rollup::StyleTable;
/// use cron_timeline::{Crontab, TimeWindow};
///
/// let window = TimeWindow::parse("2011-10-11 00:00", "2011-10-12 00:00").unwrap();
/// let mut crontab = Crontab::new(window, StyleTable::default());
///
/// crontab
///     .load_str("# nightly jobs\n17-21 */3 11 10 * do_some_stuff\n* * 11 10 * do_other_stuff")
///     .unwrap();
///
/// assert_eq!(crontab.jobs().len(), 2);
/// assert_eq!(crontab.jobs()[0].times.len(), 40);
/// assert_eq!(crontab.jobs()[1].times.len(), 1440);
/// ```
#[derive(Clone, Debug)]
pub struct Crontab {
    /// The window every job is enumerated over
    window: TimeWindow,
    /// Cadence counts and styles for `window`
    classifier: RollupClassifier,
    /// Worker threads used for enumeration; one means the calling thread
    threads: usize,
    /// Jobs in line order
    jobs: Vec<CronJob>,
}

impl Crontab {
    /// Creates an empty crontab for `window`.
    ///
    /// The window's cadence counts are computed here, once, before any job
    /// is loaded.
    pub fn new(window: TimeWindow, styles: StyleTable) -> Crontab {
        let classifier = RollupClassifier::new(&window, styles);
        Crontab {
            window,
            classifier,
            threads: 1,
            jobs: Vec::new(),
        }
    }

    /// Sets how many worker threads enumerate jobs.
    ///
    /// Without the `parallel` feature jobs are always enumerated on the
    /// calling thread. The resulting jobs are the same either way.
    pub fn with_threads(mut self, threads: usize) -> Crontab {
        self.threads = threads.max(1);
        self
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    pub fn classifier(&self) -> &RollupClassifier {
        &self.classifier
    }

    pub fn jobs(&self) -> &[CronJob] {
        &self.jobs
    }

    /// Adds a single crontab line.
    ///
    /// Returns the new job's id, or `None` if the line carries no schedule
    /// (blank, comment or variable assignment).
    ///
    /// # Errors
    ///
    /// Returns [`CronError::MissingFields`] or [`CronError::InvalidToken`]
    /// if the line cannot be parsed.
    pub fn add_line(&mut self, line: &str) -> Result<Option<usize>> {
        if !is_schedule_line(line) {
            return Ok(None);
        }
        let id = self.jobs.len();
        let schedule = JobSchedule::parse_line(line)?;
        self.jobs
            .push(CronJob::build(id, schedule, &self.window, &self.classifier));
        Ok(Some(id))
    }

    /// Adds every schedule line of `input` and returns how many were added.
    ///
    /// All lines are parsed before any is enumerated, so a bad line leaves
    /// the crontab unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CronError::Line`] carrying the 1-based line number of the
    /// first line that fails to parse.
    pub fn load_str(&mut self, input: &str) -> Result<usize> {
        let first_id = self.jobs.len();
        let mut schedules = Vec::new();
        let mut skipped = 0;

        for (index, line) in input.lines().enumerate() {
            if !is_schedule_line(line) {
                tracing::trace!(line = index + 1, "skipping non-schedule line");
                skipped += 1;
                continue;
            }
            let schedule = JobSchedule::parse_line(line).map_err(|e| CronError::Line {
                line: index + 1,
                source: Box::new(e),
            })?;
            schedules.push((first_id + schedules.len(), schedule));
        }

        let added = schedules.len();
        let jobs = self.build_jobs(schedules);
        self.jobs.extend(jobs);

        tracing::info!(
            window = %self.window,
            jobs = added,
            skipped,
            threads = self.threads,
            "loaded crontab"
        );
        Ok(added)
    }

    /// Reads a crontab file and loads it with [`load_str`](Self::load_str).
    ///
    /// # Errors
    ///
    /// Returns [`CronError::Io`] if the file cannot be read.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| CronError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_str(&input)
    }

    /// All display events of all jobs, sorted by title.
    ///
    /// The sort is stable, so events with equal titles stay in job order.
    pub fn events(&self) -> Vec<&DisplayEvent> {
        let mut events: Vec<&DisplayEvent> =
            self.jobs.iter().flat_map(|job| job.events.iter()).collect();
        events.sort_by(|a, b| a.title.cmp(&b.title));
        events
    }

    /// The serializable timeline document.
    pub fn timeline(&self) -> Timeline<'_> {
        Timeline {
            date_time_format: "iso8601",
            events: self.events(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.timeline())?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.timeline())?)
    }

    #[cfg(feature = "parallel")]
    fn build_jobs(&self, schedules: Vec<(usize, JobSchedule)>) -> Vec<CronJob> {
        if self.threads > 1 && schedules.len() > 1 {
            self.build_parallel(schedules)
        } else {
            self.build_serial(schedules)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn build_jobs(&self, schedules: Vec<(usize, JobSchedule)>) -> Vec<CronJob> {
        self.build_serial(schedules)
    }

    fn build_serial(&self, schedules: Vec<(usize, JobSchedule)>) -> Vec<CronJob> {
        schedules
            .into_iter()
            .map(|(id, schedule)| CronJob::build(id, schedule, &self.window, &self.classifier))
            .collect()
    }

    /// Enumerates jobs on scoped worker threads.
    ///
    /// Workers pull schedules from a shared queue and push finished jobs
    /// back; the jobs are re-sorted by id once every worker has exited.
    #[cfg(feature = "parallel")]
    fn build_parallel(&self, schedules: Vec<(usize, JobSchedule)>) -> Vec<CronJob> {
        let workers = self.threads.min(schedules.len());
        let (work_tx, work_rx) = crossbeam_channel::unbounded::<(usize, JobSchedule)>();
        let (done_tx, done_rx) = crossbeam_channel::unbounded::<CronJob>();

        for item in schedules {
            // The receiver is still held here, so the queue cannot be closed.
            let _ = work_tx.send(item);
        }
        drop(work_tx);

        std::thread::scope(|scope| {
            for _ in 0..workers {
                let work_rx = work_rx.clone();
                let done_tx = done_tx.clone();
                scope.spawn(move || {
                    for (id, schedule) in work_rx.iter() {
                        let job = CronJob::build(id, schedule, &self.window, &self.classifier);
                        if done_tx.send(job).is_err() {
                            return;
                        }
                    }
                });
            }
        });
        drop(done_tx);

        let mut jobs: Vec<CronJob> = done_rx.iter().collect();
        jobs.sort_by_key(|job| job.id);
        tracing::debug!(workers, jobs = jobs.len(), "enumerated jobs in parallel");
        jobs
    }
}

/// The document handed to a timeline renderer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline<'a> {
    pub date_time_format: &'static str,
    pub events: Vec<&'a DisplayEvent>,
}
