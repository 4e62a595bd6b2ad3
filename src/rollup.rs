//! Rollup of high-frequency jobs into single display events.
//!
//! A job that fires on every minute (or every five-minute mark) of the
//! window would flood a timeline with hundreds of point events. Such jobs
//! are recognised by their occurrence count alone: the window's cadence
//! counts are computed once, and a job whose count equals one of them is
//! collapsed into one event spanning its first and last occurrence.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fanout;
use crate::schedule::JobSchedule;
use crate::window::TimeWindow;

/// Event keys filled in from the occurrence itself; styles cannot override them.
const COMPUTED_KEYS: [&str; 4] = ["start", "end", "title", "description"];

/// How a job's occurrences are displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cadence {
    /// One point event per occurrence.
    None,
    EveryMinute,
    EveryFiveMinutes,
}

/// Occurrence counts of an every-minute and an every-five-minute job over
/// one window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CadenceCounts {
    pub every_minute: usize,
    pub every_five_minutes: usize,
}

impl CadenceCounts {
    /// Counts both cadences for `window`.
    ///
    /// Five-minute marks are counted by fanning `*/5 * * * *` out over the
    /// window, so a window that starts or ends between marks is handled the
    /// same way any job would be.
    pub fn for_window(window: &TimeWindow) -> Self {
        CadenceCounts {
            every_minute: window.minutes(),
            every_five_minutes: fanout::occurrences(&JobSchedule::every_five_minutes(), window)
                .count(),
        }
    }

    /// Classifies a job by its occurrence count.
    ///
    /// The minute cadence is checked first: in a window too short to tell
    /// the two apart, a matching count rolls up as [`Cadence::EveryMinute`].
    /// A job with no occurrences is never rolled up.
    pub fn classify(&self, count: usize) -> Cadence {
        if count == 0 {
            Cadence::None
        } else if count == self.every_minute {
            Cadence::EveryMinute
        } else if count == self.every_five_minutes {
            Cadence::EveryFiveMinutes
        } else {
            Cadence::None
        }
    }
}

/// Display attributes merged into events, plus an optional title prefix
/// for rollup events.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title_prefix: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Style {
    pub fn new(title_prefix: impl Into<String>, attributes: Map<String, Value>) -> Self {
        Style {
            title_prefix: title_prefix.into(),
            attributes,
        }
    }
}

/// The styles used for one timeline, keyed by [`Cadence`].
///
/// Every event gets `default`; rollup events additionally get the style of
/// their cadence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleTable {
    pub default: Style,
    pub every_minute: Style,
    pub every_five_minutes: Style,
}

impl StyleTable {
    /// The cadence-specific style, if the cadence rolls up.
    pub fn rollup(&self, cadence: Cadence) -> Option<&Style> {
        match cadence {
            Cadence::None => None,
            Cadence::EveryMinute => Some(&self.every_minute),
            Cadence::EveryFiveMinutes => Some(&self.every_five_minutes),
        }
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        StyleTable {
            default: Style::new(
                "",
                attributes([
                    ("color", Value::from("#7FFFD4")),
                    ("textColor", Value::from("#000000")),
                    ("classname", Value::from("default")),
                    ("durationEvent", Value::Bool(false)),
                ]),
            ),
            every_minute: Style::new(
                "Every minute: ",
                attributes([
                    ("color", Value::from("#f00")),
                    ("durationEvent", Value::Bool(true)),
                ]),
            ),
            every_five_minutes: Style::new(
                "Every five minutes: ",
                attributes([
                    ("color", Value::from("#fa0")),
                    ("durationEvent", Value::Bool(true)),
                ]),
            ),
        }
    }
}

fn attributes<const N: usize>(pairs: [(&str, Value); N]) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// One entry of the rendered timeline.
///
/// Point events have no `end`. Style attributes are flattened next to the
/// computed fields when serialized.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DisplayEvent {
    pub start: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Turns a job's occurrences into display events for one window.
///
/// Built once per window; the cadence counts and styles it holds are
/// read-only afterwards.
#[derive(Clone, Debug)]
pub struct RollupClassifier {
    counts: CadenceCounts,
    styles: StyleTable,
}

impl RollupClassifier {
    pub fn new(window: &TimeWindow, styles: StyleTable) -> Self {
        let counts = CadenceCounts::for_window(window);
        tracing::debug!(
            %window,
            every_minute = counts.every_minute,
            every_five_minutes = counts.every_five_minutes,
            "computed cadence counts"
        );
        RollupClassifier { counts, styles }
    }

    pub fn counts(&self) -> CadenceCounts {
        self.counts
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    pub fn classify(&self, count: usize) -> Cadence {
        self.counts.classify(count)
    }

    /// Builds the events for `times` displayed with `cadence`.
    ///
    /// A rollup is titled with the cadence's prefix followed by the command
    /// and spans the first to the last occurrence. Otherwise each occurrence
    /// becomes a point event titled `HH:MM <command>`.
    pub fn events(
        &self,
        cadence: Cadence,
        command: &str,
        times: &[NaiveDateTime],
    ) -> Vec<DisplayEvent> {
        let (Some(style), Some(first), Some(last)) =
            (self.styles.rollup(cadence), times.first(), times.last())
        else {
            return times
                .iter()
                .map(|&time| DisplayEvent {
                    start: time,
                    end: None,
                    title: format!("{:02}:{:02} {}", time.hour(), time.minute(), command),
                    description: command.to_string(),
                    attributes: merge(&[&self.styles.default]),
                })
                .collect();
        };

        let title = format!("{}{}", style.title_prefix, command);
        vec![DisplayEvent {
            start: *first,
            end: Some(*last),
            title: title.clone(),
            description: title,
            attributes: merge(&[&self.styles.default, style]),
        }]
    }
}

/// Layers style attributes, later styles winning.
fn merge(styles: &[&Style]) -> Map<String, Value> {
    let mut merged = Map::new();
    for style in styles {
        merged.extend(style.attributes.clone());
    }
    for key in COMPUTED_KEYS {
        merged.remove(key);
    }
    merged
}
