//! TOML configuration.
//!
//! ```toml
//! threads = 4
//!
//! [window]
//! earliest = "2011-10-17 00:00"
//! latest = "2011-10-17 23:59"
//!
//! [styles.default]
//! color = "#7FFFD4"
//! durationEvent = false
//!
//! [styles.every_minute]
//! title_prefix = "Every minute: "
//! color = "#f00"
//! durationEvent = true
//! ```
//!
//! Every section is optional. A style table that is present replaces the
//! built-in style of the same name as a whole.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crontab::Crontab;
use crate::rollup::StyleTable;
use crate::window::TimeWindow;
use crate::{CronError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Window to enumerate over; callers fall back to their own default.
    #[serde(default)]
    pub window: Option<WindowConfig>,

    /// Worker threads used to enumerate jobs.
    #[serde(default = "default_threads")]
    pub threads: usize,

    /// Display styles merged into emitted events.
    #[serde(default)]
    pub styles: StyleTable,
}

// ── Window ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// `YYYY-MM-DD HH:MM`, inclusive.
    pub earliest: String,
    /// `YYYY-MM-DD HH:MM`, inclusive.
    pub latest: String,
}

impl WindowConfig {
    pub fn to_window(&self) -> Result<TimeWindow> {
        TimeWindow::parse(&self.earliest, &self.latest)
    }
}

// ── Defaults ───────────────────────────────────────────────────────

fn default_threads() -> usize {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: None,
            threads: default_threads(),
            styles: StyleTable::default(),
        }
    }
}

// ── Loading ────────────────────────────────────────────────────────

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CronError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// An empty crontab for `window` using these styles and threads.
    pub fn crontab(&self, window: TimeWindow) -> Crontab {
        Crontab::new(window, self.styles.clone()).with_threads(self.threads)
    }
}
