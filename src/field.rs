//! Cron field expansion.
//!
//! Each of the five crontab columns is expanded on its own into the ordered
//! list of integers it matches. Four token forms are understood:
//!
//! ```text
//! N        single value      17
//! N,N,N    list              16,46
//! N-N      inclusive range   12-23
//! * */N    every (N-th)      */15
//! ```
//!
//! Names (`jan`, `mon`), `L`/`W`/`#` and stepped ranges (`1-10/2`) are not
//! supported and are rejected as invalid tokens. So is a range wider than
//! [`MAX_RANGE_SPAN`] values.

use std::fmt;
use std::ops::RangeInclusive;

use crate::{CronError, Result};

/// Largest `stop - start` accepted in an `N-N` range. Every domain fits well
/// inside it.
pub const MAX_RANGE_SPAN: u32 = u8::MAX as u32;

/// One of the five crontab schedule columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Minute,
    Hour,
    Day,
    Month,
    Weekday,
}

impl FieldKind {
    /// The columns in the order they appear on a crontab line.
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Minute,
        FieldKind::Hour,
        FieldKind::Day,
        FieldKind::Month,
        FieldKind::Weekday,
    ];

    /// The closed range of values a wildcard expands over.
    ///
    /// Weekdays count from Sunday (`0`) to Saturday (`6`); days and months
    /// are 1-indexed.
    pub fn domain(self) -> RangeInclusive<u32> {
        match self {
            FieldKind::Minute => 0..=59,
            FieldKind::Hour => 0..=23,
            FieldKind::Day => 1..=31,
            FieldKind::Month => 1..=12,
            FieldKind::Weekday => 0..=6,
        }
    }

    /// Shorthand for [`expand`] with this field kind.
    pub fn expand(self, token: &str) -> Result<ExpandedField> {
        expand(self, token)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Minute => "minute",
            FieldKind::Hour => "hour",
            FieldKind::Day => "day-of-month",
            FieldKind::Month => "month",
            FieldKind::Weekday => "day-of-week",
        };
        f.write_str(name)
    }
}

/// The values a single cron token matches for its field.
///
/// Values keep the order the token produced them in: wildcards and ranges
/// ascend, lists stay as written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpandedField {
    kind: FieldKind,
    values: Vec<u32>,
}

impl ExpandedField {
    /// Every value of the field's domain, as `*` would expand.
    pub fn full(kind: FieldKind) -> Self {
        ExpandedField::every(kind, 1)
    }

    /// Every `step`-th value of the domain, as `*/step` would expand.
    /// `step` must be positive.
    pub(crate) fn every(kind: FieldKind, step: usize) -> Self {
        ExpandedField {
            kind,
            values: kind.domain().step_by(step).collect(),
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.values.iter().copied()
    }

    pub fn contains(&self, value: u32) -> bool {
        self.values.contains(&value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether every value of the domain is matched, however the token
    /// was written (`*`, `0-6` and `6,5,4,3,2,1,0` all qualify).
    pub fn covers_domain(&self) -> bool {
        self.kind.domain().all(|value| self.contains(value))
    }
}

/// Expands a cron token into the values it matches for `kind`.
///
/// Literal values are not checked against the field's domain; an
/// out-of-range minute or day simply never produces a valid timestamp.
/// A list is recognised before a range, so a mixed token such as `1,2-5`
/// fails on its `2-5` element instead of being half-parsed.
///
/// # Errors
///
/// Returns [`CronError::InvalidToken`] when the token matches none of the
/// supported forms, including a zero step (`*/0`) and a range spanning more
/// than [`MAX_RANGE_SPAN`] values.
///
/// # Examples
///
/// ```rust
/// use cron_timeline::field::{expand, FieldKind};
///
/// let minutes = expand(FieldKind::Minute, "*/17").unwrap();
/// assert_eq!(minutes.values(), &[0, 17, 34, 51]);
///
/// let days = expand(FieldKind::Day, "*/5").unwrap();
/// assert_eq!(days.values(), &[1, 6, 11, 16, 21, 26, 31]);
///
/// assert!(expand(FieldKind::Hour, "1,2-5").is_err());
/// ```
pub fn expand(kind: FieldKind, token: &str) -> Result<ExpandedField> {
    let invalid = || CronError::InvalidToken {
        field: kind,
        token: token.to_string(),
    };

    let values = if let Some(value) = parse_integer(token) {
        vec![value]
    } else if token.contains(',') {
        token
            .split(',')
            .map(|part| parse_integer(part).ok_or_else(invalid))
            .collect::<Result<Vec<_>>>()?
    } else if let Some((start, stop)) = token.split_once('-') {
        let start = parse_integer(start).ok_or_else(invalid)?;
        let stop = parse_integer(stop).ok_or_else(invalid)?;
        if stop.saturating_sub(start) > MAX_RANGE_SPAN {
            return Err(invalid());
        }
        (start..=stop).collect()
    } else if let Some(step) = parse_step(token) {
        return Ok(ExpandedField::every(kind, step));
    } else {
        return Err(invalid());
    };

    Ok(ExpandedField { kind, values })
}

/// Plain unsigned decimal: no sign, no whitespace.
fn parse_integer(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// `*` is a step of one; `*/N` needs a positive N.
fn parse_step(token: &str) -> Option<usize> {
    if token == "*" {
        return Some(1);
    }
    let step = parse_integer(token.strip_prefix("*/")?)?;
    (step > 0).then_some(step as usize)
}
