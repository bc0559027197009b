//! Symbolic date-range selectors and their resolution to concrete intervals.
//!
//! Resolution is a pure function of `(selector, now, tz)`; "today" moves with
//! `now`, so resolved intervals are never cached across passes.
//!
//! `LastNDays(n)` is forward-looking: it covers today and the `n - 1` days
//! after it. The name is kept for compatibility with stored preferences.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::time::{add_days, day_start, local_date, start_of_day, DateInterval};

/// A user-selected date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateRangeSelector {
    #[default]
    Today,
    Tomorrow,
    /// Today plus the following `n - 1` days.
    LastNDays(u32),
    /// The ISO (Monday-start) week containing now.
    ThisWeek,
    /// The ISO week containing now + 7 days.
    NextWeek,
    #[serde(rename_all = "camelCase")]
    Custom {
        start: DateTime<Utc>,
        end_exclusive: DateTime<Utc>,
    },
}

impl DateRangeSelector {
    /// Presets offered by range pickers, in menu order.
    pub const PRESETS: [DateRangeSelector; 7] = [
        DateRangeSelector::Today,
        DateRangeSelector::Tomorrow,
        DateRangeSelector::ThisWeek,
        DateRangeSelector::NextWeek,
        DateRangeSelector::LastNDays(3),
        DateRangeSelector::LastNDays(7),
        DateRangeSelector::LastNDays(14),
    ];

    /// Stable identifier used for persistence.
    pub fn identifier(&self) -> String {
        match self {
            DateRangeSelector::Today => "today".to_string(),
            DateRangeSelector::Tomorrow => "tomorrow".to_string(),
            DateRangeSelector::LastNDays(n) => format!("last{}Days", n),
            DateRangeSelector::ThisWeek => "thisWeek".to_string(),
            DateRangeSelector::NextWeek => "nextWeek".to_string(),
            DateRangeSelector::Custom { .. } => "custom".to_string(),
        }
    }

    /// ASCII key used in export filenames.
    pub fn range_key(&self) -> String {
        match self {
            DateRangeSelector::Today => "today".to_string(),
            DateRangeSelector::Tomorrow => "tomorrow".to_string(),
            DateRangeSelector::LastNDays(n) => format!("last-{}-days", n),
            DateRangeSelector::ThisWeek => "this-week".to_string(),
            DateRangeSelector::NextWeek => "next-week".to_string(),
            DateRangeSelector::Custom { .. } => "custom".to_string(),
        }
    }

    /// Parse a preset identifier (persisted or filename form).
    ///
    /// `custom` carries its bounds separately and is not restorable from the
    /// identifier alone, so it yields `None`.
    pub fn from_identifier(raw: &str) -> Option<Self> {
        match raw {
            "today" => Some(DateRangeSelector::Today),
            "tomorrow" => Some(DateRangeSelector::Tomorrow),
            "thisWeek" | "this-week" => Some(DateRangeSelector::ThisWeek),
            "nextWeek" | "next-week" => Some(DateRangeSelector::NextWeek),
            _ => parse_last_n_days(raw).map(DateRangeSelector::LastNDays),
        }
    }

    /// Map a label stored by old releases to its selector.
    pub fn migrate_legacy(raw: &str) -> Option<Self> {
        match raw {
            "今天" => Some(DateRangeSelector::Today),
            "三天" => Some(DateRangeSelector::LastNDays(3)),
            "一周" => Some(DateRangeSelector::LastNDays(7)),
            "两周" => Some(DateRangeSelector::LastNDays(14)),
            _ => None,
        }
    }

    /// Week selectors are rendered as a weekly grid.
    pub fn is_weekly(&self) -> bool {
        matches!(self, DateRangeSelector::ThisWeek | DateRangeSelector::NextWeek)
    }
}

impl std::str::FromStr for DateRangeSelector {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        DateRangeSelector::from_identifier(s)
            .or_else(|| DateRangeSelector::migrate_legacy(s))
            .ok_or_else(|| LayoutError::InvalidRange(s.to_string()))
    }
}

/// `last7Days` or `last-7-days`.
fn parse_last_n_days(raw: &str) -> Option<u32> {
    let digits = raw
        .strip_prefix("last")
        .and_then(|rest| rest.strip_suffix("Days"))
        .or_else(|| {
            raw.strip_prefix("last-")
                .and_then(|rest| rest.strip_suffix("-days"))
        })?;
    digits.parse().ok()
}

/// Resolve a selector to a half-open interval of local days in `tz`.
pub fn resolve<Tz: TimeZone>(selector: &DateRangeSelector, now: DateTime<Utc>, tz: &Tz) -> DateInterval {
    let today = local_date(now, tz);
    let interval = match *selector {
        DateRangeSelector::Today => day_span(today, 0, 1, tz),
        DateRangeSelector::Tomorrow => day_span(today, 1, 1, tz),
        DateRangeSelector::LastNDays(n) => day_span(today, 0, i64::from(n), tz),
        DateRangeSelector::ThisWeek => {
            iso_week_containing(today, tz).or_else(|| day_span(today, 0, 7, tz))
        }
        DateRangeSelector::NextWeek => now
            .checked_add_signed(Duration::days(7))
            .and_then(|later| iso_week_containing(local_date(later, tz), tz))
            .or_else(|| day_span(today, 0, 7, tz)),
        DateRangeSelector::Custom {
            start,
            end_exclusive,
        } => Some(DateInterval::new(start, end_exclusive)),
    };
    let interval = interval.unwrap_or_else(|| DateInterval::empty_at(start_of_day(now, tz)));
    log::debug!(
        "resolved {} to {} .. {}",
        selector.identifier(),
        interval.start,
        interval.end
    );
    interval
}

/// `[start of (base + offset), start of (base + offset + days))`.
fn day_span<Tz: TimeZone>(base: NaiveDate, offset: i64, days: i64, tz: &Tz) -> Option<DateInterval> {
    let first = add_days(base, offset)?;
    let last = add_days(first, days)?;
    Some(DateInterval::new(day_start(first, tz), day_start(last, tz)))
}

/// Monday 00:00 to the following Monday 00:00, local time.
pub fn iso_week_containing<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateInterval> {
    let back = i64::from(date.weekday().num_days_from_monday());
    let monday = add_days(date, -back)?;
    day_span(monday, 0, 7, tz)
}
