//! Shared time primitives: half-open intervals and time-zone-local day edges.
//!
//! Every day boundary in the crate is computed here, so DST handling lives in
//! exactly one place. A local midnight that falls into a DST gap resolves to
//! the first valid instant after it; an ambiguous midnight resolves to the
//! earlier of the two.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Largest DST gap searched when a local midnight does not exist.
const MAX_GAP_MINUTES: i64 = 24 * 60;
const GAP_PROBE_MINUTES: i64 = 15;

/// A half-open `[start, end)` span of absolute time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateInterval {
    pub start: DateTime<Utc>,
    /// Exclusive.
    pub end: DateTime<Utc>,
}

impl DateInterval {
    /// Build an interval, collapsing an inverted pair to an empty interval at
    /// `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if end < start {
            log::debug!("inverted interval {} .. {}, treating as empty", start, end);
            Self::empty_at(start)
        } else {
            Self { start, end }
        }
    }

    pub fn empty_at(at: DateTime<Utc>) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn midpoint(&self) -> DateTime<Utc> {
        self.start + self.duration() / 2
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Calendar date of `instant` in `tz`.
pub fn local_date<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// The instant local `date` begins in `tz`.
pub fn day_start<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    if let Some(dt) = resolve_local(&midnight, tz) {
        return dt;
    }

    // Midnight was skipped by a DST transition: walk forward to the first
    // wall-clock time that exists.
    let mut offset = GAP_PROBE_MINUTES;
    while offset <= MAX_GAP_MINUTES {
        if let Some(dt) = resolve_local(&(midnight + Duration::minutes(offset)), tz) {
            return dt;
        }
        offset += GAP_PROBE_MINUTES;
    }
    midnight.and_utc()
}

fn resolve_local<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

/// Local midnight at or before `instant`.
pub fn start_of_day<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    day_start(local_date(instant, tz), tz)
}

/// Shift a calendar date by whole days. `None` on calendar overflow.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(days)?)
}

/// Whole minutes from `from` to `to`, truncated toward zero.
pub fn minutes_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_minutes()
}

/// `HH:MM - HH:MM` in local wall-clock time.
pub fn format_time_range<Tz: TimeZone>(start: DateTime<Utc>, end: DateTime<Utc>, tz: &Tz) -> String {
    format!(
        "{} - {}",
        start.with_timezone(tz).naive_local().format("%H:%M"),
        end.with_timezone(tz).naive_local().format("%H:%M")
    )
}

/// Parse an IANA time zone name.
pub fn parse_timezone(name: &str) -> Result<chrono_tz::Tz> {
    name.parse()
        .map_err(|_| LayoutError::InvalidTimezone(name.to_string()))
}

/// Parse an instant from RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS` read as UTC.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| LayoutError::InvalidDateTime(format!("'{}': {}", raw, e)))
}
