//! Partition a resolved interval into local calendar days and assign events.
//!
//! A multi-day event is referenced from every bucket it overlaps; buckets
//! borrow from the caller's event slice and never copy or mutate it.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::event::Event;
use crate::ordering::sort_event_refs;
use crate::time::{add_days, day_start, local_date, DateInterval};

/// One local day of a resolved interval with its events split into lanes.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket<'a> {
    pub date: NaiveDate,
    pub day_start: DateTime<Utc>,
    /// Exclusive.
    pub day_end: DateTime<Utc>,
    pub all_day_events: Vec<&'a Event>,
    pub timed_events: Vec<&'a Event>,
}

impl<'a> DayBucket<'a> {
    /// An event-free bucket for `date` in `tz`.
    pub fn empty<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Self {
        let next = add_days(date, 1).unwrap_or(date);
        Self {
            date,
            day_start: day_start(date, tz),
            day_end: day_start(next, tz),
            all_day_events: Vec::new(),
            timed_events: Vec::new(),
        }
    }

    pub fn span(&self) -> DateInterval {
        DateInterval::new(self.day_start, self.day_end)
    }

    pub fn is_empty(&self) -> bool {
        self.all_day_events.is_empty() && self.timed_events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.all_day_events.len() + self.timed_events.len()
    }
}

/// Split `interval` into local days of `tz`, assigning each overlapping event
/// to every day it touches.
///
/// Buckets are full local days in ascending order, from the day containing
/// `interval.start` through the day containing the last instant before
/// `interval.end`. Only events overlapping `interval` are considered. Both
/// lanes of every bucket are in deterministic order.
pub fn bucketize<'a, Tz: TimeZone>(
    events: &'a [Event],
    interval: &DateInterval,
    tz: &Tz,
) -> Vec<DayBucket<'a>> {
    if interval.is_empty() {
        log::debug!("empty interval at {}, no buckets", interval.start);
        return Vec::new();
    }

    let mut candidates: Vec<&Event> = events
        .iter()
        .filter(|e| e.overlaps(interval.start, interval.end))
        .collect();
    sort_event_refs(&mut candidates);

    let first = local_date(interval.start, tz);
    let last = local_date(interval.end - Duration::nanoseconds(1), tz);

    let mut buckets = Vec::new();
    let mut date = first;
    while date <= last {
        let Some(next) = add_days(date, 1) else {
            break;
        };
        let start = day_start(date, tz);
        let end = day_start(next, tz);

        let (all_day_events, timed_events): (Vec<&Event>, Vec<&Event>) = candidates
            .iter()
            .copied()
            .filter(|e| e.overlaps(start, end))
            .partition(|e| e.is_all_day);

        buckets.push(DayBucket {
            date,
            day_start: start,
            day_end: end,
            all_day_events,
            timed_events,
        });
        date = next;
    }

    log::debug!(
        "bucketized {} of {} events into {} days",
        candidates.len(),
        events.len(),
        buckets.len()
    );
    buckets
}
