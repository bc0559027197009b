//! List-view models: a flat ordered list and a per-day grouping.
//!
//! List rows print times in every privacy mode, like the detail sheet; only
//! the label, location and notes follow the mode.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::event::{serialize_event_id, Event};
use crate::language::Language;
use crate::ordering::sort_event_refs;
use crate::privacy::{redact_for, DisplayFields, DisplaySurface, PrivacyMode};
use crate::time::{add_days, format_time_range, local_date, DateInterval};

/// One list row with redaction resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRow<'a> {
    #[serde(rename = "event_id", serialize_with = "serialize_event_id")]
    pub event: &'a Event,
    pub display: DisplayFields,
    /// `HH:MM - HH:MM`, or the all-day label.
    pub time_text: String,
    /// Availability status, omitted under opaque privacy where it is already
    /// the label.
    pub availability_badge: Option<&'static str>,
    pub calendar_color: &'a str,
}

fn row<'a, Tz: TimeZone>(
    event: &'a Event,
    mode: PrivacyMode,
    language: Language,
    tz: &Tz,
) -> ListRow<'a> {
    let time_text = if event.is_all_day {
        language.all_day_label().to_string()
    } else {
        format_time_range(event.start, event.end, tz)
    };
    ListRow {
        event,
        display: redact_for(event, mode, DisplaySurface::Detail, language),
        time_text,
        availability_badge: (mode != PrivacyMode::Opaque)
            .then(|| language.availability_label(event.availability)),
        calendar_color: &event.calendar_color,
    }
}

/// Every event as a row, in deterministic order.
pub fn flat_list<'a, Tz: TimeZone>(
    events: &'a [Event],
    mode: PrivacyMode,
    language: Language,
    tz: &Tz,
) -> Vec<ListRow<'a>> {
    let mut refs: Vec<&Event> = events.iter().collect();
    sort_event_refs(&mut refs);
    refs.into_iter()
        .map(|event| row(event, mode, language, tz))
        .collect()
}

/// A day section of the grouped list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListDay<'a> {
    pub date: NaiveDate,
    pub is_today: bool,
    pub rows: Vec<ListRow<'a>>,
    /// Set for an empty day unless empty days are collapsed.
    pub placeholder: Option<&'static str>,
}

/// Group events by the local day they start on.
///
/// Sections cover each local day from the day of `interval.start` through the
/// day holding the last instant before `interval.end`, the same days
/// [`bucketize`](crate::bucket::bucketize) produces. Events starting outside
/// those days are left out. Collapsed empty days keep their header but get no
/// placeholder row.
pub fn group_by_day<'a, Tz: TimeZone>(
    events: &'a [Event],
    interval: &DateInterval,
    now: DateTime<Utc>,
    tz: &Tz,
    mode: PrivacyMode,
    language: Language,
    collapse_empty_days: bool,
) -> Vec<ListDay<'a>> {
    if interval.is_empty() {
        return Vec::new();
    }
    let today = local_date(now, tz);
    let first = local_date(interval.start, tz);
    let last = local_date(interval.end - Duration::nanoseconds(1), tz);

    let mut by_day: BTreeMap<NaiveDate, Vec<&Event>> = BTreeMap::new();
    for event in events {
        by_day
            .entry(local_date(event.start, tz))
            .or_default()
            .push(event);
    }

    let mut days = Vec::new();
    let mut date = first;
    while date <= last {
        let mut items = by_day.remove(&date).unwrap_or_default();
        sort_event_refs(&mut items);
        let rows: Vec<ListRow<'a>> = items
            .into_iter()
            .map(|event| row(event, mode, language, tz))
            .collect();
        let placeholder =
            (rows.is_empty() && !collapse_empty_days).then(|| language.no_events_label());
        days.push(ListDay {
            date,
            is_today: date == today,
            rows,
            placeholder,
        });
        let Some(next) = add_days(date, 1) else {
            break;
        };
        date = next;
    }
    days
}
