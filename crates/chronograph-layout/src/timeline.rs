//! Vertical geometry for one day: timed blocks inside a visible hour window
//! and the separate all-day lane.
//!
//! Clamping only affects geometry. Labels always carry the event's true times.
//! Simultaneous events are not split into columns; they overlap and later
//! events in bucket order are drawn on top.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::bucket::DayBucket;
use crate::event::{serialize_event_id, Event};
use crate::language::Language;
use crate::privacy::{redact, DisplayFields, PrivacyMode};
use crate::time::{format_time_range, minutes_between};

/// Visible window and scale of a day timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub visible_start_hour: u32,
    /// Exclusive.
    pub visible_end_hour: u32,
    /// Points per hour.
    pub hour_row_height: f64,
    /// Floor applied to every block so short events stay readable.
    pub min_block_height: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            visible_start_hour: 6,
            visible_end_hour: 23,
            hour_row_height: 60.0,
            min_block_height: 30.0,
        }
    }
}

impl TimelineConfig {
    /// A 00:00–24:00 window, as used by weekly grid columns.
    pub fn full_day(hour_row_height: f64, min_block_height: f64) -> Self {
        Self {
            visible_start_hour: 0,
            visible_end_hour: 24,
            hour_row_height,
            min_block_height,
        }
    }

    pub fn visible_hours(&self) -> u32 {
        self.visible_end_hour
            .min(24)
            .saturating_sub(self.visible_start_hour.min(24))
    }

    /// Height of the whole visible window.
    pub fn total_height(&self) -> f64 {
        f64::from(self.visible_hours()) * sanitize(self.hour_row_height)
    }
}

/// Geometry for one timed event within one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutBlock<'a> {
    #[serde(rename = "event_id", serialize_with = "serialize_event_id")]
    pub event: &'a Event,
    pub top_offset: f64,
    pub height: f64,
    pub clamped_start: DateTime<Utc>,
    pub clamped_end: DateTime<Utc>,
}

impl LayoutBlock<'_> {
    /// Start time to print on the block (unclamped).
    pub fn label_start(&self) -> DateTime<Utc> {
        self.event.start
    }

    /// End time to print on the block (unclamped).
    pub fn label_end(&self) -> DateTime<Utc> {
        self.event.end
    }
}

/// Lay out a bucket's timed events in `[visible_start_hour, visible_end_hour)`
/// with the default block floor.
pub fn layout_day<'a>(
    bucket: &DayBucket<'a>,
    visible_start_hour: u32,
    visible_end_hour: u32,
    hour_row_height: f64,
) -> Vec<LayoutBlock<'a>> {
    let config = TimelineConfig {
        visible_start_hour,
        visible_end_hour,
        hour_row_height,
        ..TimelineConfig::default()
    };
    layout_day_with(bucket, &config)
}

/// Lay out a bucket's timed events under `config`.
///
/// Events entirely outside the visible window are omitted. Offsets and
/// heights are never negative and heights never fall below the floor.
pub fn layout_day_with<'a>(bucket: &DayBucket<'a>, config: &TimelineConfig) -> Vec<LayoutBlock<'a>> {
    let (Some(vis_start), Some(vis_end)) = (
        window_edge(bucket, config.visible_start_hour),
        window_edge(bucket, config.visible_end_hour),
    ) else {
        return Vec::new();
    };
    if vis_end <= vis_start {
        return Vec::new();
    }

    let row = sanitize(config.hour_row_height);
    let floor = sanitize(config.min_block_height);

    let mut blocks = Vec::with_capacity(bucket.timed_events.len());
    for &event in &bucket.timed_events {
        if !event.overlaps(vis_start, vis_end) {
            log::trace!("event {} outside visible window on {}", event.id, bucket.date);
            continue;
        }
        let start = event.start.max(vis_start);
        let end = start.max(event.end.min(vis_end));
        if event.is_malformed() {
            log::debug!("event {} ends before it starts, clamped to zero duration", event.id);
        }

        let top_offset = minutes_between(vis_start, start) as f64 / 60.0 * row;
        let natural = minutes_between(start, end) as f64 / 60.0 * row;
        blocks.push(LayoutBlock {
            event,
            top_offset,
            height: natural.max(floor),
            clamped_start: start,
            clamped_end: end,
        });
    }
    blocks
}

/// `hour` hours after the bucket's midnight, hours past 24 capped at 24.
fn window_edge(bucket: &DayBucket<'_>, hour: u32) -> Option<DateTime<Utc>> {
    let hours = Duration::try_hours(i64::from(hour.min(24)))?;
    bucket.day_start.checked_add_signed(hours)
}

/// Negative and non-finite lengths collapse to zero.
fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// One entry in a day's all-day lane, already redacted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllDayChip<'a> {
    #[serde(rename = "event_id", serialize_with = "serialize_event_id")]
    pub event: &'a Event,
    pub label: String,
    pub calendar_color: &'a str,
}

/// The all-day lane of a bucket, in bucket order, with redaction applied.
pub fn layout_all_day<'a>(
    bucket: &DayBucket<'a>,
    mode: PrivacyMode,
    language: Language,
) -> Vec<AllDayChip<'a>> {
    bucket
        .all_day_events
        .iter()
        .map(|&event| AllDayChip {
            event,
            label: redact(event, mode, language).primary_label,
            calendar_color: &event.calendar_color,
        })
        .collect()
}

/// A timed block paired with what may be printed on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedBlock<'a> {
    #[serde(flatten)]
    pub geometry: LayoutBlock<'a>,
    pub display: DisplayFields,
    /// True start/end in local time; `None` when the mode hides times.
    pub time_label: Option<String>,
    pub calendar_color: &'a str,
}

/// Everything a renderer needs to paint one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTimeline<'a> {
    pub date: NaiveDate,
    pub day_start: DateTime<Utc>,
    pub day_end: DateTime<Utc>,
    pub all_day: Vec<AllDayChip<'a>>,
    pub blocks: Vec<TimedBlock<'a>>,
    pub total_height: f64,
}

/// Lay out both lanes of `bucket` and resolve the displayed fields.
pub fn layout_day_view<'a, Tz: TimeZone>(
    bucket: &DayBucket<'a>,
    config: &TimelineConfig,
    mode: PrivacyMode,
    language: Language,
    tz: &Tz,
) -> DayTimeline<'a> {
    let blocks = layout_day_with(bucket, config)
        .into_iter()
        .map(|geometry| {
            let event = geometry.event;
            let display = redact(event, mode, language);
            let time_label = display
                .show_time
                .then(|| format_time_range(geometry.label_start(), geometry.label_end(), tz));
            TimedBlock {
                geometry,
                display,
                time_label,
                calendar_color: &event.calendar_color,
            }
        })
        .collect();

    DayTimeline {
        date: bucket.date,
        day_start: bucket.day_start,
        day_end: bucket.day_end,
        all_day: layout_all_day(bucket, mode, language),
        blocks,
        total_height: config.total_height(),
    }
}
