//! The canonical calendar event value consumed by every layout pass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::language::Language;

/// Free/busy status reported by the owning calendar.
///
/// Under [`PrivacyMode::Opaque`](crate::privacy::PrivacyMode::Opaque) this is
/// shown in place of the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Busy,
    Free,
    Tentative,
    Unavailable,
    #[default]
    Unknown,
}

/// One calendar occurrence, already expanded by the event source.
///
/// `end >= start` is expected but not guaranteed by upstream sources; layout
/// treats a negative duration as zero instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Opaque identifier from the source of truth.
    pub id: String,
    /// Display title as delivered. May be empty; see [`Event::display_title`].
    #[serde(default)]
    pub title: String,
    #[serde(alias = "startDate")]
    pub start: DateTime<Utc>,
    #[serde(alias = "endDate")]
    pub end: DateTime<Utc>,
    #[serde(default, alias = "isAllDay")]
    pub is_all_day: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, alias = "calendarName")]
    pub calendar_name: String,
    /// Passed through to rendering untouched.
    #[serde(default, alias = "calendarColorToken")]
    pub calendar_color: String,
    #[serde(default)]
    pub availability: Availability,
}

impl Event {
    /// Create a timed event with no optional details.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            is_all_day: false,
            location: None,
            notes: None,
            calendar_name: String::new(),
            calendar_color: String::new(),
            availability: Availability::Unknown,
        }
    }

    pub fn all_day(mut self) -> Self {
        self.is_all_day = true;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_calendar(mut self, name: impl Into<String>, color: impl Into<String>) -> Self {
        self.calendar_name = name.into();
        self.calendar_color = color.into();
        self
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    /// Title to show, substituting the localized placeholder for a blank title.
    pub fn display_title(&self, language: Language) -> &str {
        if self.title.trim().is_empty() {
            language.untitled_label()
        } else {
            &self.title
        }
    }

    /// True when the source delivered `end < start`.
    pub fn is_malformed(&self) -> bool {
        self.end < self.start
    }

    /// End instant with negative durations collapsed onto `start`.
    pub fn effective_end(&self) -> DateTime<Utc> {
        self.end.max(self.start)
    }

    /// Half-open overlap test against `[start, end)`.
    ///
    /// An event ending exactly at `start` or starting exactly at `end` does not
    /// overlap. Zero-length and backwards events are the instant `start` and
    /// overlap the span containing it.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        let event_end = self.effective_end();
        if event_end == self.start {
            start <= self.start && self.start < end
        } else {
            event_end > start && self.start < end
        }
    }
}

/// Serialize a borrowed event as its id only.
///
/// Laid-out models are handed to renderers and exporters; they must never
/// carry fields that redaction removed.
pub(crate) fn serialize_event_id<S: Serializer>(
    event: &&Event,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&event.id)
}
