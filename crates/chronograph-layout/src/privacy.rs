//! Privacy modes and the redaction policy applied before anything is displayed.
//!
//! | mode    | label        | time (compact) | location | notes |
//! |---------|--------------|----------------|----------|-------|
//! | Opaque  | availability | hidden         | hidden   | hidden |
//! | Partial | title        | shown          | hidden   | hidden |
//! | Full    | title        | shown          | shown    | shown |
//!
//! The detail surface always shows times. Moving up the mode order never hides
//! a field that a lower mode shows.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::event::Event;
use crate::language::Language;

/// How much of each event is disclosed, in increasing order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyMode {
    /// Time blocks only; the label is the availability status.
    Opaque,
    /// Title and time.
    #[default]
    Partial,
    /// Everything, including location and notes.
    Full,
}

impl PrivacyMode {
    pub const ALL: [PrivacyMode; 3] = [PrivacyMode::Opaque, PrivacyMode::Partial, PrivacyMode::Full];

    pub fn identifier(self) -> &'static str {
        match self {
            PrivacyMode::Opaque => "opaque",
            PrivacyMode::Partial => "partial",
            PrivacyMode::Full => "full",
        }
    }

    pub fn from_identifier(raw: &str) -> Option<Self> {
        match raw {
            "opaque" => Some(PrivacyMode::Opaque),
            "partial" => Some(PrivacyMode::Partial),
            "full" => Some(PrivacyMode::Full),
            _ => None,
        }
    }

    /// Map a localized label stored by old releases to its mode.
    pub fn migrate_legacy(raw: &str) -> Option<Self> {
        match raw {
            "不透明模式" => Some(PrivacyMode::Opaque),
            "部分模式" => Some(PrivacyMode::Partial),
            "完整模式" => Some(PrivacyMode::Full),
            _ => None,
        }
    }
}

impl std::str::FromStr for PrivacyMode {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        PrivacyMode::from_identifier(s)
            .or_else(|| PrivacyMode::migrate_legacy(s))
            .ok_or_else(|| LayoutError::InvalidPrivacyMode(s.to_string()))
    }
}

/// Where the fields are going to be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplaySurface {
    /// Timeline blocks, chips, list rows.
    #[default]
    Compact,
    /// A single event's detail sheet.
    Detail,
}

/// The displayable projection of one event under a privacy mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFields {
    pub primary_label: String,
    pub show_time: bool,
    pub show_location: bool,
    pub show_notes: bool,
    /// Present only when `show_location` and the event has a non-blank location.
    pub location: Option<String>,
    /// Present only when `show_notes` and the event has non-blank notes.
    pub notes: Option<String>,
}

/// Redact `event` for a compact surface.
pub fn redact(event: &Event, mode: PrivacyMode, language: Language) -> DisplayFields {
    redact_for(event, mode, DisplaySurface::Compact, language)
}

/// Redact `event` for the given surface.
pub fn redact_for(
    event: &Event,
    mode: PrivacyMode,
    surface: DisplaySurface,
    language: Language,
) -> DisplayFields {
    let primary_label = match mode {
        PrivacyMode::Opaque => language.availability_label(event.availability),
        PrivacyMode::Partial | PrivacyMode::Full => event.display_title(language),
    }
    .to_string();

    let show_time = mode >= PrivacyMode::Partial || surface == DisplaySurface::Detail;
    let show_location = mode == PrivacyMode::Full;
    let show_notes = mode == PrivacyMode::Full;

    DisplayFields {
        primary_label,
        show_time,
        show_location,
        show_notes,
        location: non_blank(show_location, event.location.as_deref()),
        notes: non_blank(show_notes, event.notes.as_deref()),
    }
}

fn non_blank(shown: bool, value: Option<&str>) -> Option<String> {
    value
        .filter(|v| shown && !v.trim().is_empty())
        .map(str::to_string)
}
