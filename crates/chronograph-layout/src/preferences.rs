//! Persisted user preferences over a host-provided key-value store.
//!
//! Values are stored under stable identifiers. Labels written by old releases
//! are migrated on load and the stable identifier is written back, so each
//! legacy value is migrated at most once.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use crate::language::LanguagePreference;
use crate::privacy::PrivacyMode;
use crate::range::DateRangeSelector;

/// Preference keys.
pub mod keys {
    pub const PRIVACY_MODE: &str = "pref.privacyMode";
    pub const DATE_RANGE: &str = "pref.dateRange";
    pub const SELECTED_CALENDARS: &str = "pref.selectedCalendars";
    pub const CUSTOM_START: &str = "pref.customRange.start";
    pub const CUSTOM_END_EXCLUSIVE: &str = "pref.customRange.endExclusive";
    pub const LANGUAGE: &str = "app.language.preference";
}

/// The key-value contract the host's preference storage must satisfy.
pub trait PreferenceStore {
    fn get_string(&self, key: &str) -> Option<String>;
    fn set_string(&mut self, key: &str, value: &str);
    fn get_string_set(&self, key: &str) -> Option<BTreeSet<String>>;
    fn set_string_set(&mut self, key: &str, values: &BTreeSet<String>);
    fn remove(&mut self, key: &str);
}

/// In-memory store for tests and headless hosts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    strings: HashMap<String, String>,
    sets: HashMap<String, BTreeSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.strings.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.strings.insert(key.to_string(), value.to_string());
    }

    fn get_string_set(&self, key: &str) -> Option<BTreeSet<String>> {
        self.sets.get(key).cloned()
    }

    fn set_string_set(&mut self, key: &str, values: &BTreeSet<String>) {
        self.sets.insert(key.to_string(), values.clone());
    }

    fn remove(&mut self, key: &str) {
        self.strings.remove(key);
        self.sets.remove(key);
    }
}

/// Everything the host persists between launches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Preferences {
    pub privacy_mode: PrivacyMode,
    pub date_range: DateRangeSelector,
    pub selected_calendars: BTreeSet<String>,
    pub language: LanguagePreference,
}

impl Preferences {
    /// Read preferences, migrating legacy values in place.
    ///
    /// Unrecognised values leave the default untouched.
    pub fn load<S: PreferenceStore + ?Sized>(store: &mut S) -> Self {
        let mut prefs = Preferences::default();

        if let Some(raw) = store.get_string(keys::PRIVACY_MODE) {
            if let Some(mode) = PrivacyMode::from_identifier(&raw) {
                prefs.privacy_mode = mode;
            } else if let Some(mode) = PrivacyMode::migrate_legacy(&raw) {
                log::debug!("migrated legacy privacy mode '{}' to {}", raw, mode.identifier());
                store.set_string(keys::PRIVACY_MODE, mode.identifier());
                prefs.privacy_mode = mode;
            }
        }

        if let Some(raw) = store.get_string(keys::DATE_RANGE) {
            if raw == "custom" {
                match load_custom_range(store) {
                    Some(range) => prefs.date_range = range,
                    None => {
                        log::debug!("custom range without stored bounds, resetting to today");
                        store.set_string(keys::DATE_RANGE, "today");
                    }
                }
            } else if let Some(range) = DateRangeSelector::from_identifier(&raw) {
                prefs.date_range = range;
            } else if let Some(range) = DateRangeSelector::migrate_legacy(&raw) {
                log::debug!("migrated legacy date range '{}' to {}", raw, range.identifier());
                store.set_string(keys::DATE_RANGE, &range.identifier());
                prefs.date_range = range;
            }
        }

        if let Some(stored) = store.get_string_set(keys::SELECTED_CALENDARS) {
            prefs.selected_calendars = stored;
        }

        if let Some(raw) = store.get_string(keys::LANGUAGE) {
            if let Some(language) = LanguagePreference::from_identifier(&raw) {
                prefs.language = language;
            }
        }

        prefs
    }

    pub fn save_privacy_mode<S: PreferenceStore + ?Sized>(store: &mut S, mode: PrivacyMode) {
        store.set_string(keys::PRIVACY_MODE, mode.identifier());
    }

    /// Persist a range. Presets clear any stale custom bounds.
    pub fn save_date_range<S: PreferenceStore + ?Sized>(store: &mut S, range: &DateRangeSelector) {
        store.set_string(keys::DATE_RANGE, &range.identifier());
        match range {
            DateRangeSelector::Custom {
                start,
                end_exclusive,
            } => {
                store.set_string(keys::CUSTOM_START, &epoch_seconds(start));
                store.set_string(keys::CUSTOM_END_EXCLUSIVE, &epoch_seconds(end_exclusive));
            }
            _ => {
                store.remove(keys::CUSTOM_START);
                store.remove(keys::CUSTOM_END_EXCLUSIVE);
            }
        }
    }

    pub fn save_selected_calendars<S: PreferenceStore + ?Sized>(
        store: &mut S,
        calendars: &BTreeSet<String>,
    ) {
        store.set_string_set(keys::SELECTED_CALENDARS, calendars);
    }

    pub fn save_language<S: PreferenceStore + ?Sized>(store: &mut S, language: LanguagePreference) {
        store.set_string(keys::LANGUAGE, language.identifier());
    }
}

/// Custom bounds are epoch seconds; both must be present and positive.
fn load_custom_range<S: PreferenceStore + ?Sized>(store: &S) -> Option<DateRangeSelector> {
    let start = read_timestamp(store, keys::CUSTOM_START)?;
    let end_exclusive = read_timestamp(store, keys::CUSTOM_END_EXCLUSIVE)?;
    Some(DateRangeSelector::Custom {
        start,
        end_exclusive,
    })
}

/// Fractional epoch seconds, microsecond precision.
fn epoch_seconds(instant: &DateTime<Utc>) -> String {
    (instant.timestamp_micros() as f64 / 1e6).to_string()
}

fn read_timestamp<S: PreferenceStore + ?Sized>(store: &S, key: &str) -> Option<DateTime<Utc>> {
    let secs: f64 = store.get_string(key)?.trim().parse().ok()?;
    if !secs.is_finite() || secs <= 0.0 {
        return None;
    }
    let micros = (secs * 1e6).round();
    if micros >= i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_micros(micros as i64)
}

/// Calendars to show given the persisted selection and what the store offers.
///
/// Nothing persisted selects everything; otherwise the persisted ids still
/// available are kept, falling back to everything if none survive.
pub fn resolve_calendar_selection(
    persisted: &BTreeSet<String>,
    available: &[String],
) -> BTreeSet<String> {
    let all: BTreeSet<String> = available.iter().cloned().collect();
    if persisted.is_empty() {
        return all;
    }
    let kept: BTreeSet<String> = persisted.intersection(&all).cloned().collect();
    if kept.is_empty() {
        all
    } else {
        kept
    }
}
