//! Display languages and the handful of labels the core has to produce itself.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::event::Availability;

/// A language the core can produce labels in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-Hans")]
    ZhHans,
}

impl Language {
    pub fn identifier(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::ZhHans => "zh-Hans",
        }
    }

    /// Parse a stable identifier (`en`, `zh-Hans`).
    pub fn from_identifier(raw: &str) -> Option<Self> {
        match raw {
            "en" => Some(Language::En),
            "zh-Hans" => Some(Language::ZhHans),
            _ => None,
        }
    }

    /// Best supported match for a BCP 47 tag such as `zh-Hans-CN` or `en_GB`.
    pub fn from_locale_tag(tag: &str) -> Option<Self> {
        let lower = tag.to_ascii_lowercase();
        if lower.starts_with("zh") {
            Some(Language::ZhHans)
        } else if lower.starts_with("en") {
            Some(Language::En)
        } else {
            None
        }
    }

    /// Status text shown in place of a title under opaque privacy.
    ///
    /// `Unknown` reads as busy: an opaque export only promises that the slot
    /// is taken.
    pub fn availability_label(self, availability: Availability) -> &'static str {
        match (self, availability) {
            (Language::En, Availability::Busy | Availability::Unknown) => "Busy",
            (Language::En, Availability::Free) => "Free",
            (Language::En, Availability::Tentative) => "Tentative",
            (Language::En, Availability::Unavailable) => "Unavailable",
            (Language::ZhHans, Availability::Busy | Availability::Unknown) => "忙碌",
            (Language::ZhHans, Availability::Free) => "空闲",
            (Language::ZhHans, Availability::Tentative) => "暂定",
            (Language::ZhHans, Availability::Unavailable) => "不可用",
        }
    }

    pub fn untitled_label(self) -> &'static str {
        match self {
            Language::En => "Untitled",
            Language::ZhHans => "无标题",
        }
    }

    pub fn all_day_label(self) -> &'static str {
        match self {
            Language::En => "all-day",
            Language::ZhHans => "全天",
        }
    }

    pub fn no_events_label(self) -> &'static str {
        match self {
            Language::En => "No events",
            Language::ZhHans => "无事件",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        Language::from_identifier(s)
            .or_else(|| Language::from_locale_tag(s))
            .ok_or_else(|| LayoutError::InvalidLanguage(s.to_string()))
    }
}

/// The user's language preference as persisted by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguagePreference {
    /// Follow the platform's preferred localizations.
    #[default]
    System,
    Explicit(Language),
}

impl LanguagePreference {
    pub fn identifier(self) -> &'static str {
        match self {
            LanguagePreference::System => "system",
            LanguagePreference::Explicit(lang) => lang.identifier(),
        }
    }

    pub fn from_identifier(raw: &str) -> Option<Self> {
        if raw == "system" {
            return Some(LanguagePreference::System);
        }
        Language::from_identifier(raw).map(LanguagePreference::Explicit)
    }

    /// Resolve to a concrete language.
    ///
    /// `System` takes the first platform localization; anything unsupported
    /// (or an empty list) falls back to English.
    pub fn effective(self, preferred_localizations: &[&str]) -> Language {
        match self {
            LanguagePreference::Explicit(lang) => lang,
            LanguagePreference::System => preferred_localizations
                .first()
                .and_then(|tag| Language::from_locale_tag(tag))
                .unwrap_or_default(),
        }
    }
}
