//! Tests for date-range resolution.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::America::New_York;
use chronograph_layout::range::{iso_week_containing, resolve, DateRangeSelector};
use chronograph_layout::time::DateInterval;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

fn day(y: i32, mo: u32, d: u32) -> DateTime<Utc> {
    utc(y, mo, d, 0, 0)
}

// 2026-03-18 is a Wednesday.
fn wednesday_noon() -> DateTime<Utc> {
    utc(2026, 3, 18, 12, 0)
}

// ── Presets ─────────────────────────────────────────────────────────────────

#[test]
fn today_is_local_midnight_to_midnight() {
    let interval = resolve(&DateRangeSelector::Today, wednesday_noon(), &Utc);
    assert_eq!(interval.start, day(2026, 3, 18));
    assert_eq!(interval.end, day(2026, 3, 19));
}

#[test]
fn tomorrow_is_the_next_local_day() {
    let interval = resolve(&DateRangeSelector::Tomorrow, wednesday_noon(), &Utc);
    assert_eq!(interval.start, day(2026, 3, 19));
    assert_eq!(interval.end, day(2026, 3, 20));
}

#[test]
fn last_n_days_looks_forward_from_today() {
    let interval = resolve(&DateRangeSelector::LastNDays(3), wednesday_noon(), &Utc);
    assert_eq!(interval.start, day(2026, 3, 18));
    assert_eq!(interval.end, day(2026, 3, 21));
}

#[test]
fn last_zero_days_is_empty() {
    let interval = resolve(&DateRangeSelector::LastNDays(0), wednesday_noon(), &Utc);
    assert!(interval.is_empty());
    assert_eq!(interval.start, day(2026, 3, 18));
}

#[test]
fn this_week_starts_on_monday() {
    let interval = resolve(&DateRangeSelector::ThisWeek, wednesday_noon(), &Utc);
    assert_eq!(interval.start, day(2026, 3, 16));
    assert_eq!(interval.end, day(2026, 3, 23));
}

#[test]
fn sunday_belongs_to_the_week_that_started_monday() {
    let sunday = utc(2026, 3, 22, 23, 30);
    let interval = resolve(&DateRangeSelector::ThisWeek, sunday, &Utc);
    assert_eq!(interval.start, day(2026, 3, 16));
    assert_eq!(interval.end, day(2026, 3, 23));
}

#[test]
fn next_week_is_the_following_iso_week() {
    let interval = resolve(&DateRangeSelector::NextWeek, wednesday_noon(), &Utc);
    assert_eq!(interval.start, day(2026, 3, 23));
    assert_eq!(interval.end, day(2026, 3, 30));
}

#[test]
fn custom_passes_through() {
    let start = utc(2026, 3, 1, 0, 0);
    let end = utc(2026, 3, 4, 0, 0);
    let selector = DateRangeSelector::Custom {
        start,
        end_exclusive: end,
    };
    assert_eq!(
        resolve(&selector, wednesday_noon(), &Utc),
        DateInterval { start, end }
    );
}

#[test]
fn inverted_custom_range_is_empty() {
    let selector = DateRangeSelector::Custom {
        start: utc(2026, 3, 4, 0, 0),
        end_exclusive: utc(2026, 3, 1, 0, 0),
    };
    let interval = resolve(&selector, wednesday_noon(), &Utc);
    assert!(interval.is_empty());
}

#[test]
fn resolution_is_idempotent_for_fixed_now() {
    for selector in DateRangeSelector::PRESETS {
        assert_eq!(
            resolve(&selector, wednesday_noon(), &New_York),
            resolve(&selector, wednesday_noon(), &New_York)
        );
    }
}

// ── Time zones ──────────────────────────────────────────────────────────────

#[test]
fn today_follows_the_local_calendar() {
    // 02:00 UTC on the 16th is still the evening of the 15th in New York.
    let now = utc(2026, 3, 16, 2, 0);
    let interval = resolve(&DateRangeSelector::Today, now, &New_York);
    assert_eq!(interval.start, utc(2026, 3, 15, 4, 0));
    assert_eq!(interval.end, utc(2026, 3, 16, 4, 0));
}

#[test]
fn day_span_across_spring_forward_is_47_hours() {
    // New York springs forward on 2026-03-08.
    let now = utc(2026, 3, 7, 17, 0);
    let interval = resolve(&DateRangeSelector::LastNDays(2), now, &New_York);
    assert_eq!(interval.start, utc(2026, 3, 7, 5, 0));
    assert_eq!(interval.end, utc(2026, 3, 9, 4, 0));
    assert_eq!(interval.duration().num_hours(), 47);
}

#[test]
fn iso_week_in_local_time() {
    let date = chrono::NaiveDate::from_ymd_opt(2026, 3, 18).unwrap();
    let week = iso_week_containing(date, &New_York).unwrap();
    assert_eq!(week.start, utc(2026, 3, 16, 4, 0));
    assert_eq!(week.end, utc(2026, 3, 23, 4, 0));
}

// ── Identifiers and migration ───────────────────────────────────────────────

#[test]
fn identifiers_roundtrip_for_presets() {
    for selector in DateRangeSelector::PRESETS {
        assert_eq!(
            DateRangeSelector::from_identifier(&selector.identifier()),
            Some(selector)
        );
        assert_eq!(
            DateRangeSelector::from_identifier(&selector.range_key()),
            Some(selector)
        );
    }
}

#[test]
fn legacy_labels_migrate() {
    assert_eq!(DateRangeSelector::migrate_legacy("今天"), Some(DateRangeSelector::Today));
    assert_eq!(DateRangeSelector::migrate_legacy("三天"), Some(DateRangeSelector::LastNDays(3)));
    assert_eq!(DateRangeSelector::migrate_legacy("一周"), Some(DateRangeSelector::LastNDays(7)));
    assert_eq!(DateRangeSelector::migrate_legacy("两周"), Some(DateRangeSelector::LastNDays(14)));
    assert_eq!(DateRangeSelector::migrate_legacy("today"), None);
}

#[test]
fn from_str_accepts_identifiers_and_legacy_labels() {
    assert_eq!("thisWeek".parse::<DateRangeSelector>().unwrap(), DateRangeSelector::ThisWeek);
    assert_eq!("一周".parse::<DateRangeSelector>().unwrap(), DateRangeSelector::LastNDays(7));
    assert!("fortnight".parse::<DateRangeSelector>().is_err());
}

#[test]
fn range_keys_are_ascii() {
    let custom = DateRangeSelector::Custom {
        start: day(2026, 3, 1),
        end_exclusive: day(2026, 3, 2),
    };
    assert_eq!(custom.range_key(), "custom");
    assert_eq!(DateRangeSelector::LastNDays(7).range_key(), "last-7-days");
    assert_eq!(DateRangeSelector::NextWeek.range_key(), "next-week");
    assert!(DateRangeSelector::ThisWeek.is_weekly());
    assert!(!DateRangeSelector::LastNDays(7).is_weekly());
}

#[test]
fn selectors_serialize_with_stable_tags() {
    let json = serde_json::to_string(&DateRangeSelector::LastNDays(7)).unwrap();
    assert_eq!(json, r#"{"lastNDays":7}"#);
    let back: DateRangeSelector = serde_json::from_str(r#""thisWeek""#).unwrap();
    assert_eq!(back, DateRangeSelector::ThisWeek);
}
