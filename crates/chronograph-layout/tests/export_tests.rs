//! Tests for export filenames and pixel budgets.

use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use chronograph_layout::export::{downscaled_size, export_scale, filename_seed, ExportLimits};
use chronograph_layout::DateRangeSelector;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ── Filename seed ───────────────────────────────────────────────────────────

#[test]
fn seed_uses_range_key_and_local_date() {
    let tz: Tz = "Asia/Tokyo".parse().unwrap();
    // 20:00 UTC on the 18th is already the 19th in Tokyo.
    let now = Utc.with_ymd_and_hms(2026, 3, 18, 20, 0, 0).unwrap();
    assert_eq!(
        filename_seed("ChronoGraph", &DateRangeSelector::ThisWeek, now, &tz),
        "ChronoGraph_this-week_20260319"
    );
    assert_eq!(
        filename_seed("ChronoGraph", &DateRangeSelector::LastNDays(14), now, &tz),
        "ChronoGraph_last-14-days_20260319"
    );
}

#[test]
fn seed_sanitizes_app_name() {
    let now = Utc.with_ymd_and_hms(2026, 3, 18, 9, 0, 0).unwrap();
    assert_eq!(
        filename_seed("My Cal/2", &DateRangeSelector::Today, now, &Utc),
        "My-Cal-2_today_20260318"
    );
    assert_eq!(
        filename_seed("   ", &DateRangeSelector::Today, now, &Utc),
        "export_today_20260318"
    );
}

// ── Scale ───────────────────────────────────────────────────────────────────

#[test]
fn scale_is_capped_at_preferred_maximum() {
    let limits = ExportLimits::default();
    assert!(approx(export_scale(800.0, 600.0, 3.0, &limits), 2.0));
    assert!(approx(export_scale(800.0, 600.0, 1.0, &limits), 1.0));
}

#[test]
fn scale_respects_pixel_ceiling() {
    let limits = ExportLimits::default();
    // 16384 / 10000 = 1.6384
    assert!(approx(export_scale(1000.0, 10000.0, 2.0, &limits), 1.6384));
}

#[test]
fn scale_never_drops_below_one() {
    let limits = ExportLimits::default();
    assert!(approx(export_scale(1000.0, 40000.0, 2.0, &limits), 1.0));
    assert!(approx(export_scale(800.0, 600.0, 0.0, &limits), 1.0));
    assert!(approx(export_scale(800.0, 600.0, f64::NAN, &limits), 1.0));
}

// ── Downscale ───────────────────────────────────────────────────────────────

#[test]
fn small_images_are_untouched() {
    assert_eq!(downscaled_size(1200.0, 800.0, 3000.0), (1200.0, 800.0));
    assert_eq!(downscaled_size(3000.0, 100.0, 3000.0), (3000.0, 100.0));
}

#[test]
fn large_images_keep_aspect_ratio() {
    assert_eq!(downscaled_size(6000.0, 4000.0, 3000.0), (3000.0, 2000.0));
    assert_eq!(downscaled_size(1500.0, 6000.0, 3000.0), (750.0, 3000.0));
}

// ── Plan ────────────────────────────────────────────────────────────────────

#[test]
fn plan_renders_at_capped_scale() {
    let plan = ExportLimits::default().plan(1000.0, 800.0, 3.0);
    assert_eq!(plan.scale, 2.0);
    assert_eq!((plan.pixel_width, plan.pixel_height), (2000.0, 1600.0));
    assert_eq!((plan.share_width, plan.share_height), (2000.0, 1600.0));
}

#[test]
fn plan_downscales_share_copy() {
    let plan = ExportLimits::default().plan(2000.0, 1000.0, 2.0);
    assert_eq!((plan.pixel_width, plan.pixel_height), (4000.0, 2000.0));
    assert_eq!((plan.share_width, plan.share_height), (3000.0, 1500.0));
}

#[test]
fn plan_uses_configured_limits() {
    let limits = ExportLimits {
        max_share_dimension: 1000.0,
        ..ExportLimits::default()
    };
    let plan = limits.plan(1000.0, 500.0, 1.0);
    assert_eq!((plan.share_width, plan.share_height), (1000.0, 500.0));
    let plan = limits.plan(2000.0, 500.0, 1.0);
    assert_eq!((plan.share_width, plan.share_height), (1000.0, 250.0));
}

#[test]
fn plan_tolerates_degenerate_content() {
    let plan = ExportLimits::default().plan(-10.0, f64::NAN, 2.0);
    assert_eq!(plan.scale, 2.0);
    assert_eq!((plan.pixel_width, plan.pixel_height), (0.0, 0.0));
    assert_eq!((plan.share_width, plan.share_height), (0.0, 0.0));
}
