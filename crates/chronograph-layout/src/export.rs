//! Export naming and sizing. The core never rasterizes; it tells the export
//! collaborator what to call the file and how large to render it.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::range::DateRangeSelector;
use crate::time::local_date;

/// Pixel limits for rendered and shared images.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportLimits {
    /// Longest side the renderer may produce, in pixels.
    pub max_pixel_dimension: f64,
    /// Render scale ceiling even on denser displays.
    pub preferred_max_scale: f64,
    /// Longest side of an image handed to the share sheet.
    pub max_share_dimension: f64,
}

impl Default for ExportLimits {
    fn default() -> Self {
        Self {
            max_pixel_dimension: 16384.0,
            preferred_max_scale: 2.0,
            max_share_dimension: 3000.0,
        }
    }
}

/// `{app}_{rangeKey}_{yyyyMMdd}`, ASCII only.
///
/// The date is today's local date in `tz`. Characters of `app_name` outside
/// `[A-Za-z0-9-]` become `-`.
pub fn filename_seed<Tz: TimeZone>(
    app_name: &str,
    selector: &DateRangeSelector,
    now: DateTime<Utc>,
    tz: &Tz,
) -> String {
    let app: String = app_name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect();
    let app = if app.is_empty() { "export".to_string() } else { app };
    format!(
        "{}_{}_{}",
        app,
        selector.range_key(),
        local_date(now, tz).format("%Y%m%d")
    )
}

/// Render scale for content of the given size in points.
///
/// Starts from the display scale capped at `preferred_max_scale`, lowers it so
/// the longest side stays within `max_pixel_dimension`, and never goes below 1.
pub fn export_scale(
    content_width: f64,
    content_height: f64,
    display_scale: f64,
    limits: &ExportLimits,
) -> f64 {
    let display_scale = if display_scale.is_finite() && display_scale > 0.0 {
        display_scale
    } else {
        1.0
    };
    let requested = display_scale.min(limits.preferred_max_scale);
    let longest = content_width.max(content_height);
    let capped = if longest.is_finite() && longest > 0.0 {
        requested.min(limits.max_pixel_dimension / longest)
    } else {
        requested
    };
    capped.max(1.0)
}

/// Proportionally shrink `(width, height)` so the longest side fits
/// `max_dimension`, flooring to whole pixels. Smaller images pass through.
pub fn downscaled_size(width: f64, height: f64, max_dimension: f64) -> (f64, f64) {
    let longest = width.max(height);
    if longest.is_nan() || longest <= max_dimension || longest <= 0.0 {
        return (width, height);
    }
    let scale = max_dimension / longest;
    ((width * scale).floor(), (height * scale).floor())
}

/// Pixel sizes for one export: the rendered image and its share-sheet copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExportPlan {
    pub scale: f64,
    pub pixel_width: f64,
    pub pixel_height: f64,
    pub share_width: f64,
    pub share_height: f64,
}

impl ExportLimits {
    /// Size the render of `content_width` x `content_height` points on a
    /// display of `display_scale`, and the downscaled copy for sharing.
    ///
    /// Negative or non-finite content sizes are treated as zero.
    pub fn plan(&self, content_width: f64, content_height: f64, display_scale: f64) -> ExportPlan {
        let width = non_negative(content_width);
        let height = non_negative(content_height);
        let scale = export_scale(width, height, display_scale, self);
        let pixel_width = (width * scale).round();
        let pixel_height = (height * scale).round();
        let (share_width, share_height) =
            downscaled_size(pixel_width, pixel_height, self.max_share_dimension);
        ExportPlan {
            scale,
            pixel_width,
            pixel_height,
            share_width,
            share_height,
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
