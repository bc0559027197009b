//! WASM bindings for chronograph-layout.
//!
//! Exposes day timelines, the weekly grid, list views, the row-height solver,
//! export sizing and export filename seeds to JavaScript via `wasm-bindgen`. Events and
//! request options cross the boundary as JSON strings; results come back as
//! JSON strings with privacy redaction already applied.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p chronograph-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/chronograph_wasm.wasm
//! ```

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use chronograph_layout::export::filename_seed;
use chronograph_layout::grid::layout_week;
use chronograph_layout::list::group_by_day;
use chronograph_layout::time::{parse_instant, parse_timezone};
use chronograph_layout::timeline::layout_day_view;
use chronograph_layout::{
    bucketize, resolve, DateRangeSelector, Event, Language, LayoutConfig, PrivacyMode, ViewModel,
    ViewOptions,
};

// ---------------------------------------------------------------------------
// Request DTO
// ---------------------------------------------------------------------------

/// Options shared by every layout export. Omitted fields take defaults.
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RequestDto {
    /// Range identifier; ignored when both custom bounds are given.
    range: Option<String>,
    custom_start: Option<String>,
    custom_end: Option<String>,
    timezone: Option<String>,
    /// Reference instant; the host clock is not consulted.
    now: Option<String>,
    privacy: Option<String>,
    language: Option<String>,
    config: Option<LayoutConfig>,
    grid_width: Option<f64>,
    collapse_empty_days: bool,
}

/// A request with every string parsed.
struct Request {
    selector: DateRangeSelector,
    now: DateTime<Utc>,
    tz: Tz,
    privacy: PrivacyMode,
    language: Language,
    config: LayoutConfig,
    grid_width: Option<f64>,
    collapse_empty_days: bool,
}

// ---------------------------------------------------------------------------
// Native helpers (String errors, testable off-wasm)
// ---------------------------------------------------------------------------

fn parse_events(json: &str) -> Result<Vec<Event>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid events JSON: {}", e))
}

fn parse_request(json: &str) -> Result<Request, String> {
    let dto: RequestDto = if json.trim().is_empty() {
        RequestDto::default()
    } else {
        serde_json::from_str(json).map_err(|e| format!("Invalid options JSON: {}", e))?
    };

    let selector = match (&dto.custom_start, &dto.custom_end) {
        (Some(start), Some(end)) => DateRangeSelector::Custom {
            start: parse_instant(start).map_err(|e| e.to_string())?,
            end_exclusive: parse_instant(end).map_err(|e| e.to_string())?,
        },
        _ => dto
            .range
            .as_deref()
            .unwrap_or("today")
            .parse()
            .map_err(|e: chronograph_layout::LayoutError| e.to_string())?,
    };
    let now = match dto.now.as_deref() {
        Some(raw) => parse_instant(raw).map_err(|e| e.to_string())?,
        None => return Err("Missing 'now': pass the reference instant".to_string()),
    };
    let tz = parse_timezone(dto.timezone.as_deref().unwrap_or("UTC")).map_err(|e| e.to_string())?;
    let privacy = match dto.privacy.as_deref() {
        Some(raw) => raw
            .parse()
            .map_err(|e: chronograph_layout::LayoutError| e.to_string())?,
        None => PrivacyMode::default(),
    };
    let language = match dto.language.as_deref() {
        Some(raw) => raw
            .parse()
            .map_err(|e: chronograph_layout::LayoutError| e.to_string())?,
        None => Language::default(),
    };
    let config = dto.config.unwrap_or_default();
    config.validate().map_err(|e| e.to_string())?;

    Ok(Request {
        selector,
        now,
        tz,
        privacy,
        language,
        config,
        grid_width: dto.grid_width,
        collapse_empty_days: dto.collapse_empty_days,
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn layout_days_native(events_json: &str, options_json: &str) -> Result<String, String> {
    let events = parse_events(events_json)?;
    let req = parse_request(options_json)?;
    let interval = resolve(&req.selector, req.now, &req.tz);
    let days: Vec<_> = bucketize(&events, &interval, &req.tz)
        .iter()
        .map(|bucket| layout_day_view(bucket, &req.config.timeline, req.privacy, req.language, &req.tz))
        .collect();
    to_json(&days)
}

fn layout_week_native(events_json: &str, options_json: &str, grid_width: f64) -> Result<String, String> {
    let events = parse_events(events_json)?;
    let req = parse_request(options_json)?;
    let interval = resolve(&req.selector, req.now, &req.tz);
    let geometry = req.config.grid;
    let grid = layout_week(
        &events,
        &interval,
        &req.tz,
        &geometry,
        geometry.solve(grid_width),
        req.privacy,
        req.language,
    );
    to_json(&grid)
}

fn list_view_native(events_json: &str, options_json: &str) -> Result<String, String> {
    let events = parse_events(events_json)?;
    let req = parse_request(options_json)?;
    let interval = resolve(&req.selector, req.now, &req.tz);
    let days = group_by_day(
        &events,
        &interval,
        req.now,
        &req.tz,
        req.privacy,
        req.language,
        req.collapse_empty_days,
    );
    to_json(&days)
}

fn view_model_native(events_json: &str, options_json: &str) -> Result<String, String> {
    let events = parse_events(events_json)?;
    let req = parse_request(options_json)?;
    let options = ViewOptions {
        privacy: req.privacy,
        language: req.language,
        config: req.config,
        grid_width: req.grid_width,
        collapse_empty_days: req.collapse_empty_days,
    };
    let model = ViewModel::build(&events, &req.selector, req.now, &req.tz, &options);
    to_json(&model)
}

fn filename_seed_native(app_name: &str, range: &str, now: &str, timezone: &str) -> Result<String, String> {
    let selector: DateRangeSelector = range
        .parse()
        .map_err(|e: chronograph_layout::LayoutError| e.to_string())?;
    let now = parse_instant(now).map_err(|e| e.to_string())?;
    let tz = parse_timezone(timezone).map_err(|e| e.to_string())?;
    Ok(filename_seed(app_name, &selector, now, &tz))
}

fn export_plan_native(
    content_width: f64,
    content_height: f64,
    display_scale: f64,
    config_json: &str,
) -> Result<String, String> {
    let config: LayoutConfig = if config_json.trim().is_empty() {
        LayoutConfig::default()
    } else {
        serde_json::from_str(config_json).map_err(|e| format!("Invalid config JSON: {}", e))?
    };
    config.validate().map_err(|e| e.to_string())?;
    to_json(&config.export.plan(content_width, content_height, display_scale))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Lay out one timeline per local day of the requested range.
///
/// `events_json` is a JSON array of events (`id`, `title`, `startDate`,
/// `endDate`, `isAllDay`, ...). `options_json` is an object with `now`
/// (required), `range`, `customStart`/`customEnd`, `timezone`, `privacy`,
/// `language` and `config`.
#[wasm_bindgen(js_name = "layoutDays")]
pub fn layout_days(events_json: &str, options_json: &str) -> Result<String, JsValue> {
    layout_days_native(events_json, options_json).map_err(|e| JsValue::from_str(&e))
}

/// Lay out the seven-column grid for the week around the requested range,
/// solving row height for a grid measured at `grid_width` points.
#[wasm_bindgen(js_name = "layoutWeek")]
pub fn layout_week_js(events_json: &str, options_json: &str, grid_width: f64) -> Result<String, JsValue> {
    layout_week_native(events_json, options_json, grid_width).map_err(|e| JsValue::from_str(&e))
}

/// Group events by local start day for the list surface.
#[wasm_bindgen(js_name = "listView")]
pub fn list_view(events_json: &str, options_json: &str) -> Result<String, JsValue> {
    list_view_native(events_json, options_json).map_err(|e| JsValue::from_str(&e))
}

/// Build the complete view model: day timelines, the weekly grid (when the
/// range is weekly and `gridWidth` is given), list days and the filename seed.
#[wasm_bindgen(js_name = "viewModel")]
pub fn view_model(events_json: &str, options_json: &str) -> Result<String, JsValue> {
    view_model_native(events_json, options_json).map_err(|e| JsValue::from_str(&e))
}

/// Hour row height that makes a 24-row grid roughly square.
#[wasm_bindgen(js_name = "solveRowHeight")]
pub fn solve_row_height(
    grid_width: f64,
    header_height: f64,
    prefer_square: bool,
    min_row_height: f64,
    base_row_height: f64,
) -> f64 {
    chronograph_layout::solve_row_height(
        grid_width,
        header_height,
        prefer_square,
        min_row_height,
        base_row_height,
    )
}

/// Export filename seed such as `ChronoGraph_this-week_20260318`.
#[wasm_bindgen(js_name = "filenameSeed")]
pub fn filename_seed_js(app_name: &str, range: &str, now: &str, timezone: &str) -> Result<String, JsValue> {
    filename_seed_native(app_name, range, now, timezone).map_err(|e| JsValue::from_str(&e))
}

/// Render scale, pixel size and share-sheet size for exporting content of
/// the given size in points. `config_json` is a layout config object (or an
/// empty string for defaults); only its `export` limits are read.
#[wasm_bindgen(js_name = "exportPlan")]
pub fn export_plan(
    content_width: f64,
    content_height: f64,
    display_scale: f64,
    config_json: &str,
) -> Result<String, JsValue> {
    export_plan_native(content_width, content_height, display_scale, config_json)
        .map_err(|e| JsValue::from_str(&e))
}
