//! Weekly grid: seven Monday–Sunday columns of full-day timelines, with a row
//! height solved from the measured width so the grid comes out near-square.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::bucket::{bucketize, DayBucket};
use crate::event::Event;
use crate::language::Language;
use crate::privacy::PrivacyMode;
use crate::time::{add_days, day_start, local_date, DateInterval};
use crate::timeline::{layout_day_view, DayTimeline, TimelineConfig};

pub const HOURS_PER_DAY: f64 = 24.0;
pub const DAYS_PER_WEEK: usize = 7;

/// Width changes at or below this many pixels do not trigger a re-solve.
pub const RESOLVE_EPSILON_PX: f64 = 0.5;

/// Row height per hour chosen for a measured grid width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowHeightSolution {
    pub hour_row_height: f64,
}

/// Solve the hour row height for a 24-row grid.
///
/// Without `prefer_square` the base height is returned untouched. Otherwise
/// the rows share `grid_width_px - header_height_px` so total height roughly
/// equals width, never dropping below `min_row_height_px`. A grid no wider than
/// its header falls back to the minimum.
pub fn solve_row_height(
    grid_width_px: f64,
    header_height_px: f64,
    prefer_square: bool,
    min_row_height_px: f64,
    base_row_height_px: f64,
) -> f64 {
    if !prefer_square {
        return base_row_height_px;
    }
    let available = grid_width_px - header_height_px;
    if !available.is_finite() || available <= 0.0 {
        return min_row_height_px;
    }
    (available / HOURS_PER_DAY).max(min_row_height_px)
}

/// Fixed chrome and sizing rules of the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridGeometry {
    pub base_row_height: f64,
    pub min_row_height: f64,
    pub min_block_height: f64,
    pub day_header_height: f64,
    pub all_day_area_height: f64,
    pub prefer_square: bool,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            base_row_height: 48.0,
            min_row_height: 28.0,
            min_block_height: 18.0,
            day_header_height: 40.0,
            all_day_area_height: 34.0,
            prefer_square: true,
        }
    }
}

impl GridGeometry {
    /// Vertical space above the hour rows.
    pub fn header_height(&self) -> f64 {
        self.day_header_height + self.all_day_area_height
    }

    pub fn solve(&self, grid_width_px: f64) -> RowHeightSolution {
        RowHeightSolution {
            hour_row_height: solve_row_height(
                grid_width_px,
                self.header_height(),
                self.prefer_square,
                self.min_row_height,
                self.base_row_height,
            ),
        }
    }

    pub fn total_height(&self, solution: RowHeightSolution) -> f64 {
        self.header_height() + HOURS_PER_DAY * solution.hour_row_height
    }
}

/// Keeps the last solution and only re-solves when the width moves by more
/// than [`RESOLVE_EPSILON_PX`], so sub-pixel measurement jitter cannot make
/// the layout oscillate.
#[derive(Debug, Clone)]
pub struct RowHeightSolver {
    geometry: GridGeometry,
    last: Option<(f64, RowHeightSolution)>,
}

impl RowHeightSolver {
    pub fn new(geometry: GridGeometry) -> Self {
        Self {
            geometry,
            last: None,
        }
    }

    /// Feed a newly measured width; returns the solution to use.
    pub fn update(&mut self, grid_width_px: f64) -> RowHeightSolution {
        if let Some((width, solution)) = self.last {
            if (grid_width_px - width).abs() <= RESOLVE_EPSILON_PX {
                return solution;
            }
        }
        let solution = self.geometry.solve(grid_width_px);
        self.last = Some((grid_width_px, solution));
        solution
    }

    /// The current solution, or the base height before any measurement.
    pub fn current(&self) -> RowHeightSolution {
        self.last
            .map(|(_, solution)| solution)
            .unwrap_or(RowHeightSolution {
                hour_row_height: self.geometry.base_row_height,
            })
    }
}

/// Monday through Sunday of the ISO week containing the interval's midpoint.
///
/// The midpoint keeps a range that starts late on a Sunday or ends on a
/// Monday boundary from selecting a neighbouring week.
pub fn week_days<Tz: TimeZone>(interval: &DateInterval, tz: &Tz) -> Vec<NaiveDate> {
    let mid = local_date(interval.midpoint(), tz);
    let back = i64::from(mid.weekday().num_days_from_monday());
    let monday = add_days(mid, -back).unwrap_or(mid);
    (0..DAYS_PER_WEEK as i64)
        .filter_map(|offset| add_days(monday, offset))
        .collect()
}

/// A laid-out week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyGrid<'a> {
    pub week_start: DateTime<Utc>,
    pub week_end: DateTime<Utc>,
    pub row_height: RowHeightSolution,
    pub header_height: f64,
    pub total_height: f64,
    pub columns: Vec<DayTimeline<'a>>,
}

/// Lay out the week around `interval` for a grid measured at `grid_width_px`.
///
/// Always produces seven columns; days without events are empty columns.
pub fn layout_week<'a, Tz: TimeZone>(
    events: &'a [Event],
    interval: &DateInterval,
    tz: &Tz,
    geometry: &GridGeometry,
    solution: RowHeightSolution,
    mode: PrivacyMode,
    language: Language,
) -> WeeklyGrid<'a> {
    let days = week_days(interval, tz);
    let (Some(&first), Some(&last)) = (days.first(), days.last()) else {
        return WeeklyGrid {
            week_start: interval.start,
            week_end: interval.start,
            row_height: solution,
            header_height: geometry.header_height(),
            total_height: geometry.total_height(solution),
            columns: Vec::new(),
        };
    };
    let week_start = day_start(first, tz);
    let week_end = day_start(add_days(last, 1).unwrap_or(last), tz);
    let week = DateInterval::new(week_start, week_end);

    let mut buckets = bucketize(events, &week, tz).into_iter().peekable();
    let config = TimelineConfig::full_day(solution.hour_row_height, geometry.min_block_height);
    let columns = days
        .iter()
        .map(|&date| {
            let bucket = match buckets.next_if(|b| b.date == date) {
                Some(bucket) => bucket,
                None => DayBucket::empty(date, tz),
            };
            layout_day_view(&bucket, &config, mode, language, tz)
        })
        .collect();

    WeeklyGrid {
        week_start,
        week_end,
        row_height: solution,
        header_height: geometry.header_height(),
        total_height: geometry.total_height(solution),
        columns,
    }
}
