//! One immutable view model per input change.
//!
//! Hosts keep their own reactive store; whenever events, range, privacy mode
//! or measured width change they call [`ViewModel::build`] and republish the
//! result. Nothing here is cached between calls.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::bucket::bucketize;
use crate::config::LayoutConfig;
use crate::event::Event;
use crate::export::filename_seed;
use crate::grid::{layout_week, RowHeightSolution, WeeklyGrid};
use crate::language::Language;
use crate::list::{group_by_day, ListDay};
use crate::privacy::PrivacyMode;
use crate::range::{resolve, DateRangeSelector};
use crate::time::DateInterval;
use crate::timeline::{layout_day_view, DayTimeline};

/// Presentation inputs that are not events or time.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub privacy: PrivacyMode,
    pub language: Language,
    pub config: LayoutConfig,
    /// Measured grid width; required for the weekly grid.
    pub grid_width: Option<f64>,
    pub collapse_empty_days: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel<'a> {
    pub range: String,
    pub interval: DateInterval,
    pub privacy: PrivacyMode,
    /// Day timelines, one per local day of the interval.
    pub days: Vec<DayTimeline<'a>>,
    /// Present for week selectors once a grid width is known.
    pub week: Option<WeeklyGrid<'a>>,
    pub list: Vec<ListDay<'a>>,
    pub filename_seed: String,
}

impl<'a> ViewModel<'a> {
    pub fn build<Tz: TimeZone>(
        events: &'a [Event],
        selector: &DateRangeSelector,
        now: DateTime<Utc>,
        tz: &Tz,
        options: &ViewOptions,
    ) -> Self {
        let interval = resolve(selector, now, tz);
        let config = &options.config;

        let days = bucketize(events, &interval, tz)
            .iter()
            .map(|bucket| {
                layout_day_view(
                    bucket,
                    &config.timeline,
                    options.privacy,
                    options.language,
                    tz,
                )
            })
            .collect();

        let week = match (selector.is_weekly(), options.grid_width) {
            (true, Some(width)) => {
                let solution: RowHeightSolution = config.grid.solve(width);
                Some(layout_week(
                    events,
                    &interval,
                    tz,
                    &config.grid,
                    solution,
                    options.privacy,
                    options.language,
                ))
            }
            _ => None,
        };

        let list = group_by_day(
            events,
            &interval,
            now,
            tz,
            options.privacy,
            options.language,
            options.collapse_empty_days,
        );

        ViewModel {
            range: selector.identifier(),
            interval,
            privacy: options.privacy,
            days,
            week,
            list,
            filename_seed: filename_seed(&config.app_name, selector, now, tz),
        }
    }
}
