//! # chronograph-layout
//!
//! Deterministic layout of calendar events into shareable visual models.
//!
//! Given a slice of [`Event`]s, a [`DateRangeSelector`], a [`PrivacyMode`] and a
//! time zone, the crate produces day buckets, clamped timeline geometry, a
//! near-square weekly grid and list rows with privacy redaction already
//! applied. Every layout function is pure and total: malformed input degrades
//! to an empty or zero-sized result, never an error.
//!
//! ## Modules
//!
//! - [`event`]: the event value and availability status
//! - [`range`]: date-range selectors → concrete local-day intervals
//! - [`bucket`]: interval → per-day buckets with all-day/timed lanes
//! - [`timeline`]: clamped block geometry for one day
//! - [`grid`]: weekly grid and the square-aspect row-height solver
//! - [`privacy`]: privacy modes and redaction
//! - [`ordering`]: deterministic event order
//! - [`list`]: flat and per-day list views
//! - [`view_model`]: everything above composed per input change
//! - [`preferences`]: persisted preferences with legacy migration
//! - [`export`]: export filename seed and image sizing
//! - [`sequence`]: last-request-wins tokens for async hosts
//! - [`config`]: TOML-loadable layout constants
//! - [`language`], [`time`], [`error`]: shared support

pub mod bucket;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod grid;
pub mod language;
pub mod list;
pub mod ordering;
pub mod preferences;
pub mod privacy;
pub mod range;
pub mod sequence;
pub mod time;
pub mod timeline;
pub mod view_model;

pub use bucket::{bucketize, DayBucket};
pub use config::LayoutConfig;
pub use error::LayoutError;
pub use event::{Availability, Event};
pub use grid::{solve_row_height, RowHeightSolution, RowHeightSolver};
pub use language::{Language, LanguagePreference};
pub use privacy::{redact, DisplayFields, PrivacyMode};
pub use range::{resolve, DateRangeSelector};
pub use time::DateInterval;
pub use timeline::{layout_all_day, layout_day, AllDayChip, LayoutBlock};
pub use view_model::{ViewModel, ViewOptions};
