//! Tunable layout constants, loadable from TOML.
//!
//! ```toml
//! app_name = "ChronoGraph"
//!
//! [timeline]
//! visible_start_hour = 7
//! visible_end_hour = 22
//!
//! [grid]
//! prefer_square = false
//! ```
//!
//! Omitted keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::export::ExportLimits;
use crate::grid::GridGeometry;
use crate::timeline::TimelineConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Prefix of export filenames.
    pub app_name: String,
    pub timeline: TimelineConfig,
    pub grid: GridGeometry,
    pub export: ExportLimits,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            app_name: "ChronoGraph".to_string(),
            timeline: TimelineConfig::default(),
            grid: GridGeometry::default(),
            export: ExportLimits::default(),
        }
    }
}

impl LayoutConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: LayoutConfig =
            toml::from_str(raw).map_err(|e| LayoutError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| LayoutError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        let t = &self.timeline;
        if t.visible_end_hour > 24 {
            return Err(LayoutError::Config(format!(
                "timeline.visible_end_hour must be at most 24, got {}",
                t.visible_end_hour
            )));
        }
        if t.visible_start_hour >= t.visible_end_hour {
            return Err(LayoutError::Config(format!(
                "timeline window is empty: {}..{}",
                t.visible_start_hour, t.visible_end_hour
            )));
        }

        let lengths = [
            ("timeline.hour_row_height", t.hour_row_height),
            ("timeline.min_block_height", t.min_block_height),
            ("grid.base_row_height", self.grid.base_row_height),
            ("grid.min_row_height", self.grid.min_row_height),
            ("grid.min_block_height", self.grid.min_block_height),
            ("export.max_pixel_dimension", self.export.max_pixel_dimension),
            ("export.preferred_max_scale", self.export.preferred_max_scale),
            ("export.max_share_dimension", self.export.max_share_dimension),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [
            ("grid.day_header_height", self.grid.day_header_height),
            ("grid.all_day_area_height", self.grid.all_day_area_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::Config(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
