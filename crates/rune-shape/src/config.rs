//! Shaping configuration.
//!
//! Settings are read from `rune-shape.toml` with environment variable
//! overrides, and then passed explicitly to the calls that need them. There
//! is no process-wide toggle.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShapeError};
use crate::shaping::ShapeFlags;
use crate::units::GlyphUnit;

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "rune-shape.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    /// Snap glyph widths and offsets to whole device units after shaping.
    pub round_glyph_positions: bool,
    /// Validate glyph string invariants after every shape call and log
    /// violations.
    pub debug_checks: bool,
    /// Default tab width in device units. When unset, the width of eight
    /// spaces in the tab's font is used.
    pub tab_width: Option<f32>,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            round_glyph_positions: true,
            debug_checks: false,
            tab_width: None,
        }
    }
}

impl ShapeConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ShapeError::ConfigIo)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load `rune-shape.toml` from the current directory, or defaults if it
    /// is missing or malformed.
    pub fn load_or_default() -> Self {
        match Self::load_from_file(CONFIG_FILE) {
            Ok(config) => config,
            Err(ShapeError::ConfigIo(_)) => Self::default(),
            Err(err) => {
                tracing::warn!("ignoring {CONFIG_FILE}: {err}");
                Self::default()
            }
        }
    }

    /// Apply environment variable overrides on top of the current values.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("RUNE_SHAPE_ROUND_POSITIONS") {
            self.round_glyph_positions = parse_flag(&val);
        }
        if let Ok(val) = std::env::var("RUNE_SHAPE_DEBUG_CHECKS") {
            self.debug_checks = parse_flag(&val);
        }
        if let Ok(val) = std::env::var("RUNE_SHAPE_TAB_WIDTH") {
            match val.parse::<f32>() {
                Ok(width) => self.tab_width = Some(width),
                Err(_) => tracing::warn!("RUNE_SHAPE_TAB_WIDTH is not a number: {val:?}"),
            }
        }
    }

    /// Defaults, then file, then environment.
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }

    /// Shape flags implied by this configuration.
    pub fn shape_flags(&self) -> ShapeFlags {
        let mut flags = ShapeFlags::empty();
        if self.round_glyph_positions {
            flags |= ShapeFlags::ROUND_POSITIONS;
        }
        if self.debug_checks {
            flags |= ShapeFlags::VALIDATE;
        }
        flags
    }

    /// Configured tab width, if any, in glyph units.
    pub fn tab_width(&self) -> Option<GlyphUnit> {
        self.tab_width.map(GlyphUnit::from_f32)
    }
}

fn parse_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_positions() {
        let config = ShapeConfig::default();
        assert!(config.round_glyph_positions);
        assert!(!config.debug_checks);
        assert_eq!(config.shape_flags(), ShapeFlags::ROUND_POSITIONS);
    }

    #[test]
    fn toml_round_trip_keeps_fields() {
        let config = ShapeConfig {
            round_glyph_positions: false,
            debug_checks: true,
            tab_width: Some(32.0),
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: ShapeConfig = toml::from_str(&text).unwrap();
        assert!(!parsed.round_glyph_positions);
        assert!(parsed.debug_checks);
        assert_eq!(parsed.tab_width(), Some(GlyphUnit::from_device_units(32)));
        assert_eq!(parsed.shape_flags(), ShapeFlags::VALIDATE);
    }

    #[test]
    fn partial_file_uses_defaults() {
        let parsed: ShapeConfig = toml::from_str("debug_checks = true").unwrap();
        assert!(parsed.round_glyph_positions);
        assert!(parsed.debug_checks);
        assert_eq!(parsed.tab_width, None);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ShapeConfig::load_from_file("/nonexistent/rune-shape.toml").unwrap_err();
        assert!(matches!(err, ShapeError::ConfigIo(_)));
    }

    #[test]
    fn merge_with_env_overrides() {
        unsafe {
            std::env::set_var("RUNE_SHAPE_ROUND_POSITIONS", "false");
            std::env::set_var("RUNE_SHAPE_TAB_WIDTH", "40");
        }

        let mut config = ShapeConfig::default();
        config.merge_with_env();
        assert!(!config.round_glyph_positions);
        assert_eq!(config.tab_width, Some(40.0));

        unsafe {
            std::env::remove_var("RUNE_SHAPE_ROUND_POSITIONS");
            std::env::remove_var("RUNE_SHAPE_TAB_WIDTH");
        }
    }
}
