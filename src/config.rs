//! Meme configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a user config file overrides any subset of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [canvas]
//! width = 400               # Canvas size in pixels
//! height = 400
//! background = "#000000"    # Border color around non-matching aspect ratios
//!
//! [caption]
//! font = ""                 # .ttf/.otf file; required to draw captions
//! size = 50.0               # Pixel size of the em box
//! fill = "#ffffff"
//! stroke = "#000000"
//! stroke_width = 2          # Outline thickness in pixels (0 = none)
//!
//! [speech]
//! volume = 100              # 0-100
//! voice = ""                # Preferred voice name (empty = engine default)
//!
//! [[speech.voices]]         # Voices offered by the transcript engine
//! name = "Alex"
//! lang = "en-US"
//! default = true
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [canvas]
//! width = 600
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{CanvasConfig, CaptionStyle, Dimensions, Rgba};
use crate::speech::Voice;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Meme configuration loaded from `config.toml`.
///
/// All fields have defaults matching the classic meme look: a 400×400 black
/// canvas with 50px white captions outlined in black.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemeConfig {
    pub canvas: CanvasSection,
    pub caption: CaptionSection,
    pub speech: SpeechSection,
}

/// Canvas size and background.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasSection {
    pub width: u32,
    pub height: u32,
    /// Hex color filled behind the image.
    pub background: String,
}

impl Default for CanvasSection {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            background: "#000000".to_string(),
        }
    }
}

/// Caption text style.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptionSection {
    /// Font file path; empty means "not configured".
    pub font: String,
    pub size: f32,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: u32,
}

impl Default for CaptionSection {
    fn default() -> Self {
        Self {
            font: String::new(),
            size: 50.0,
            fill: "#ffffff".to_string(),
            stroke: "#000000".to_string(),
            stroke_width: 2,
        }
    }
}

/// Speech settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpeechSection {
    /// Volume percentage, 0-100.
    pub volume: u32,
    /// Preferred voice name; empty keeps the engine default.
    pub voice: String,
    /// Voices offered by the transcript engine.
    pub voices: Vec<Voice>,
}

impl Default for SpeechSection {
    fn default() -> Self {
        Self {
            volume: 100,
            voice: String::new(),
            voices: Vec::new(),
        }
    }
}

fn parse_color(key: &str, value: &str) -> Result<Rgba, ConfigError> {
    Rgba::from_hex(value).ok_or_else(|| {
        ConfigError::Validation(format!(
            "{key} must be a hex color like \"#ffffff\", got \"{value}\""
        ))
    })
}

impl MemeConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::Validation(
                "canvas.width and canvas.height must be non-zero".into(),
            ));
        }
        if !(self.caption.size.is_finite() && self.caption.size > 0.0) {
            return Err(ConfigError::Validation(
                "caption.size must be a positive number".into(),
            ));
        }
        if self.speech.volume > 100 {
            return Err(ConfigError::Validation(
                "speech.volume must be 0-100".into(),
            ));
        }
        parse_color("canvas.background", &self.canvas.background)?;
        parse_color("caption.fill", &self.caption.fill)?;
        parse_color("caption.stroke", &self.caption.stroke)?;
        Ok(())
    }

    /// Font path, if one is configured.
    pub fn font_path(&self) -> Option<PathBuf> {
        if self.caption.font.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.caption.font))
        }
    }

    /// Render settings for the imaging layer.
    pub fn canvas_config(&self) -> Result<CanvasConfig, ConfigError> {
        Ok(CanvasConfig {
            canvas: Dimensions {
                width: self.canvas.width,
                height: self.canvas.height,
            },
            background: parse_color("canvas.background", &self.canvas.background)?,
            style: CaptionStyle {
                font: self.font_path(),
                size: self.caption.size,
                fill: parse_color("caption.fill", &self.caption.fill)?,
                stroke: parse_color("caption.stroke", &self.caption.stroke)?,
                stroke_width: self.caption.stroke_width,
            },
        })
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Used as the base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(MemeConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<MemeConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: MemeConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file.
///
/// A missing file yields the stock defaults. User values are merged on top of
/// stock defaults, unknown keys are rejected, and the result is validated.
pub fn load_config(path: &Path) -> Result<MemeConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    if overlay.is_none() {
        log::debug!("no config at {}, using defaults", path.display());
    }
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# memecanvas configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Canvas
# ---------------------------------------------------------------------------
[canvas]
# Canvas size in pixels. The image is scaled to span one dimension and
# centered along the other.
width = 400
height = 400

# Color filled behind the image (shows as borders when aspect ratios differ).
background = "#000000"

# ---------------------------------------------------------------------------
# Captions
# ---------------------------------------------------------------------------
[caption]
# TrueType/OpenType font used for captions. Required to draw caption text.
font = ""

# Pixel size of the caption font.
size = 50.0

# Text fill and outline colors.
fill = "#ffffff"
stroke = "#000000"

# Outline thickness in pixels (0 disables the outline).
stroke_width = 2

# ---------------------------------------------------------------------------
# Speech
# ---------------------------------------------------------------------------
[speech]
# Volume percentage, 0-100.
volume = 100

# Preferred voice name. Empty keeps the engine's default voice.
voice = ""

# Voices offered by the built-in transcript engine. Example:
#
# [[speech.voices]]
# name = "Alex"
# lang = "en-US"
# default = true
voices = []
"##
}
