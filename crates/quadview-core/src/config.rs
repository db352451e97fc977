use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::annotate::RulerOrigin;
use crate::consts::{
    LIGHT_BACKGROUND_THRESHOLD, PEEK_FRACTION, RENDER_BUFFER, ZOOM_FACTOR_DELTA,
};
use crate::error::{QuadviewError, Result};
use crate::sync::SyncBy;

/// Image resampling preference for a viewer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformMode {
    /// Nearest-neighbour when magnifying, smooth only when shrinking.
    #[default]
    Fast,
    /// Always smooth.
    Smooth,
}

impl std::fmt::Display for TransformMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fast => write!(f, "fast"),
            Self::Smooth => write!(f, "smooth"),
        }
    }
}

impl FromStr for TransformMode {
    type Err = QuadviewError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "smooth" => Ok(Self::Smooth),
            other => Err(QuadviewError::InvalidArgument(format!(
                "unknown transform mode '{other}'"
            ))),
        }
    }
}

/// Named background presets offered by the viewer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackgroundPreset {
    #[default]
    DarkGray,
    White,
    LightGray,
    Black,
}

impl BackgroundPreset {
    pub const ALL: [BackgroundPreset; 4] = [
        BackgroundPreset::DarkGray,
        BackgroundPreset::White,
        BackgroundPreset::LightGray,
        BackgroundPreset::Black,
    ];

    pub fn color(self) -> BackgroundColor {
        match self {
            Self::DarkGray => BackgroundColor::gray(32),
            Self::White => BackgroundColor::gray(255),
            Self::LightGray => BackgroundColor::gray(223),
            Self::Black => BackgroundColor::gray(0),
        }
    }
}

impl std::fmt::Display for BackgroundPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DarkGray => write!(f, "Dark gray (default)"),
            Self::White => write!(f, "White"),
            Self::LightGray => write!(f, "Light gray"),
            Self::Black => write!(f, "Black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for BackgroundColor {
    fn default() -> Self {
        BackgroundPreset::default().color()
    }
}

impl BackgroundColor {
    pub fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Build a colour from arbitrary integers, clamping each channel to 0–255.
    pub fn clamped(r: i32, g: i32, b: i32) -> Self {
        let c = |v: i32| v.clamp(0, 255) as u8;
        Self {
            r: c(r),
            g: c(g),
            b: c(b),
        }
    }

    /// Whether foreground chrome drawn over this background should be dark.
    pub fn prefers_dark_foreground(&self) -> bool {
        let avg = (self.r as f64 + self.g as f64 + self.b as f64) / 3.0;
        avg >= LIGHT_BACKGROUND_THRESHOLD
    }

    pub fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// Startup defaults applied to every new viewer and to the workspace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppDefaults {
    #[serde(default)]
    pub background: BackgroundColor,
    #[serde(default)]
    pub transform_mode: TransformMode,
    #[serde(default)]
    pub sync_by: SyncBy,
    #[serde(default = "default_true")]
    pub sync_zoom: bool,
    #[serde(default = "default_true")]
    pub sync_pan: bool,
    #[serde(default)]
    pub ruler_origin: RulerOrigin,
    #[serde(default)]
    pub view: ViewConfig,
}

impl Default for AppDefaults {
    fn default() -> Self {
        Self {
            background: BackgroundColor::default(),
            transform_mode: TransformMode::default(),
            sync_by: SyncBy::default(),
            sync_zoom: true,
            sync_pan: true,
            ruler_origin: RulerOrigin::default(),
            view: ViewConfig::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Navigation tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Multiplicative zoom step per zoom action or wheel notch.
    pub zoom_step: f64,
    /// Extra scene units on the far edge of every overlay pane rectangle.
    pub render_buffer: f64,
    /// Fraction of the viewport that stays visible when panning an image away.
    pub peek_fraction: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom_step: ZOOM_FACTOR_DELTA,
            render_buffer: RENDER_BUFFER,
            peek_fraction: PEEK_FRACTION,
        }
    }
}

impl AppDefaults {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let defaults: Self = toml::from_str(s).map_err(|e| QuadviewError::Config(e.to_string()))?;
        defaults.validate()?;
        Ok(defaults)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| QuadviewError::Config(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        let v = &self.view;
        if !(v.zoom_step.is_finite() && v.zoom_step > 1.0) {
            return Err(QuadviewError::Config(format!(
                "zoom_step must be greater than 1, got {}",
                v.zoom_step
            )));
        }
        if !(v.render_buffer.is_finite() && v.render_buffer >= 0.0) {
            return Err(QuadviewError::Config(format!(
                "render_buffer must be non-negative, got {}",
                v.render_buffer
            )));
        }
        if !(0.0..1.0).contains(&v.peek_fraction) {
            return Err(QuadviewError::Config(format!(
                "peek_fraction must be in [0, 1), got {}",
                v.peek_fraction
            )));
        }
        Ok(())
    }
}
