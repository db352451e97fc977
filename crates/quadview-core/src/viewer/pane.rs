use image::RgbaImage;
use tracing::warn;

use super::split::PaneRegion;
use crate::compose::opacity::apply_opacity;
use crate::config::TransformMode;
use crate::geometry::{Rect, Size, ViewTransform};
use crate::raster::Raster;

/// Where a pane sits in the split view. The main pane fills the whole view
/// and is visible in the top-left quadrant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanePosition {
    Main,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl PanePosition {
    pub const ALL: [PanePosition; 4] = [
        PanePosition::Main,
        PanePosition::TopRight,
        PanePosition::BottomRight,
        PanePosition::BottomLeft,
    ];

    pub const OVERLAYS: [PanePosition; 3] = [
        PanePosition::TopRight,
        PanePosition::BottomRight,
        PanePosition::BottomLeft,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::Main => 0,
            Self::TopRight => 1,
            Self::BottomRight => 2,
            Self::BottomLeft => 3,
        }
    }
}

impl std::fmt::Display for PanePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Main => write!(f, "Top left (main)"),
            Self::TopRight => write!(f, "Top right"),
            Self::BottomRight => write!(f, "Bottom right"),
            Self::BottomLeft => write!(f, "Bottom left"),
        }
    }
}

/// Resampling used when drawing a pane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interpolation {
    Nearest,
    Smooth,
}

/// One image slot of a viewer: the original raster, its opacity-adjusted
/// copy, and where it currently shows.
#[derive(Clone, Debug)]
pub struct Pane {
    position: PanePosition,
    raster: Option<Raster>,
    /// Alpha-scaled copy; `None` while opacity is 100.
    displayed: Option<RgbaImage>,
    opacity: u8,
    adjust_factor: f64,
    transform: ViewTransform,
    visible_rect: Rect,
    widget_rect: Rect,
}

impl Pane {
    /// Build a pane. Zero-sized rasters are treated as absent.
    pub fn new(position: PanePosition, raster: Option<Raster>) -> Self {
        let raster = raster.filter(|r| {
            if r.is_empty() {
                warn!(%position, width = r.width(), height = r.height(), "Ignoring empty image");
            }
            !r.is_empty()
        });
        Self {
            position,
            raster,
            displayed: None,
            opacity: 100,
            adjust_factor: 1.0,
            transform: ViewTransform::identity(),
            visible_rect: Rect::default(),
            widget_rect: Rect::default(),
        }
    }

    pub fn position(&self) -> PanePosition {
        self.position
    }

    pub fn exists(&self) -> bool {
        self.raster.is_some()
    }

    pub fn raster(&self) -> Option<&Raster> {
        self.raster.as_ref()
    }

    pub fn size(&self) -> Size {
        self.raster.as_ref().map(Raster::size).unwrap_or_default()
    }

    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    /// Set opacity in percent (clamped to 100) and regenerate the displayed
    /// raster from the untouched original. Absent panes stay at 100.
    pub fn set_opacity(&mut self, percent: u8) -> u8 {
        let Some(raster) = self.raster.as_ref() else {
            self.opacity = 100;
            return self.opacity;
        };
        let percent = percent.min(100);
        self.opacity = percent;
        self.displayed = if percent == 100 {
            None
        } else {
            Some(apply_opacity(&raster.pixels, percent))
        };
        self.opacity
    }

    /// Pixels to draw: the opacity-adjusted copy, or the original at 100 %.
    pub fn displayed_pixels(&self) -> Option<&RgbaImage> {
        self.displayed
            .as_ref()
            .or_else(|| self.raster.as_ref().map(|r| &r.pixels))
    }

    pub fn adjust_factor(&self) -> f64 {
        self.adjust_factor
    }

    pub(crate) fn set_adjust_factor(&mut self, factor: f64) {
        self.adjust_factor = factor;
    }

    /// Widget-to-pane-scene transform.
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Visible bounds in this pane's own scene space.
    pub fn visible_rect(&self) -> Rect {
        self.visible_rect
    }

    /// Quadrant of the viewer widget this pane is drawn into.
    pub fn widget_rect(&self) -> Rect {
        self.widget_rect
    }

    pub(crate) fn apply_region(&mut self, region: &PaneRegion) {
        self.transform = region.transform;
        self.visible_rect = region.scene_rect;
        self.widget_rect = region.widget_rect;
    }

    /// Smooth when the pane is shown below native size or smoothing is forced.
    pub fn interpolation(&self, mode: TransformMode) -> Interpolation {
        if self.transform.scale < 1.0 || mode == TransformMode::Smooth {
            Interpolation::Smooth
        } else {
            Interpolation::Nearest
        }
    }
}
