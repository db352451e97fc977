use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::geometry::Size;

/// Clockwise rotation recorded in an image's EXIF orientation tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    /// Map an EXIF orientation value to a rotation. Mirrored orientations are
    /// treated as unrotated.
    pub fn from_exif_orientation(value: u32) -> Self {
        match value {
            3 => Self::Cw180,
            6 => Self::Cw90,
            8 => Self::Cw270,
            _ => Self::None,
        }
    }

    pub fn degrees(&self) -> u32 {
        match self {
            Self::None => 0,
            Self::Cw90 => 90,
            Self::Cw180 => 180,
            Self::Cw270 => 270,
        }
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            _ => write!(f, "{}°", self.degrees()),
        }
    }
}

/// Decoded RGBA image plus where it came from.
#[derive(Clone, Debug)]
pub struct Raster {
    pub pixels: RgbaImage,
    pub source: Option<PathBuf>,
    /// Rotation already applied to `pixels` at load time.
    pub rotation: Rotation,
}

impl Raster {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            source: None,
            rotation: Rotation::None,
        }
    }

    pub fn with_source(mut self, path: &Path) -> Self {
        self.source = Some(path.to_path_buf());
        self
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Size {
        Size::from_pixels(self.width(), self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// File name of the source, if any.
    pub fn file_name(&self) -> Option<String> {
        self.source
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }
}

impl From<RgbaImage> for Raster {
    fn from(pixels: RgbaImage) -> Self {
        Self::new(pixels)
    }
}
