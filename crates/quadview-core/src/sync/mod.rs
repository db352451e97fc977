pub mod controller;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuadviewError;
use crate::geometry::Size;

pub use controller::SyncController;

/// Strategy for matching apparent size between images of different
/// resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncBy {
    /// The longer dimension of each image controls the match.
    #[default]
    Box,
    Width,
    Height,
    /// One image pixel maps to one image pixel regardless of resolution.
    Pixel,
}

impl SyncBy {
    pub const ALL: [SyncBy; 4] = [SyncBy::Box, SyncBy::Width, SyncBy::Height, SyncBy::Pixel];

    /// Dimension of the sender that drives the match, or `None` for pixel
    /// matching.
    pub fn sender_dimension(self, sender: Size) -> Option<f64> {
        match self {
            Self::Width => Some(sender.width),
            Self::Height => Some(sender.height),
            Self::Pixel => None,
            Self::Box => {
                if sender.height >= sender.width {
                    Some(sender.height)
                } else {
                    Some(sender.width)
                }
            }
        }
    }

    /// Factor by which a receiver must be zoomed (relative to the sender) so
    /// both images appear the same size.
    ///
    /// Pinned to 1 for pixel matching and whenever either side is degenerate.
    pub fn adjustment_factor(self, sender_dimension: Option<f64>, receiver: Size) -> f64 {
        if receiver.width <= 0.0 || receiver.height <= 0.0 {
            return 1.0;
        }
        let Some(dim) = sender_dimension else {
            return 1.0;
        };
        let factor = match self {
            Self::Width => dim / receiver.width,
            Self::Height => dim / receiver.height,
            Self::Pixel => 1.0,
            Self::Box => {
                if receiver.width >= receiver.height {
                    dim / receiver.width
                } else {
                    dim / receiver.height
                }
            }
        };
        if factor.is_finite() && factor > 0.0 {
            factor
        } else {
            1.0
        }
    }

    /// Convenience: adjustment factor of `receiver` against `sender`.
    pub fn factor_between(self, sender: Size, receiver: Size) -> f64 {
        self.adjustment_factor(self.sender_dimension(sender), receiver)
    }
}

impl std::fmt::Display for SyncBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Box => write!(f, "box"),
            Self::Width => write!(f, "width"),
            Self::Height => write!(f, "height"),
            Self::Pixel => write!(f, "pixel"),
        }
    }
}

impl FromStr for SyncBy {
    type Err = QuadviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "box" => Ok(Self::Box),
            "width" => Ok(Self::Width),
            "height" => Ok(Self::Height),
            "pixel" => Ok(Self::Pixel),
            other => Err(QuadviewError::InvalidArgument(format!(
                "unknown sync strategy '{other}'"
            ))),
        }
    }
}
