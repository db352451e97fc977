use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuadviewError;
use crate::geometry::Point;

pub const DEFAULT_COMMENT_TEXT: &str = "Text";

/// Preset comment colours. Each pairs a text colour with a highlight chosen
/// to keep the text legible on arbitrary image content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentColor {
    #[default]
    White,
    Red,
    Blue,
    Black,
    Yellow,
    Green,
}

impl CommentColor {
    pub const ALL: [CommentColor; 6] = [
        CommentColor::White,
        CommentColor::Red,
        CommentColor::Blue,
        CommentColor::Black,
        CommentColor::Yellow,
        CommentColor::Green,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Black => "black",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }

    pub fn text_rgba(self) -> [u8; 4] {
        match self {
            Self::White => [255, 255, 255, 255],
            Self::Red => [255, 0, 0, 255],
            Self::Blue => [0, 0, 255, 255],
            Self::Black => [0, 0, 0, 255],
            Self::Yellow => [255, 255, 0, 255],
            Self::Green => [0, 255, 0, 255],
        }
    }

    pub fn highlight_rgba(self) -> [u8; 4] {
        match self {
            Self::Red | Self::Blue => [255, 255, 255, 123],
            Self::Black => [255, 255, 255, 255],
            Self::White | Self::Yellow | Self::Green => [0, 0, 0, 31],
        }
    }
}

impl std::fmt::Display for CommentColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CommentColor {
    type Err = QuadviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| QuadviewError::InvalidArgument(format!("unknown comment color '{s}'")))
    }
}

/// Free-text note anchored at a main-scene position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub anchor: Point,
    pub text: String,
    pub color: CommentColor,
}

impl Comment {
    pub fn new(anchor: Point) -> Self {
        Self {
            anchor,
            text: DEFAULT_COMMENT_TEXT.to_string(),
            color: CommentColor::default(),
        }
    }

    pub fn with_text(anchor: Point, text: impl Into<String>, color: CommentColor) -> Self {
        Self {
            anchor,
            text: text.into(),
            color,
        }
    }
}
