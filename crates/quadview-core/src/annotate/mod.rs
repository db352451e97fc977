//! Rulers and comments anchored in main-scene coordinates.

pub mod comment;
pub mod export;
pub mod overlay;
pub mod ruler;
pub mod units;

pub use comment::{Comment, CommentColor};
pub use overlay::{Annotation, AnnotationId, AnnotationOverlay};
pub use ruler::{Endpoint, Measurement, Ruler, RulerOrigin};
pub use units::{LengthUnit, PixelConversion};
