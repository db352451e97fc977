/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Extra scene units added to the far edge of every overlay pane rectangle so
/// that rounding at the split line never exposes the main pane underneath.
pub const RENDER_BUFFER: f64 = 100.0;

/// Fraction of the viewport kept visible when an image is panned fully
/// off-screen.
pub const PEEK_FRACTION: f64 = 0.1;

/// Multiplicative zoom step for zoom in/out and per wheel notch.
pub const ZOOM_FACTOR_DELTA: f64 = 1.25;

/// Wheel angle delta corresponding to one zoom notch.
pub const WHEEL_NOTCH_DELTA: f64 = 240.0;

/// Padding (in screen pixels) left around the image by fit operations.
pub const FIT_PADDING_MARGIN: f64 = 2.0;

/// Widget-space offset applied to pointer-driven split updates so the cursor
/// hovers the main pane rather than an overlay edge.
pub const SPLIT_CURSOR_OFFSET: f64 = 1.0;

/// New rulers are placed at one and two thirds of the widget diagonal.
pub const RULER_PLACEMENT_FRACTION: f64 = 1.0 / 3.0;

/// Relative tolerance for deciding whether a view transform has changed.
pub const TRANSFORM_CHANGE_TOLERANCE: f64 = 0.001;

/// Average background channel value at or above which foreground chrome
/// switches to a dark palette.
pub const LIGHT_BACKGROUND_THRESHOLD: f64 = 223.0;

/// Delimiter of the annotation text format.
pub const ANNOTATION_DELIMITER: u8 = b'|';

/// Application name written into exported annotation files.
pub const ANNOTATION_APP_NAME: &str = "Quadview";

/// Annotation file format version.
pub const ANNOTATION_FORMAT_VERSION: &str = "1.0";
