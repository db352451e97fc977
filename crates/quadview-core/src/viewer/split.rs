//! Split-view geometry: one split point in the main view becomes four pane
//! regions, each expressed in its own pane's scene space.

use tracing::debug;

use super::pane::PanePosition;
use crate::geometry::{Point, Rect, Size, ViewTransform};

/// Where one pane shows, in widget space and in its own scene space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaneRegion {
    pub position: PanePosition,
    /// Quadrant of the viewer widget (the full widget for the main pane).
    pub widget_rect: Rect,
    /// Visible bounds in the pane's scaled scene, far edge expanded by the
    /// render buffer for overlays.
    pub scene_rect: Rect,
    /// Widget-to-pane-scene transform.
    pub transform: ViewTransform,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SplitLayout {
    /// Split point in widget space, clamped to the non-negative quadrant.
    pub split_widget: Point,
    /// Split point in main-scene space.
    pub split_scene: Point,
    /// Main region first, then one region per existing overlay.
    pub regions: Vec<PaneRegion>,
}

impl SplitLayout {
    pub fn region(&self, position: PanePosition) -> Option<&PaneRegion> {
        self.regions.iter().find(|r| r.position == position)
    }
}

/// Widget quadrant belonging to `position` for a split at `split` (already
/// clamped to non-negative), bounded to the viewport.
pub fn quadrant_rect(position: PanePosition, split: Point, viewport: Size) -> Rect {
    let sx = split.x.min(viewport.width);
    let sy = split.y.min(viewport.height);
    let (w, h) = (viewport.width, viewport.height);
    match position {
        PanePosition::Main => Rect::from_corners(Point::ZERO, Point::new(sx, sy)),
        PanePosition::TopRight => Rect::from_corners(Point::new(sx, 0.0), Point::new(w, sy)),
        PanePosition::BottomRight => Rect::from_corners(Point::new(sx, sy), Point::new(w, h)),
        PanePosition::BottomLeft => Rect::from_corners(Point::new(0.0, sy), Point::new(sx, h)),
    }
}

/// Compute every pane region for a split at widget point `split_widget`.
///
/// `overlays` lists each existing overlay with its adjustment factor against
/// the main image. Overlay corners are scaled by `1 / factor` so each pane
/// crops its own resolution to the same apparent area.
pub fn compute_split_layout(
    main: &ViewTransform,
    viewport: Size,
    split_widget: Point,
    overlays: &[(PanePosition, f64)],
    render_buffer: f64,
) -> SplitLayout {
    let q = split_widget.clamp_non_negative();
    let origin = main.widget_to_scene(Point::ZERO);
    let split = main.widget_to_scene(q);
    let br = main.widget_to_scene(Point::new(viewport.width, viewport.height));
    let buf = render_buffer;

    let mut regions = Vec::with_capacity(1 + overlays.len());
    regions.push(PaneRegion {
        position: PanePosition::Main,
        widget_rect: Rect::from_size(viewport),
        scene_rect: Rect::from_corners(origin, br),
        transform: *main,
    });

    for &(position, factor) in overlays {
        let s = 1.0 / factor;
        let scene_rect = match position {
            PanePosition::TopRight => Rect::from_corners(
                Point::new(split.x * s, origin.y * s),
                Point::new(br.x * s + buf, split.y * s + buf),
            ),
            PanePosition::BottomRight => Rect::from_corners(
                Point::new(split.x * s, split.y * s),
                Point::new(br.x * s + buf, br.y * s + buf),
            ),
            PanePosition::BottomLeft => Rect::from_corners(
                Point::new(origin.x * s, split.y * s),
                Point::new(split.x * s + buf, br.y * s + buf),
            ),
            PanePosition::Main => continue,
        };
        regions.push(PaneRegion {
            position,
            widget_rect: quadrant_rect(position, q, viewport),
            scene_rect,
            transform: main.rescaled(s),
        });
    }

    debug!(split = ?split, widget = ?q, panes = regions.len(), "Split layout");
    SplitLayout {
        split_widget: q,
        split_scene: split,
        regions,
    }
}
