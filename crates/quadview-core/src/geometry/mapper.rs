use serde::{Deserialize, Serialize};

use super::{Point, Rect, Size};
use crate::consts::TRANSFORM_CHANGE_TOLERANCE;

/// Affine zoom/pan transform between widget-local and scene coordinates.
///
/// `scene = offset + widget / scale` and `widget = (scene - offset) * scale`,
/// so `offset` is the scene point shown at the widget's top-left corner and
/// `scale` is the number of screen pixels per scene unit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub scale: f64,
    pub offset: Point,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            offset: Point::ZERO,
        }
    }

    pub fn new(scale: f64, offset: Point) -> Self {
        Self { scale, offset }
    }

    /// Transform that shows `center` in the middle of a viewport of size
    /// `viewport` at the given scale.
    pub fn centered_on(center: Point, scale: f64, viewport: Size) -> Self {
        let offset = Point::new(
            center.x - viewport.width / (2.0 * scale),
            center.y - viewport.height / (2.0 * scale),
        );
        Self { scale, offset }
    }

    pub fn widget_to_scene(&self, p: Point) -> Point {
        Point::new(
            self.offset.x + p.x / self.scale,
            self.offset.y + p.y / self.scale,
        )
    }

    pub fn scene_to_widget(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.offset.x) * self.scale,
            (p.y - self.offset.y) * self.scale,
        )
    }

    pub fn scene_rect_to_widget(&self, r: &Rect) -> Rect {
        Rect::from_corners(
            self.scene_to_widget(r.top_left()),
            self.scene_to_widget(r.bottom_right()),
        )
    }

    /// Scene rectangle covered by a viewport of the given size.
    pub fn visible_scene_rect(&self, viewport: Size) -> Rect {
        Rect::from_corners(
            self.widget_to_scene(Point::ZERO),
            self.widget_to_scene(Point::new(viewport.width, viewport.height)),
        )
    }

    /// Scene point at the centre of the viewport.
    pub fn scene_center(&self, viewport: Size) -> Point {
        self.widget_to_scene(Point::new(viewport.width / 2.0, viewport.height / 2.0))
    }

    /// The same view expressed in a scene scaled by `factor`.
    ///
    /// Scene coordinates are multiplied by `factor` and the zoom divided by it,
    /// so every widget point keeps showing the same image content.
    pub fn rescaled(&self, factor: f64) -> Self {
        Self {
            scale: self.scale / factor,
            offset: self.offset * factor,
        }
    }

    /// Whether two transforms differ beyond the relative change tolerance.
    pub fn differs_from(&self, other: &ViewTransform) -> bool {
        let rel = |a: f64, b: f64| {
            let denom = a.abs().max(b.abs()).max(1.0);
            (a - b).abs() / denom > TRANSFORM_CHANGE_TOLERANCE
        };
        rel(self.scale, other.scale)
            || rel(self.offset.x, other.offset.x)
            || rel(self.offset.y, other.offset.y)
    }
}

/// Convert a global-screen position into widget-local coordinates.
pub fn global_to_widget(global: Point, widget_origin: Point) -> Point {
    global - widget_origin
}

/// Convert a widget-local position into global-screen coordinates.
pub fn widget_to_global(local: Point, widget_origin: Point) -> Point {
    local + widget_origin
}

/// Bound a widget-local position to the widget rectangle `[0, w] x [0, h]`.
///
/// Used for positions reported by trackers that keep observing the pointer
/// after it leaves the widget.
pub fn bound_to_widget(local: Point, viewport: Size) -> Point {
    Point::new(
        local.x.clamp(0.0, viewport.width.max(0.0)),
        local.y.clamp(0.0, viewport.height.max(0.0)),
    )
}

/// Integer image pixel under a scene coordinate.
pub fn scene_to_pixel(scene: Point) -> (i64, i64) {
    (scene.x.floor() as i64, scene.y.floor() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_scene_inverse() {
        let t = ViewTransform::new(2.5, Point::new(-13.0, 40.0));
        let p = Point::new(123.0, 77.0);
        let back = t.scene_to_widget(t.widget_to_scene(p));
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn test_rescaled_preserves_content() {
        let t = ViewTransform::new(1.5, Point::new(10.0, 20.0));
        let r = t.rescaled(0.5);
        let w = Point::new(300.0, 200.0);
        let a = t.widget_to_scene(w) * 0.5;
        let b = r.widget_to_scene(w);
        assert!((a.x - b.x).abs() < 1e-9);
        assert!((a.y - b.y).abs() < 1e-9);
    }

    #[test]
    fn test_bound_to_widget() {
        let p = bound_to_widget(Point::new(-5.0, 900.0), Size::new(800.0, 600.0));
        assert_eq!(p, Point::new(0.0, 600.0));
    }
}
