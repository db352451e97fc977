use tracing::debug;

use crate::config::ViewConfig;
use crate::consts::{FIT_PADDING_MARGIN, WHEEL_NOTCH_DELTA};
use crate::geometry::{Point, Rect, Size, ViewTransform};

/// Zoom operations a viewer understands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomOp {
    In,
    Out,
    /// Raw wheel angle delta; 240 units make one notch.
    Wheel(f64),
    ActualSize,
    FitToWindow,
    FitWidth,
    FitHeight,
    Set(f64),
}

/// Pan operations a viewer understands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanOp {
    Top,
    Bottom,
    Left,
    Right,
    Center,
    /// Drag by a widget-space delta.
    By(Point),
}

/// Zoom level, view centre and scrollable scene bounds of the main pane.
#[derive(Clone, Debug)]
pub struct ViewState {
    zoom: f64,
    center: Point,
    viewport: Size,
    image: Size,
    scene_rect: Rect,
    zoom_step: f64,
    peek_fraction: f64,
}

impl ViewState {
    pub fn new(image: Size, viewport: Size, config: &ViewConfig) -> Self {
        let mut view = Self {
            zoom: 1.0,
            center: Rect::from_size(image).center(),
            viewport,
            image,
            scene_rect: Rect::from_size(image),
            zoom_step: config.zoom_step,
            peek_fraction: config.peek_fraction,
        };
        view.resize_scene();
        view
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn image_size(&self) -> Size {
        self.image
    }

    pub fn scene_rect(&self) -> Rect {
        self.scene_rect
    }

    pub fn transform(&self) -> ViewTransform {
        ViewTransform::centered_on(self.center, self.zoom, self.viewport)
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.resize_scene();
    }

    /// Set an absolute zoom, keeping the view centre. Non-positive or
    /// non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        if !zoom.is_finite() || zoom <= 0.0 {
            return false;
        }
        self.zoom = zoom;
        self.resize_scene();
        true
    }

    pub fn apply_zoom(&mut self, op: ZoomOp) -> bool {
        match op {
            ZoomOp::In => self.set_zoom(self.zoom * self.zoom_step),
            ZoomOp::Out => self.set_zoom(self.zoom / self.zoom_step),
            ZoomOp::Wheel(delta) => {
                let notches = delta / WHEEL_NOTCH_DELTA;
                self.set_zoom(self.zoom * self.zoom_step.powf(notches))
            }
            ZoomOp::ActualSize => self.set_zoom(1.0),
            ZoomOp::FitToWindow => self.fit_to_window(),
            ZoomOp::FitWidth => self.fit_width(),
            ZoomOp::FitHeight => self.fit_height(),
            ZoomOp::Set(z) => self.set_zoom(z),
        }
    }

    /// Fit the whole image: by height when the viewport is relatively wider
    /// than the image, otherwise by width.
    pub fn fit_to_window(&mut self) -> bool {
        match (self.viewport.aspect_ratio(), self.image.aspect_ratio()) {
            (Some(view_ar), Some(img_ar)) if view_ar > img_ar => self.fit_height(),
            (Some(_), Some(_)) => self.fit_width(),
            _ => false,
        }
    }

    pub fn fit_width(&mut self) -> bool {
        if self.image.width <= 0.0 {
            return false;
        }
        let zoom = (self.viewport.width - FIT_PADDING_MARGIN) / self.image.width;
        self.set_zoom(zoom) && {
            self.center_view();
            true
        }
    }

    pub fn fit_height(&mut self) -> bool {
        if self.image.height <= 0.0 {
            return false;
        }
        let zoom = (self.viewport.height - FIT_PADDING_MARGIN) / self.image.height;
        self.set_zoom(zoom) && {
            self.center_view();
            true
        }
    }

    /// Grow the scrollable scene so the image can be panned until only a
    /// peek margin of the viewport still shows it.
    pub fn resize_scene(&mut self) {
        let vw = (self.viewport.width - self.peek_fraction * self.viewport.width) / self.zoom;
        let vh = (self.viewport.height - self.peek_fraction * self.viewport.height) / self.zoom;
        let scene_w = 2.0 * (vw + self.image.width / 2.0);
        let scene_h = 2.0 * (vh + self.image.height / 2.0);
        self.scene_rect = Rect::new(
            -scene_w / 2.0 + self.image.width / 2.0,
            -scene_h / 2.0 + self.image.height / 2.0,
            scene_w,
            scene_h,
        );
        self.center = self.clamp_center(self.center);
        debug!(zoom = self.zoom, scene = ?self.scene_rect, "Resized scene");
    }

    /// Keep the viewport inside the scene rectangle; a scene smaller than
    /// the viewport is centred.
    fn clamp_center(&self, p: Point) -> Point {
        let half_w = self.viewport.width / (2.0 * self.zoom);
        let half_h = self.viewport.height / (2.0 * self.zoom);
        let r = self.scene_rect;
        let axis = |v: f64, lo: f64, hi: f64, half: f64, mid: f64| {
            if hi - lo >= 2.0 * half {
                v.clamp(lo + half, hi - half)
            } else {
                mid
            }
        };
        Point::new(
            axis(p.x, r.left(), r.right(), half_w, r.center().x),
            axis(p.y, r.top(), r.bottom(), half_h, r.center().y),
        )
    }

    pub fn center_on(&mut self, p: Point) {
        self.center = self.clamp_center(p);
    }

    pub fn center_view(&mut self) {
        self.center_on(Rect::from_size(self.image).center());
    }

    pub fn apply_pan(&mut self, op: PanOp) {
        let half_w = self.viewport.width / (2.0 * self.zoom);
        let half_h = self.viewport.height / (2.0 * self.zoom);
        let r = self.scene_rect;
        let c = self.center;
        let target = match op {
            PanOp::Top => Point::new(c.x, r.top() + half_h),
            PanOp::Bottom => Point::new(c.x, r.bottom() - half_h),
            PanOp::Left => Point::new(r.left() + half_w, c.y),
            PanOp::Right => Point::new(r.right() - half_w, c.y),
            PanOp::Center => Rect::from_size(self.image).center(),
            PanOp::By(delta) => c - delta * (1.0 / self.zoom),
        };
        self.center_on(target);
    }

    /// View centre as a fraction of the scene extent along each axis.
    pub fn scroll_state(&self) -> (f64, f64) {
        let r = self.scene_rect;
        let fx = if r.width > 0.0 {
            (self.center.x - r.left()) / r.width
        } else {
            0.0
        };
        let fy = if r.height > 0.0 {
            (self.center.y - r.top()) / r.height
        } else {
            0.0
        };
        (fx, fy)
    }

    pub fn set_scroll_state(&mut self, fx: f64, fy: f64) {
        let r = self.scene_rect;
        self.center_on(Point::new(fx * r.width + r.left(), fy * r.height + r.top()));
    }
}
