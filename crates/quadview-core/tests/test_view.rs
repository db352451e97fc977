use approx::assert_relative_eq;
use quadview_core::config::ViewConfig;
use quadview_core::geometry::{Point, Size};
use quadview_core::viewer::{PanOp, ViewState, ZoomOp};

fn make_view(image: (f64, f64), viewport: (f64, f64)) -> ViewState {
    ViewState::new(
        Size::new(image.0, image.1),
        Size::new(viewport.0, viewport.1),
        &ViewConfig::default(),
    )
}

// ---------------------------------------------------------------------------
// Scene expansion
// ---------------------------------------------------------------------------

#[test]
fn test_scene_rect_expands_around_image() {
    let v = make_view((800.0, 600.0), (800.0, 600.0));
    let r = v.scene_rect();
    assert_relative_eq!(r.x, -720.0);
    assert_relative_eq!(r.y, -540.0);
    assert_relative_eq!(r.width, 2240.0);
    assert_relative_eq!(r.height, 1680.0);
}

#[test]
fn test_scene_rect_shrinks_when_zooming_in() {
    let mut v = make_view((800.0, 600.0), (800.0, 600.0));
    v.apply_zoom(ZoomOp::Set(2.0));
    assert_relative_eq!(v.scene_rect().x, -360.0);
    assert_relative_eq!(v.scene_rect().width, 1520.0);
}

#[test]
fn test_pan_right_leaves_peek_of_image_visible() {
    let mut v = make_view((800.0, 600.0), (800.0, 600.0));
    v.apply_pan(PanOp::Right);
    let visible = v.transform().visible_scene_rect(v.viewport());
    assert_relative_eq!(visible.right(), v.scene_rect().right(), epsilon = 1e-9);
    // 10 % of the viewport still shows the image.
    assert_relative_eq!(800.0 - visible.left(), 80.0, epsilon = 1e-9);
}

#[test]
fn test_pan_top_aligns_viewport_with_scene_top() {
    let mut v = make_view((800.0, 600.0), (800.0, 600.0));
    v.apply_pan(PanOp::Top);
    let top_left = v.transform().widget_to_scene(Point::ZERO);
    assert_relative_eq!(top_left.y, v.scene_rect().top(), epsilon = 1e-9);
}

#[test]
fn test_pan_by_moves_against_drag_in_scene_units() {
    let mut v = make_view((800.0, 600.0), (800.0, 600.0));
    v.apply_zoom(ZoomOp::Set(2.0));
    let before = v.center();
    v.apply_pan(PanOp::By(Point::new(100.0, -40.0)));
    assert_relative_eq!(v.center().x, before.x - 50.0, epsilon = 1e-9);
    assert_relative_eq!(v.center().y, before.y + 20.0, epsilon = 1e-9);
}

// ---------------------------------------------------------------------------
// Scroll state
// ---------------------------------------------------------------------------

#[test]
fn test_scroll_state_round_trip() {
    let mut v = make_view((800.0, 600.0), (800.0, 600.0));
    v.set_scroll_state(0.3, 0.7);
    let (fx, fy) = v.scroll_state();
    assert_relative_eq!(fx, 0.3, epsilon = 1e-12);
    assert_relative_eq!(fy, 0.7, epsilon = 1e-12);
}

#[test]
fn test_scroll_state_centered_image_is_half() {
    let v = make_view((800.0, 600.0), (800.0, 600.0));
    let (fx, fy) = v.scroll_state();
    assert_relative_eq!(fx, 0.5, epsilon = 1e-12);
    assert_relative_eq!(fy, 0.5, epsilon = 1e-12);
}

#[test]
fn test_scroll_state_empty_scene_is_zero() {
    let v = make_view((0.0, 0.0), (0.0, 0.0));
    assert_eq!(v.scroll_state(), (0.0, 0.0));
}

// ---------------------------------------------------------------------------
// Zoom
// ---------------------------------------------------------------------------

#[test]
fn test_zoom_in_out_steps() {
    let mut v = make_view((800.0, 600.0), (800.0, 600.0));
    v.apply_zoom(ZoomOp::In);
    assert_relative_eq!(v.zoom(), 1.25);
    v.apply_zoom(ZoomOp::Out);
    v.apply_zoom(ZoomOp::Out);
    assert_relative_eq!(v.zoom(), 0.8);
}

#[test]
fn test_wheel_notches() {
    let mut v = make_view((800.0, 600.0), (800.0, 600.0));
    v.apply_zoom(ZoomOp::Wheel(480.0));
    assert_relative_eq!(v.zoom(), 1.5625, epsilon = 1e-12);
    v.apply_zoom(ZoomOp::Wheel(-240.0));
    assert_relative_eq!(v.zoom(), 1.25, epsilon = 1e-12);
}

#[test]
fn test_invalid_zoom_is_ignored() {
    let mut v = make_view((800.0, 600.0), (800.0, 600.0));
    assert!(!v.apply_zoom(ZoomOp::Set(0.0)));
    assert!(!v.apply_zoom(ZoomOp::Set(f64::NAN)));
    assert_eq!(v.zoom(), 1.0);
}

#[test]
fn test_fit_to_window_wide_image_fits_width() {
    let mut v = make_view((1600.0, 900.0), (800.0, 600.0));
    assert!(v.apply_zoom(ZoomOp::FitToWindow));
    assert_relative_eq!(v.zoom(), 798.0 / 1600.0);
    assert_eq!(v.center(), Point::new(800.0, 450.0));
}

#[test]
fn test_fit_to_window_tall_image_fits_height() {
    let mut v = make_view((900.0, 1600.0), (800.0, 600.0));
    assert!(v.apply_zoom(ZoomOp::FitToWindow));
    assert_relative_eq!(v.zoom(), 598.0 / 1600.0);
}

#[test]
fn test_actual_size() {
    let mut v = make_view((900.0, 1600.0), (800.0, 600.0));
    v.apply_zoom(ZoomOp::FitHeight);
    v.apply_zoom(ZoomOp::ActualSize);
    assert_eq!(v.zoom(), 1.0);
}
