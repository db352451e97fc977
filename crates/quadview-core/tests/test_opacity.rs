mod common;

use common::{make_gradient, make_quad_viewer, make_raster};
use image::Rgba;
use quadview_core::compose::opacity::apply_opacity;
use quadview_core::geometry::Size;
use quadview_core::viewer::{Pane, PanePosition};

// ---------------------------------------------------------------------------
// apply_opacity
// ---------------------------------------------------------------------------

#[test]
fn test_full_opacity_is_pixel_identical() {
    let src = make_gradient(300, 300).pixels;
    let out = apply_opacity(&src, 100);
    assert_eq!(out, src);
}

#[test]
fn test_zero_opacity_clears_alpha_only() {
    let src = make_raster(4, 3, [12, 34, 56, 255]).pixels;
    let out = apply_opacity(&src, 0);
    assert_eq!(out.dimensions(), src.dimensions());
    for p in out.pixels() {
        assert_eq!(*p, Rgba([12, 34, 56, 0]));
    }
}

#[test]
fn test_original_untouched_and_parallel_path_matches() {
    // 300x300 exceeds the parallel threshold.
    let src = make_gradient(300, 300).pixels;
    let copy = src.clone();
    let out = apply_opacity(&src, 40);
    assert_eq!(src, copy);
    assert_eq!(out.get_pixel(299, 299).0, [299u32 as u8, 299u32 as u8, 0, 102]);
}

#[test]
fn test_existing_alpha_is_scaled() {
    let src = make_raster(2, 2, [0, 0, 0, 200]).pixels;
    let out = apply_opacity(&src, 50);
    assert_eq!(out.get_pixel(0, 0).0[3], 100);
}

// ---------------------------------------------------------------------------
// Panes
// ---------------------------------------------------------------------------

#[test]
fn test_absent_pane_is_pinned_to_full_opacity() {
    let mut pane = Pane::new(PanePosition::BottomLeft, None);
    assert_eq!(pane.set_opacity(20), 100);
    assert!(pane.displayed_pixels().is_none());
}

#[test]
fn test_zero_sized_raster_is_treated_as_absent() {
    let mut pane = Pane::new(PanePosition::TopRight, Some(make_raster(0, 10, [0; 4])));
    assert!(!pane.exists());
    assert_eq!(pane.set_opacity(0), 100);
}

#[test]
fn test_opacity_restore_returns_original() {
    let mut v = make_quad_viewer((100, 100), (100, 100), Size::new(100.0, 100.0));
    let original = v.pane(PanePosition::TopRight).raster().unwrap().pixels.clone();

    assert_eq!(v.set_opacity(PanePosition::TopRight, 30), 30);
    assert_ne!(v.pane(PanePosition::TopRight).displayed_pixels(), Some(&original));

    assert_eq!(v.set_opacity(PanePosition::TopRight, 100), 100);
    assert_eq!(v.pane(PanePosition::TopRight).displayed_pixels(), Some(&original));
}

#[test]
fn test_opacity_above_hundred_is_clamped() {
    let mut v = make_quad_viewer((10, 10), (10, 10), Size::new(10.0, 10.0));
    assert_eq!(v.set_opacity(PanePosition::BottomRight, 250), 100);
}
