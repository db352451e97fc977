use approx::assert_relative_eq;
use quadview_core::geometry::Size;
use quadview_core::sync::{SyncBy, SyncController};

// ---------------------------------------------------------------------------
// Sender dimension
// ---------------------------------------------------------------------------

#[test]
fn test_sender_dimension_box_uses_longer_side() {
    assert_eq!(SyncBy::Box.sender_dimension(Size::new(800.0, 600.0)), Some(800.0));
    assert_eq!(SyncBy::Box.sender_dimension(Size::new(600.0, 800.0)), Some(800.0));
}

#[test]
fn test_sender_dimension_pixel_is_none() {
    assert_eq!(SyncBy::Pixel.sender_dimension(Size::new(800.0, 600.0)), None);
}

#[test]
fn test_sender_dimension_width_height() {
    let s = Size::new(640.0, 480.0);
    assert_eq!(SyncBy::Width.sender_dimension(s), Some(640.0));
    assert_eq!(SyncBy::Height.sender_dimension(s), Some(480.0));
}

// ---------------------------------------------------------------------------
// Adjustment factor
// ---------------------------------------------------------------------------

#[test]
fn test_adjustment_factor_identity_for_every_strategy() {
    for size in [
        Size::new(800.0, 600.0),
        Size::new(600.0, 800.0),
        Size::new(512.0, 512.0),
        Size::new(1.0, 9000.0),
    ] {
        for s in SyncBy::ALL {
            let f = s.adjustment_factor(s.sender_dimension(size), size);
            assert_relative_eq!(f, 1.0);
        }
    }
}

#[test]
fn test_adjustment_factor_zero_receiver_is_one() {
    let sender = Size::new(1000.0, 1000.0);
    for s in SyncBy::ALL {
        assert_eq!(s.factor_between(sender, Size::new(0.0, 500.0)), 1.0);
        assert_eq!(s.factor_between(sender, Size::new(500.0, 0.0)), 1.0);
    }
}

#[test]
fn test_adjustment_factor_box_half_resolution() {
    let f = SyncBy::Box.factor_between(Size::new(1000.0, 1000.0), Size::new(500.0, 500.0));
    assert_relative_eq!(f, 2.0);
}

#[test]
fn test_adjustment_factor_width_and_height_differ() {
    let sender = Size::new(1000.0, 500.0);
    let receiver = Size::new(500.0, 500.0);
    assert_relative_eq!(SyncBy::Width.factor_between(sender, receiver), 2.0);
    assert_relative_eq!(SyncBy::Height.factor_between(sender, receiver), 1.0);
    assert_relative_eq!(SyncBy::Pixel.factor_between(sender, receiver), 1.0);
}

#[test]
fn test_receiver_zoom_scales_by_factor() {
    let z = SyncController::receiver_zoom(
        SyncBy::Box,
        1.5,
        Size::new(2000.0, 1000.0),
        Size::new(1000.0, 500.0),
    );
    assert_relative_eq!(z, 3.0);
}

// ---------------------------------------------------------------------------
// Display / parsing
// ---------------------------------------------------------------------------

#[test]
fn test_sync_by_default_is_box() {
    assert_eq!(SyncBy::default(), SyncBy::Box);
}

#[test]
fn test_sync_by_display_round_trips_through_parse() {
    for s in SyncBy::ALL {
        assert_eq!(s.to_string().parse::<SyncBy>().unwrap(), s);
    }
    assert!("diagonal".parse::<SyncBy>().is_err());
}
