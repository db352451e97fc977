use approx::assert_relative_eq;
use quadview_core::annotate::ruler::EndpointLabels;
use quadview_core::annotate::{
    Annotation, AnnotationOverlay, Comment, CommentColor, Endpoint, LengthUnit, Ruler, RulerOrigin,
};
use quadview_core::error::QuadviewError;
use quadview_core::geometry::{Point, Size, ViewTransform};

fn make_mm_ruler(p1: Point, p2: Point, origin: RulerOrigin) -> Ruler {
    Ruler::new(p1, p2, LengthUnit::Mm, 10.0, origin)
}

// ---------------------------------------------------------------------------
// Ruler measurements
// ---------------------------------------------------------------------------

#[test]
fn test_horizontal_ruler_labels_in_mm() {
    let r = make_mm_ruler(
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        RulerOrigin::BottomLeft,
    );
    assert_eq!(r.center_label(), "10.0 mm");
    assert_eq!(
        r.endpoint_labels(Endpoint::Second),
        EndpointLabels {
            length: "|v|  10.0 mm".into(),
            dx: "⬌  10.0 mm".into(),
            dy: "⬍  0.0 mm".into(),
            angle: "∠  0.0°".into(),
        }
    );
}

#[test]
fn test_endpoint_measurements_are_relative_to_other_end() {
    let r = make_mm_ruler(
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        RulerOrigin::BottomLeft,
    );
    let first = r.measurement(Endpoint::First);
    assert_relative_eq!(first.dx, -10.0);
    assert_relative_eq!(first.angle_deg.abs(), 180.0);
    assert_eq!(r.endpoint_labels(Endpoint::First).dx, "⬌  -10.0 mm");
}

#[test]
fn test_bottom_left_origin_flips_dy() {
    // p2 is above p1 on screen.
    let p1 = Point::new(0.0, 100.0);
    let p2 = Point::new(0.0, 0.0);
    let bl = make_mm_ruler(p1, p2, RulerOrigin::BottomLeft);
    let tl = make_mm_ruler(p1, p2, RulerOrigin::TopLeft);
    assert_relative_eq!(bl.measurement(Endpoint::Second).dy, 10.0);
    assert_relative_eq!(bl.measurement(Endpoint::Second).angle_deg, 90.0);
    assert_relative_eq!(tl.measurement(Endpoint::Second).dy, -10.0);
    assert_relative_eq!(tl.measurement(Endpoint::Second).angle_deg, -90.0);
}

#[test]
fn test_moving_endpoint_recomputes() {
    let mut r = make_mm_ruler(Point::new(0.0, 0.0), Point::new(30.0, 40.0), RulerOrigin::TopLeft);
    assert_relative_eq!(r.length(), 5.0);
    r.set_endpoint(Endpoint::Second, Point::new(60.0, 80.0));
    assert_relative_eq!(r.length(), 10.0);
    assert_eq!(r.center_label(), "10.0 mm");
}

#[test]
fn test_pixel_ruler_ignores_conversion() {
    let mut r = Ruler::new(
        Point::new(0.0, 0.0),
        Point::new(3.0, 4.0),
        LengthUnit::Px,
        25.0,
        RulerOrigin::default(),
    );
    assert_eq!(r.px_per_unit(), 1.0);
    r.set_px_per_unit(7.0);
    assert_eq!(r.center_label(), "5.0 px");
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

#[test]
fn test_real_unit_ruler_requires_conversion() {
    let mut overlay = AnnotationOverlay::default();
    let err = overlay
        .add_ruler(LengthUnit::Cm, Point::ZERO, Point::new(10.0, 0.0))
        .unwrap_err();
    assert!(matches!(err, QuadviewError::ConversionNotSet(_)));
    assert!(overlay
        .add_ruler(LengthUnit::Px, Point::ZERO, Point::new(10.0, 0.0))
        .is_ok());
}

#[test]
fn test_conversion_change_rescales_real_unit_rulers_only() {
    let mut overlay = AnnotationOverlay::default();
    overlay.set_conversion(10.0, 1.0, LengthUnit::Mm).unwrap();
    let mm = overlay
        .add_ruler(LengthUnit::Mm, Point::ZERO, Point::new(100.0, 0.0))
        .unwrap();
    let px = overlay
        .add_ruler(LengthUnit::Px, Point::ZERO, Point::new(100.0, 0.0))
        .unwrap();

    overlay.set_conversion(20.0, 1.0, LengthUnit::Mm).unwrap();
    let length = |id| match overlay.get(id) {
        Some(Annotation::Ruler(r)) => r.length(),
        _ => panic!("expected ruler"),
    };
    assert_relative_eq!(length(mm), 5.0);
    assert_relative_eq!(length(px), 100.0);
}

#[test]
fn test_invalid_conversion_keeps_previous() {
    let mut overlay = AnnotationOverlay::default();
    overlay.set_conversion(10.0, 1.0, LengthUnit::Mm).unwrap();
    assert!(overlay.set_conversion(0.0, 1.0, LengthUnit::Mm).is_err());
    assert!(overlay.set_conversion(10.0, 0.0, LengthUnit::Mm).is_err());
    assert!(overlay.set_conversion(f64::NAN, 1.0, LengthUnit::Mm).is_err());
    assert!(overlay.set_conversion(10.0, 1.0, LengthUnit::Px).is_err());
    assert_relative_eq!(overlay.conversion().unwrap().px_per_mm(), 10.0);
}

#[test]
fn test_ruler_placed_at_thirds_of_view() {
    let mut overlay = AnnotationOverlay::default();
    let t = ViewTransform::new(2.0, Point::new(100.0, 50.0));
    let id = overlay
        .add_ruler_in_view(LengthUnit::Px, &t, Size::new(600.0, 300.0))
        .unwrap();
    let Some(Annotation::Ruler(r)) = overlay.get(id) else {
        panic!("expected ruler");
    };
    let (p1, p2) = (r.endpoint(Endpoint::First), r.endpoint(Endpoint::Second));
    assert_relative_eq!(p1.x, 200.0, epsilon = 1e-9);
    assert_relative_eq!(p1.y, 100.0, epsilon = 1e-9);
    assert_relative_eq!(p2.x, 300.0, epsilon = 1e-9);
    assert_relative_eq!(p2.y, 150.0, epsilon = 1e-9);
}

#[test]
fn test_set_origin_applies_to_existing_rulers() {
    let mut overlay = AnnotationOverlay::new(RulerOrigin::BottomLeft);
    let id = overlay
        .add_ruler(LengthUnit::Px, Point::new(0.0, 10.0), Point::ZERO)
        .unwrap();
    overlay.set_origin(RulerOrigin::TopLeft);
    let Some(Annotation::Ruler(r)) = overlay.get(id) else {
        panic!("expected ruler");
    };
    assert_eq!(r.origin(), RulerOrigin::TopLeft);
    assert_relative_eq!(r.measurement(Endpoint::Second).dy, -10.0);
}

#[test]
fn test_comment_defaults_and_edits() {
    let mut overlay = AnnotationOverlay::default();
    let id = overlay.add_comment(Comment::new(Point::new(5.0, 6.0)));
    let Some(Annotation::Comment(c)) = overlay.get(id) else {
        panic!("expected comment");
    };
    assert_eq!(c.text, "Text");
    assert_eq!(c.color, CommentColor::White);

    overlay.set_comment_text(id, "crack").unwrap();
    overlay.set_comment_color(id, CommentColor::Red).unwrap();
    overlay.move_comment(id, Point::new(1.0, 2.0)).unwrap();
    let Some(Annotation::Comment(c)) = overlay.get(id) else {
        panic!("expected comment");
    };
    assert_eq!(c.text, "crack");
    assert_eq!(c.color, CommentColor::Red);
    assert_eq!(c.anchor, Point::new(1.0, 2.0));
}

#[test]
fn test_wrong_kind_and_unknown_ids() {
    let mut overlay = AnnotationOverlay::default();
    let ruler = overlay
        .add_ruler(LengthUnit::Px, Point::ZERO, Point::new(1.0, 1.0))
        .unwrap();
    assert!(matches!(
        overlay.set_comment_color(ruler, CommentColor::Blue),
        Err(QuadviewError::WrongAnnotationKind(_, "comment"))
    ));
    overlay.remove(ruler).unwrap();
    assert!(matches!(
        overlay.remove(ruler),
        Err(QuadviewError::UnknownAnnotation(_))
    ));
    assert!(overlay.is_empty());
}

// ---------------------------------------------------------------------------
// Comment palette
// ---------------------------------------------------------------------------

#[test]
fn test_comment_highlights() {
    assert_eq!(CommentColor::Red.highlight_rgba(), [255, 255, 255, 123]);
    assert_eq!(CommentColor::Blue.highlight_rgba(), [255, 255, 255, 123]);
    assert_eq!(CommentColor::Black.highlight_rgba(), [255, 255, 255, 255]);
    for c in [CommentColor::White, CommentColor::Yellow, CommentColor::Green] {
        assert_eq!(c.highlight_rgba(), [0, 0, 0, 31]);
    }
}
