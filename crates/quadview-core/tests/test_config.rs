use quadview_core::annotate::RulerOrigin;
use quadview_core::config::{AppDefaults, BackgroundColor, BackgroundPreset, TransformMode};
use quadview_core::error::QuadviewError;
use quadview_core::sync::SyncBy;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_defaults() {
    let d = AppDefaults::default();
    assert_eq!(d.background, BackgroundColor::gray(32));
    assert_eq!(d.transform_mode, TransformMode::Fast);
    assert_eq!(d.sync_by, SyncBy::Box);
    assert!(d.sync_zoom);
    assert!(d.sync_pan);
    assert_eq!(d.ruler_origin, RulerOrigin::BottomLeft);
    assert_eq!(d.view.zoom_step, 1.25);
    assert_eq!(d.view.render_buffer, 100.0);
    assert_eq!(d.view.peek_fraction, 0.1);
}

#[test]
fn test_background_preset_display() {
    assert_eq!(format!("{}", BackgroundPreset::DarkGray), "Dark gray (default)");
    assert_eq!(format!("{}", BackgroundPreset::LightGray), "Light gray");
}

// ---------------------------------------------------------------------------
// TOML
// ---------------------------------------------------------------------------

#[test]
fn test_toml_round_trip() {
    let mut d = AppDefaults::default();
    d.sync_by = SyncBy::Height;
    d.transform_mode = TransformMode::Smooth;
    d.ruler_origin = RulerOrigin::TopLeft;
    let text = d.to_toml_string().unwrap();
    assert!(text.contains("sync_by = \"height\""));
    assert_eq!(AppDefaults::from_toml_str(&text).unwrap(), d);
}

#[test]
fn test_partial_toml_fills_defaults() {
    let d = AppDefaults::from_toml_str("sync_pan = false\n[view]\nzoom_step = 1.5\n").unwrap();
    assert!(!d.sync_pan);
    assert!(d.sync_zoom);
    assert_eq!(d.view.zoom_step, 1.5);
    assert_eq!(d.view.render_buffer, 100.0);
}

#[test]
fn test_invalid_values_rejected() {
    for text in [
        "[view]\nzoom_step = 1.0\n",
        "[view]\nrender_buffer = -1.0\n",
        "[view]\npeek_fraction = 1.0\n",
        "sync_by = \"diagonal\"\n",
    ] {
        assert!(matches!(
            AppDefaults::from_toml_str(text),
            Err(QuadviewError::Config(_))
        ));
    }
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quadview.toml");
    std::fs::write(&path, "transform_mode = \"smooth\"\n").unwrap();
    let d = AppDefaults::load(&path).unwrap();
    assert_eq!(d.transform_mode, TransformMode::Smooth);
}

#[test]
fn test_serde_json_enum_names() {
    let json = serde_json::to_string(&SyncBy::Pixel).unwrap();
    assert_eq!(json, "\"pixel\"");
    let origin: RulerOrigin = serde_json::from_str("\"topleft\"").unwrap();
    assert_eq!(origin, RulerOrigin::TopLeft);
}
