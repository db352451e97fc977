pub mod annotations;
pub mod compose;
pub mod config;
pub mod info;
pub mod measure;
pub mod split;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use quadview_core::annotate::{LengthUnit, RulerOrigin};
use quadview_core::config::AppDefaults;
use quadview_core::geometry::{Point, Size};
use quadview_core::io::image_io::load_raster;
use quadview_core::raster::Raster;
use quadview_core::sync::SyncBy;
use rayon::prelude::*;
use tracing::debug;

#[derive(Clone, Copy, ValueEnum)]
pub enum SyncByArg {
    Box,
    Width,
    Height,
    Pixel,
}

impl From<SyncByArg> for SyncBy {
    fn from(arg: SyncByArg) -> Self {
        match arg {
            SyncByArg::Box => SyncBy::Box,
            SyncByArg::Width => SyncBy::Width,
            SyncByArg::Height => SyncBy::Height,
            SyncByArg::Pixel => SyncBy::Pixel,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum UnitArg {
    Px,
    Mm,
    Cm,
    M,
    In,
    Ft,
    Yd,
}

impl From<UnitArg> for LengthUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Px => LengthUnit::Px,
            UnitArg::Mm => LengthUnit::Mm,
            UnitArg::Cm => LengthUnit::Cm,
            UnitArg::M => LengthUnit::M,
            UnitArg::In => LengthUnit::In,
            UnitArg::Ft => LengthUnit::Ft,
            UnitArg::Yd => LengthUnit::Yd,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OriginArg {
    TopLeft,
    BottomLeft,
}

impl From<OriginArg> for RulerOrigin {
    fn from(arg: OriginArg) -> Self {
        match arg {
            OriginArg::TopLeft => RulerOrigin::TopLeft,
            OriginArg::BottomLeft => RulerOrigin::BottomLeft,
        }
    }
}

/// Defaults from `--config`, or the built-in ones.
pub fn load_defaults(path: Option<&Path>) -> Result<AppDefaults> {
    match path {
        Some(path) => {
            let defaults = AppDefaults::load(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            debug!(path = %path.display(), "Loaded defaults");
            Ok(defaults)
        }
        None => Ok(AppDefaults::default()),
    }
}

/// Parse "X,Y".
pub fn parse_point(s: &str) -> Result<Point> {
    let Some((x, y)) = s.split_once(',') else {
        bail!("Expected X,Y but got '{s}'");
    };
    let x: f64 = x.trim().parse().with_context(|| format!("Invalid x in '{s}'"))?;
    let y: f64 = y.trim().parse().with_context(|| format!("Invalid y in '{s}'"))?;
    if !(x.is_finite() && y.is_finite()) {
        bail!("Coordinates must be finite, got '{s}'");
    }
    Ok(Point::new(x, y))
}

/// Parse "WxH" with finite, positive dimensions.
pub fn parse_size(s: &str) -> Result<Size> {
    let lower = s.to_ascii_lowercase();
    let Some((w, h)) = lower.split_once('x') else {
        bail!("Expected WxH but got '{s}'");
    };
    let w: f64 = w.trim().parse().with_context(|| format!("Invalid width in '{s}'"))?;
    let h: f64 = h.trim().parse().with_context(|| format!("Invalid height in '{s}'"))?;
    if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
        bail!("Viewport must be finite and positive, got '{s}'");
    }
    Ok(Size::new(w, h))
}

/// Decode several images in parallel behind a progress bar. Order is kept.
pub fn load_rasters(paths: &[&PathBuf]) -> Result<Vec<Raster>> {
    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Loading");

    let rasters = paths
        .par_iter()
        .map(|path| {
            let raster = load_raster(path)
                .with_context(|| format!("Failed to load {}", path.display()));
            pb.inc(1);
            raster
        })
        .collect::<Result<Vec<_>>>();
    pb.finish_and_clear();
    rasters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        let p = parse_point("12.5, -3").unwrap();
        assert_eq!((p.x, p.y), (12.5, -3.0));
        assert!(parse_point("12.5").is_err());
        assert!(parse_point("a,b").is_err());
        assert!(parse_point("NaN,1").is_err());
    }

    #[test]
    fn test_parse_size() {
        let s = parse_size("800X600").unwrap();
        assert_eq!((s.width, s.height), (800.0, 600.0));
        assert!(parse_size("800x0").is_err());
        assert!(parse_size("800").is_err());
        assert!(parse_size("infx600").is_err());
        assert!(parse_size("800xNaN").is_err());
        assert!(parse_size("-800x600").is_err());
    }
}
