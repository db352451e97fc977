use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use quadview_core::annotate::export::save_annotations;
use quadview_core::annotate::{Annotation, AnnotationOverlay, LengthUnit, RulerOrigin};
use quadview_core::config::AppDefaults;

use super::{parse_point, OriginArg, UnitArg};

#[derive(Args)]
pub struct MeasureArgs {
    /// First endpoint in image pixels, as X,Y
    #[arg(long)]
    pub from: String,

    /// Second endpoint in image pixels, as X,Y
    #[arg(long)]
    pub to: String,

    /// Unit of the ruler
    #[arg(long, value_enum, default_value = "px")]
    pub unit: UnitArg,

    /// Pixel count of a known length (needed for real units)
    #[arg(long)]
    pub px: Option<f64>,

    /// Real length, in --unit, spanned by --px pixels
    #[arg(long)]
    pub units: Option<f64>,

    /// Where the y axis starts
    #[arg(long, value_enum)]
    pub origin: Option<OriginArg>,

    /// Save the ruler as an annotation file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &MeasureArgs, defaults: &AppDefaults) -> Result<()> {
    let from = parse_point(&args.from)?;
    let to = parse_point(&args.to)?;
    let unit = LengthUnit::from(args.unit);
    let origin = args.origin.map(RulerOrigin::from).unwrap_or(defaults.ruler_origin);

    let mut overlay = AnnotationOverlay::new(origin);
    if !unit.is_pixels() {
        let (Some(px), Some(units)) = (args.px, args.units) else {
            bail!("--px and --units are required to measure in {unit}");
        };
        overlay
            .set_conversion(px, units, unit)
            .context("Invalid unit conversion")?;
    }

    let id = overlay.add_ruler(unit, from, to)?;
    let Some(Annotation::Ruler(ruler)) = overlay.get(id) else {
        bail!("Ruler {} was not stored", id.0);
    };
    crate::summary::print_measure_summary(ruler);

    if let Some(ref path) = args.output {
        save_annotations(&overlay, "measure", path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}
