use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use quadview_core::config::AppDefaults;
use quadview_core::raster::Raster;
use quadview_core::viewer::{SplitRelativeTo, Viewer, ViewerId, ViewerImages, ZoomOp};

use super::{load_rasters, parse_point, parse_size, SyncByArg};

/// View options shared by `split` and `compose`.
#[derive(Args)]
pub struct ViewArgs {
    /// Viewport size as WxH (defaults to the main image size)
    #[arg(long)]
    pub viewport: Option<String>,

    /// Split point as X,Y fractions
    #[arg(long, default_value = "0.5,0.5")]
    pub at: String,

    /// Take --at relative to the visible area instead of the image
    #[arg(long)]
    pub visible: bool,

    /// Zoom level, 1.0 is actual size (fits the window when a viewport is given)
    #[arg(long)]
    pub zoom: Option<f64>,

    /// How overlays of a different resolution are scaled
    #[arg(long, value_enum)]
    pub sync_by: Option<SyncByArg>,
}

impl ViewArgs {
    pub fn build_viewer(&self, images: ViewerImages, defaults: &AppDefaults) -> Result<Viewer> {
        let image_size = images.main.size();
        let viewport = match self.viewport.as_deref() {
            Some(s) => parse_size(s)?,
            None => image_size,
        };
        let mut viewer = Viewer::new(ViewerId(1), images, defaults, viewport)
            .context("Main image has no pixels")?;

        if let Some(sync_by) = self.sync_by {
            viewer.set_sync_by(sync_by.into());
        }
        match self.zoom {
            Some(z) => {
                if !viewer.apply_zoom(ZoomOp::Set(z)) {
                    anyhow::bail!("Zoom must be positive, got {z}");
                }
            }
            None if self.viewport.is_some() => {
                viewer.apply_zoom(ZoomOp::FitToWindow);
            }
            None => {}
        }

        let at = parse_point(&self.at)?;
        let relative_to = if self.visible {
            SplitRelativeTo::Visible
        } else {
            SplitRelativeTo::Resolution
        };
        viewer.set_split(at.x, at.y, true, relative_to);
        Ok(viewer)
    }
}

#[derive(Args)]
pub struct SplitArgs {
    /// Main image
    pub main: PathBuf,

    /// Top-right overlay image
    #[arg(long)]
    pub top_right: Option<PathBuf>,

    /// Bottom-right overlay image
    #[arg(long)]
    pub bottom_right: Option<PathBuf>,

    /// Bottom-left overlay image
    #[arg(long)]
    pub bottom_left: Option<PathBuf>,

    #[command(flatten)]
    pub view: ViewArgs,
}

pub fn run(args: &SplitArgs, defaults: &AppDefaults) -> Result<()> {
    let overlays = [&args.top_right, &args.bottom_right, &args.bottom_left];
    let mut paths = vec![&args.main];
    paths.extend(overlays.iter().filter_map(|p| p.as_ref()));

    let mut rasters = load_rasters(&paths)?.into_iter();
    let main = rasters.next().context("Main image missing")?;
    let mut next_for = |p: &Option<PathBuf>| -> Option<Raster> {
        p.as_ref().and_then(|_| rasters.next())
    };
    let images = ViewerImages {
        main,
        top_right: next_for(&args.top_right),
        bottom_right: next_for(&args.bottom_right),
        bottom_left: next_for(&args.bottom_left),
    };

    let viewer = args.view.build_viewer(images, defaults)?;
    crate::summary::print_split_summary(&viewer);
    Ok(())
}
