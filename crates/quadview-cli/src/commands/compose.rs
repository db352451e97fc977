use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use quadview_core::config::{AppDefaults, BackgroundPreset, TransformMode};
use quadview_core::io::image_io::save_image;
use quadview_core::render::render_viewer;
use quadview_core::viewer::{PanePosition, ViewerImages};

use super::load_rasters;
use super::split::ViewArgs;

#[derive(Clone, Copy, ValueEnum)]
pub enum BackgroundArg {
    DarkGray,
    White,
    LightGray,
    Black,
}

impl From<BackgroundArg> for BackgroundPreset {
    fn from(arg: BackgroundArg) -> Self {
        match arg {
            BackgroundArg::DarkGray => BackgroundPreset::DarkGray,
            BackgroundArg::White => BackgroundPreset::White,
            BackgroundArg::LightGray => BackgroundPreset::LightGray,
            BackgroundArg::Black => BackgroundPreset::Black,
        }
    }
}

#[derive(Args)]
pub struct ComposeArgs {
    /// Images in order: main, top-right, bottom-left, bottom-right
    #[arg(required = true, num_args = 2..=4)]
    pub images: Vec<PathBuf>,

    /// Top-right pane opacity (0-100)
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub opacity_top_right: u8,

    /// Bottom-right pane opacity (0-100)
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub opacity_bottom_right: u8,

    /// Bottom-left pane opacity (0-100)
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub opacity_bottom_left: u8,

    /// Always use smooth interpolation
    #[arg(long)]
    pub smooth: bool,

    /// Background colour around the images
    #[arg(long, value_enum)]
    pub background: Option<BackgroundArg>,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Output file path
    #[arg(short, long, default_value = "composite.png")]
    pub output: PathBuf,
}

pub fn run(args: &ComposeArgs, defaults: &AppDefaults) -> Result<()> {
    if args.images.len() < 2 {
        anyhow::bail!("Composing needs at least two images");
    }
    let paths: Vec<&PathBuf> = args.images.iter().collect();
    println!("Loading {} images...", paths.len());
    let mut rasters = load_rasters(&paths)?.into_iter();

    let main = rasters.next().context("Main image missing")?;
    let top_right = rasters.next();
    let bottom_left = rasters.next();
    let bottom_right = rasters.next();
    let images = ViewerImages {
        main,
        top_right,
        bottom_right,
        bottom_left,
    };

    let mut viewer = args.view.build_viewer(images, defaults)?;
    if args.smooth {
        viewer.set_transform_mode(TransformMode::Smooth);
    }
    if let Some(bg) = args.background {
        viewer.set_background(BackgroundPreset::from(bg).color());
    }
    for (position, percent) in [
        (PanePosition::TopRight, args.opacity_top_right),
        (PanePosition::BottomRight, args.opacity_bottom_right),
        (PanePosition::BottomLeft, args.opacity_bottom_left),
    ] {
        viewer.set_opacity(position, percent);
    }

    println!(
        "Rendering {}x{} at {}...",
        viewer.viewport().width,
        viewer.viewport().height,
        viewer.zoom_percent()
    );
    let composite = render_viewer(&viewer);

    save_image(&composite, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Saved to {}", args.output.display());
    Ok(())
}
