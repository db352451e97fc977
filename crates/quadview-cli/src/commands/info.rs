use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use quadview_core::config::AppDefaults;
use quadview_core::sync::SyncBy;

use super::{load_rasters, SyncByArg};

#[derive(Args)]
pub struct InfoArgs {
    /// Input images; factors are relative to the first
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Strategy used for the adjustment factor
    #[arg(long, value_enum)]
    pub sync_by: Option<SyncByArg>,
}

pub fn run(args: &InfoArgs, defaults: &AppDefaults) -> Result<()> {
    let sync_by = args.sync_by.map(SyncBy::from).unwrap_or(defaults.sync_by);
    let paths: Vec<&PathBuf> = args.files.iter().collect();
    let rasters = load_rasters(&paths)?;
    let Some(first) = rasters.first() else {
        return Ok(());
    };

    for (path, raster) in paths.iter().zip(&rasters) {
        println!("File:        {}", path.display());
        println!("Dimensions:  {}x{}", raster.width(), raster.height());
        println!("Rotation:    {}", raster.rotation);
        println!(
            "Factor:      {:.4} ({} vs {})",
            sync_by.factor_between(first.size(), raster.size()),
            sync_by,
            paths[0].display()
        );
        println!();
    }

    Ok(())
}
