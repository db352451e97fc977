use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use quadview_core::annotate::export::{load_annotations, save_annotations};
use quadview_core::annotate::{AnnotationOverlay, RulerOrigin};
use quadview_core::config::AppDefaults;

use super::OriginArg;

#[derive(Args)]
pub struct AnnotationsArgs {
    /// Annotation file to import
    pub file: PathBuf,

    /// Ruler origin for imported rulers
    #[arg(long, value_enum)]
    pub origin: Option<OriginArg>,

    /// Re-export the imported annotations to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Source image name written into the re-exported header
    #[arg(long)]
    pub source_name: Option<String>,
}

pub fn run(args: &AnnotationsArgs, defaults: &AppDefaults) -> Result<()> {
    let origin = args.origin.map(RulerOrigin::from).unwrap_or(defaults.ruler_origin);
    let mut overlay = AnnotationOverlay::new(origin);
    let report = load_annotations(&args.file, &mut overlay)
        .with_context(|| format!("Failed to import {}", args.file.display()))?;

    crate::summary::print_import_summary(&args.file, &report, &overlay);

    if let Some(ref path) = args.output {
        let source = match args.source_name {
            Some(ref name) => name.clone(),
            None => args
                .file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        save_annotations(&overlay, &source, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}
