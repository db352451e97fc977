use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::imageops;
use image::{ImageFormat, RgbaImage};
use tracing::{debug, info};

use crate::error::Result;
use crate::raster::{Raster, Rotation};

/// Read the EXIF orientation of a file. Files without EXIF data, or that
/// cannot be parsed, report no rotation.
pub fn read_exif_rotation(path: &Path) -> Rotation {
    let Ok(file) = File::open(path) else {
        return Rotation::None;
    };
    let mut reader = BufReader::new(file);
    let Ok(exif) = exif::Reader::new().read_from_container(&mut reader) else {
        return Rotation::None;
    };

    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Rotation::from_exif_orientation)
        .unwrap_or_default()
}

/// Rotate an image clockwise by the given rotation.
pub fn apply_rotation(img: RgbaImage, rotation: Rotation) -> RgbaImage {
    match rotation {
        Rotation::None => img,
        Rotation::Cw90 => imageops::rotate90(&img),
        Rotation::Cw180 => imageops::rotate180(&img),
        Rotation::Cw270 => imageops::rotate270(&img),
    }
}

/// Decode an image file into an RGBA raster, applying its EXIF rotation.
pub fn load_raster(path: &Path) -> Result<Raster> {
    let img = image::open(path)?.to_rgba8();
    let rotation = read_exif_rotation(path);
    if rotation != Rotation::None {
        debug!(path = %path.display(), %rotation, "Applying EXIF rotation");
    }
    let pixels = apply_rotation(img, rotation);
    info!(
        path = %path.display(),
        width = pixels.width(),
        height = pixels.height(),
        "Loaded image"
    );

    Ok(Raster {
        pixels,
        source: Some(path.to_path_buf()),
        rotation,
    })
}

/// Save an RGBA image as PNG.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save an RGBA image as TIFF.
pub fn save_tiff(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Tiff)?;
    Ok(())
}

/// Save an image, choosing format from file extension.
pub fn save_image(img: &RgbaImage, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("tiff" | "tif") => save_tiff(img, path),
        Some("png") => save_png(img, path),
        _ => save_png(img, path),
    }
}
