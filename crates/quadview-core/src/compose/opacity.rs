use image::RgbaImage;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Clamp an opacity percentage into `0..=100`.
pub fn clamp_percent(percent: i32) -> u8 {
    percent.clamp(0, 100) as u8
}

/// Return a copy of `original` with every alpha value scaled by
/// `percent / 100`. Colour channels are left untouched and `original` is
/// never modified, so the result can be regenerated at any other opacity.
pub fn apply_opacity(original: &RgbaImage, percent: u8) -> RgbaImage {
    let percent = percent.min(100);
    let mut out = original.clone();
    if percent == 100 {
        return out;
    }

    let (w, h) = out.dimensions();
    let (w, h) = (w as usize, h as usize);
    if w == 0 || h == 0 {
        return out;
    }

    let factor = percent as f32 / 100.0;
    let row_len = w * 4;
    let buf: &mut [u8] = &mut out;

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        buf.par_chunks_mut(row_len)
            .for_each(|row| scale_alpha_row(row, factor));
    } else {
        buf.chunks_mut(row_len)
            .for_each(|row| scale_alpha_row(row, factor));
    }

    out
}

fn scale_alpha_row(row: &mut [u8], factor: f32) {
    for px in row.chunks_exact_mut(4) {
        px[3] = (px[3] as f32 * factor).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(-4), 0);
        assert_eq!(clamp_percent(140), 100);
        assert_eq!(clamp_percent(37), 37);
    }

    #[test]
    fn test_half_opacity_rounds() {
        let img = RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]));
        let out = apply_opacity(&img, 50);
        assert_eq!(out.get_pixel(1, 1).0, [10, 20, 30, 128]);
    }
}
