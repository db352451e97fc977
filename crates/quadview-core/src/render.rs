//! Software compositor: draws a viewer's current split state into an image
//! the size of its viewport.

use image::{Rgba, RgbaImage};
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::geometry::{Point, Rect, ViewTransform};
use crate::viewer::{Interpolation, PanePosition, Viewer};

struct Layer<'a> {
    pixels: &'a RgbaImage,
    transform: ViewTransform,
    clip: Rect,
    interpolation: Interpolation,
}

/// Composite the background, the main pane and every existing overlay pane
/// (inside its quadrant) with source-over blending.
pub fn render_viewer(viewer: &Viewer) -> RgbaImage {
    let vp = viewer.viewport();
    let w = vp.width.max(0.0).ceil() as u32;
    let h = vp.height.max(0.0).ceil() as u32;
    let mut out = RgbaImage::from_pixel(w, h, Rgba(viewer.background().rgba()));
    if w == 0 || h == 0 {
        return out;
    }

    let layout = viewer.split_layout();
    let layers: Vec<Layer> = PanePosition::ALL
        .iter()
        .filter_map(|&pos| {
            let pane = viewer.pane(pos);
            let pixels = pane.displayed_pixels()?;
            let region = layout.region(pos)?;
            Some(Layer {
                pixels,
                transform: region.transform,
                clip: region.widget_rect,
                interpolation: viewer.interpolation(pos),
            })
        })
        .collect();

    let row_len = w as usize * 4;
    let buf: &mut [u8] = &mut out;
    if (w as usize) * (h as usize) >= PARALLEL_PIXEL_THRESHOLD {
        buf.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| render_row(row, y, &layers));
    } else {
        buf.chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| render_row(row, y, &layers));
    }
    out
}

fn render_row(row: &mut [u8], y: usize, layers: &[Layer]) {
    let cy = y as f64 + 0.5;
    for layer in layers {
        if cy < layer.clip.top() || cy >= layer.clip.bottom() {
            continue;
        }
        let x0 = layer.clip.left().max(0.0).floor() as usize;
        let x1 = (layer.clip.right().ceil().max(0.0) as usize).min(row.len() / 4);
        for x in x0..x1 {
            let cx = x as f64 + 0.5;
            if cx < layer.clip.left() || cx >= layer.clip.right() {
                continue;
            }
            let scene = layer.transform.widget_to_scene(Point::new(cx, cy));
            let src = match layer.interpolation {
                Interpolation::Nearest => sample_nearest(layer.pixels, scene),
                Interpolation::Smooth => sample_bilinear(layer.pixels, scene),
            };
            if let Some(src) = src {
                blend_over(&mut row[x * 4..x * 4 + 4], src);
            }
        }
    }
}

fn sample_nearest(img: &RgbaImage, p: Point) -> Option<[u8; 4]> {
    let (w, h) = img.dimensions();
    if p.x < 0.0 || p.y < 0.0 || p.x >= w as f64 || p.y >= h as f64 {
        return None;
    }
    Some(img.get_pixel(p.x as u32, p.y as u32).0)
}

/// Bilinear sample around pixel centres; samples outside the image
/// contribute nothing.
fn sample_bilinear(img: &RgbaImage, p: Point) -> Option<[u8; 4]> {
    let (w, h) = img.dimensions();
    if p.x < 0.0 || p.y < 0.0 || p.x >= w as f64 || p.y >= h as f64 {
        return None;
    }
    let fx = (p.x - 0.5).max(0.0);
    let fy = (p.y - 0.5).max(0.0);
    let x0 = (fx.floor() as u32).min(w - 1);
    let y0 = (fy.floor() as u32).min(h - 1);
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);
    let tx = fx - x0 as f64;
    let ty = fy - y0 as f64;

    let p00 = img.get_pixel(x0, y0).0;
    let p10 = img.get_pixel(x1, y0).0;
    let p01 = img.get_pixel(x0, y1).0;
    let p11 = img.get_pixel(x1, y1).0;

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] as f64 * (1.0 - tx) + p10[c] as f64 * tx;
        let bottom = p01[c] as f64 * (1.0 - tx) + p11[c] as f64 * tx;
        out[c] = (top * (1.0 - ty) + bottom * ty).round().clamp(0.0, 255.0) as u8;
    }
    Some(out)
}

/// Source-over blend onto an opaque destination pixel.
fn blend_over(dst: &mut [u8], src: [u8; 4]) {
    let a = src[3] as f32 / 255.0;
    if a <= 0.0 {
        return;
    }
    for c in 0..3 {
        let v = src[c] as f32 * a + dst[c] as f32 * (1.0 - a);
        dst[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = 255;
}
