#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use quadview_core::config::AppDefaults;
use quadview_core::geometry::Size;
use quadview_core::raster::Raster;
use quadview_core::viewer::{Viewer, ViewerId, ViewerImages};

/// Solid-colour raster of the given size.
pub fn make_raster(width: u32, height: u32, rgba: [u8; 4]) -> Raster {
    Raster::new(RgbaImage::from_pixel(width, height, Rgba(rgba)))
}

/// Raster whose pixel (x, y) encodes x in red and y in green.
pub fn make_gradient(width: u32, height: u32) -> Raster {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255])
    });
    Raster::new(img)
}

/// Viewer with a single main image and the default settings.
pub fn make_single_viewer(width: u32, height: u32, viewport: Size) -> Viewer {
    let images = ViewerImages::single(make_raster(width, height, [10, 10, 10, 255]));
    Viewer::new(ViewerId(1), images, &AppDefaults::default(), viewport).expect("viewer")
}

/// Viewer with a main image and all three overlays of the given sizes.
pub fn make_quad_viewer(main: (u32, u32), overlay: (u32, u32), viewport: Size) -> Viewer {
    let images = ViewerImages {
        main: make_raster(main.0, main.1, [255, 0, 0, 255]),
        top_right: Some(make_raster(overlay.0, overlay.1, [0, 255, 0, 255])),
        bottom_right: Some(make_raster(overlay.0, overlay.1, [0, 0, 255, 255])),
        bottom_left: Some(make_raster(overlay.0, overlay.1, [255, 255, 0, 255])),
    };
    Viewer::new(ViewerId(1), images, &AppDefaults::default(), viewport).expect("viewer")
}
