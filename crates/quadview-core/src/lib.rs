pub mod annotate;
pub mod command;
pub mod compose;
pub mod config;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod io;
pub mod raster;
pub mod render;
pub mod sync;
pub mod viewer;
pub mod workspace;
