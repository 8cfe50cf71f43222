pub mod annotate;
pub mod cache;
pub mod consts;
pub mod diff;
pub mod error;
pub mod geometry;
pub mod io;
pub mod raster;
pub mod sample;
pub mod share;
pub mod view;
