//! Spatial data structures: extents, bounding boxes and regular grids

/// Regular interpolation grid and field sampling
pub mod grid;

pub use grid::{Bounds, Extent, Grid};
