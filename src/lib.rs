//! Contour plots of scattered (x, y, z) samples
//!
//! Each sample file is rendered twice: on linear axes from a linear-kernel
//! radial basis function interpolant, and on log-log axes from a Delaunay
//! triangulation interpolant masked outside the convex hull of the samples.

#![forbid(unsafe_code)]

/// Input/output operations and error handling
pub mod io;
/// Dense linear algebra, interpolants and tick selection
pub mod math;
/// Figure layout, drawing and the two contour renderers
pub mod render;
/// Regular grids over the sample bounding box
pub mod spatial;

pub use io::error::{PlotError, Result};
