//! Numerical routines behind the plots

/// Linear-kernel radial basis function interpolation
pub mod rbf;
/// Tick positions, contour levels and tick label formatting
pub mod ticks;
/// Delaunay triangulation and natural-neighbour interpolation
pub mod triangulation;
