//! Plot rendering: drawing surface, figure layout and the two contour plots

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// RGBA canvas with line, shape and text primitives
pub mod canvas;
/// Colormaps and value-to-colour scales
pub mod colormap;
/// Marching-squares iso-lines and inline label placement
pub mod contour;
/// Axes, ticks, colorbar and tight PNG export
pub mod figure;
/// Contour plot on linear axes (RBF interpolation)
pub mod linear;
/// Contour plot on log-log axes (triangulation interpolation)
pub mod log;

/// Output path formed by appending `suffix` to `stem`
pub fn output_path(stem: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(stem.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
