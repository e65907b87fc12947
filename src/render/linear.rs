//! Contour plot on linear axes from a linear-kernel RBF interpolant

use crate::io::configuration::{
    CONTOUR_LINE_WIDTH_PT, DEFAULT_CONTOUR_BINS, GRID_RESOLUTION, LINEAR_OUTPUT_SUFFIX,
};
use crate::io::error::{Result, computation_error};
use crate::io::loader::SampleSet;
use crate::math::rbf::LinearRbf;
use crate::math::ticks::contour_levels;
use crate::render::canvas::BLACK;
use crate::render::colormap::{ColorScale, Colormap};
use crate::render::contour::{ContourLine, trace_levels};
use crate::render::figure::{Aspect, Axis, Figure};
use crate::render::output_path;
use crate::spatial::grid::{Bounds, Extent, Grid, finite_range};
use ndarray::Array2;
use std::path::{Path, PathBuf};

/// Interpolated field and drawing parameters of a linear contour plot
#[derive(Debug, Clone)]
pub struct LinearContourPlot {
    /// Mesh the field is evaluated on
    pub grid: Grid,
    /// RBF estimates at every mesh node, indexed `[row, col]`
    pub field: Array2<f64>,
    /// Colour scale of image, markers and colorbar: exactly `[min z, max z]`
    pub color_scale: ColorScale,
    /// Contour levels drawn and labelled
    pub levels: Vec<f64>,
}

impl LinearContourPlot {
    /// Interpolate the samples and choose levels
    ///
    /// # Errors
    ///
    /// Returns a computation error if there are no samples or the RBF
    /// system is singular
    pub fn prepare(samples: &SampleSet) -> Result<Self> {
        let bounds = Bounds::of(samples.x(), samples.y())
            .ok_or_else(|| computation_error("linear contour", &"no samples to plot"))?;
        let z_range = Extent::of(samples.z())
            .ok_or_else(|| computation_error("linear contour", &"no samples to plot"))?;

        let grid = Grid::new(bounds, GRID_RESOLUTION, GRID_RESOLUTION);
        let rbf = LinearRbf::fit(samples.x(), samples.y(), samples.z())?;
        let field = rbf.evaluate_grid(&grid);

        let levels = finite_range(&field).map_or_else(Vec::new, |range| {
            contour_levels(range.min, range.max, DEFAULT_CONTOUR_BINS)
        });

        Ok(Self {
            grid,
            field,
            color_scale: ColorScale::new(z_range.min, z_range.max, Colormap::Jet),
            levels,
        })
    }

    /// Iso-lines of the field at the chosen levels
    pub fn contour_lines(&self) -> Vec<ContourLine> {
        trace_levels(&self.field, &self.levels)
    }

    /// Compose the figure: image, markers, labelled contours
    pub fn figure(&self, samples: &SampleSet) -> Figure {
        let bounds = self.grid.bounds();
        let mut figure = Figure::new(
            Axis::linear(bounds.x),
            Axis::linear(bounds.y),
            Aspect::Auto,
            self.color_scale,
        );

        figure.draw_image(&self.field, &self.color_scale);
        figure.draw_scatter(samples.x(), samples.y(), samples.z(), &self.color_scale);
        figure.draw_contours(
            &self.grid,
            &self.contour_lines(),
            CONTOUR_LINE_WIDTH_PT,
            BLACK,
            true,
        );
        figure
    }
}

/// Render `<stem>_contour.png` and return its path
///
/// # Errors
///
/// Returns an error if interpolation fails or the PNG cannot be written
pub fn render_linear_contour(samples: &SampleSet, stem: &Path) -> Result<PathBuf> {
    let plot = LinearContourPlot::prepare(samples)?;
    let path = output_path(stem, LINEAR_OUTPUT_SUFFIX);
    plot.figure(samples).save(&path)?;
    Ok(path)
}
