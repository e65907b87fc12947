//! Contour plot on log-log axes from a Delaunay-triangulation interpolant
//!
//! Grid nodes outside the convex hull of the samples are masked and the
//! pseudocolor mesh leaves them empty.

use crate::io::configuration::{
    GRID_RESOLUTION, LOG_CONTOUR_LEVELS, LOG_OUTPUT_SUFFIX, THIN_CONTOUR_LINE_WIDTH_PT,
};
use crate::io::error::{Result, computation_error};
use crate::io::loader::SampleSet;
use crate::math::ticks::contour_levels;
use crate::math::triangulation::Triangulation;
use crate::render::canvas::BLACK;
use crate::render::colormap::{ColorScale, Colormap};
use crate::render::contour::{ContourLine, trace_levels};
use crate::render::figure::{Aspect, Axis, Figure};
use crate::render::output_path;
use crate::spatial::grid::{Bounds, Extent, Grid, finite_range};
use ndarray::Array2;
use std::path::{Path, PathBuf};

/// Interpolated field and drawing parameters of a log contour plot
#[derive(Debug, Clone)]
pub struct LogContourPlot {
    /// Mesh the field is evaluated on
    pub grid: Grid,
    /// Triangulation estimates, `NAN` outside the convex hull
    pub field: Array2<f64>,
    /// Rainbow scale over the unmasked field, shared by mesh and colorbar
    pub mesh_scale: ColorScale,
    /// Scale of the scatter markers, autoscaled to z
    pub marker_scale: ColorScale,
    /// Contour levels drawn unlabelled
    pub levels: Vec<f64>,
    /// Horizontal log axis
    pub x_axis: Axis,
    /// Vertical log axis
    pub y_axis: Axis,
}

impl LogContourPlot {
    /// Triangulate, interpolate and set up log axes
    ///
    /// # Errors
    ///
    /// Returns a computation error if:
    /// - There are fewer than three distinct samples or they are collinear
    /// - No grid node lies inside the triangulation
    /// - An axis has no positive grid coordinate
    pub fn prepare(samples: &SampleSet) -> Result<Self> {
        let bounds = Bounds::of(samples.x(), samples.y())
            .ok_or_else(|| computation_error("log contour", &"no samples to plot"))?;
        let z_range = Extent::of(samples.z())
            .ok_or_else(|| computation_error("log contour", &"no samples to plot"))?;

        let grid = Grid::new(bounds, GRID_RESOLUTION, GRID_RESOLUTION);
        let triangulation = Triangulation::new(samples.x(), samples.y(), samples.z())?;
        let field = triangulation.interpolate_grid(&grid);

        let range = finite_range(&field).ok_or_else(|| {
            computation_error("log contour", &"no grid node inside the triangulation")
        })?;
        let x_axis = Axis::log(grid.xs())?;
        let y_axis = Axis::log(grid.ys())?;

        Ok(Self {
            grid,
            field,
            mesh_scale: ColorScale::new(range.min, range.max, Colormap::Rainbow),
            marker_scale: ColorScale::new(z_range.min, z_range.max, Colormap::Jet),
            levels: contour_levels(range.min, range.max, LOG_CONTOUR_LEVELS + 1),
            x_axis,
            y_axis,
        })
    }

    /// Iso-lines of the field at the chosen levels
    pub fn contour_lines(&self) -> Vec<ContourLine> {
        trace_levels(&self.field, &self.levels)
    }

    /// Compose the figure: mesh, markers, thin contours
    pub fn figure(&self, samples: &SampleSet) -> Figure {
        let mut figure = Figure::new(self.x_axis, self.y_axis, Aspect::Equal, self.mesh_scale);

        figure.draw_mesh(&self.grid, &self.field, &self.mesh_scale);
        figure.draw_scatter(samples.x(), samples.y(), samples.z(), &self.marker_scale);
        figure.draw_contours(
            &self.grid,
            &self.contour_lines(),
            THIN_CONTOUR_LINE_WIDTH_PT,
            BLACK,
            false,
        );
        figure
    }
}

/// Render `<stem>_log_contour.png` and return its path
///
/// # Errors
///
/// Returns an error if triangulation fails, an axis cannot be shown on a log
/// scale, or the PNG cannot be written
pub fn render_log_contour(samples: &SampleSet, stem: &Path) -> Result<PathBuf> {
    let plot = LogContourPlot::prepare(samples)?;
    let path = output_path(stem, LOG_OUTPUT_SUFFIX);
    plot.figure(samples).save(&path)?;
    Ok(path)
}
