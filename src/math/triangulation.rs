//! Delaunay triangulation and natural-neighbour interpolation of scattered samples
//!
//! Samples are triangulated with `spade`. Grid values use Sibson weights:
//! each sample contributes in proportion to the area its Voronoi cell would
//! lose to the query point. The interpolant is continuous and reproduces
//! linear fields. It is only defined on the convex hull of the samples, so
//! grid nodes outside the hull are left as `NAN`.

use crate::io::error::{Result, computation_error};
use crate::spatial::grid::Grid;
use ndarray::Array2;
use spade::{DelaunayTriangulation, HasPosition, Point2, Triangulation as _};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy)]
struct Sample {
    position: Point2<f64>,
    value: f64,
}

impl HasPosition for Sample {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        self.position
    }
}

/// Delaunay triangulation of scattered samples carrying a value per vertex
pub struct Triangulation {
    delaunay: DelaunayTriangulation<Sample>,
}

impl Triangulation {
    /// Triangulate samples `(x[i], y[i])` carrying values `z[i]`
    ///
    /// Exact duplicate points are triangulated once; the first occurrence
    /// supplies the value.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The three slices differ in length
    /// - Fewer than three distinct points are given
    /// - A coordinate is outside the range the triangulation accepts
    /// - All points are collinear, so no triangle can be formed
    pub fn new(x: &[f64], y: &[f64], z: &[f64]) -> Result<Self> {
        if x.len() != z.len() || y.len() != z.len() {
            return Err(computation_error(
                "triangulation",
                &"x, y and z must have the same length",
            ));
        }

        let mut seen = HashSet::new();
        let samples: Vec<Sample> = x
            .iter()
            .zip(y)
            .zip(z)
            .filter(|((px, py), _)| seen.insert((px.to_bits(), py.to_bits())))
            .map(|((&px, &py), &value)| Sample {
                position: Point2::new(px, py),
                value,
            })
            .collect();

        if samples.len() < 3 {
            return Err(computation_error(
                "triangulation",
                &format!("need at least 3 distinct points, got {}", samples.len()),
            ));
        }

        let delaunay = DelaunayTriangulation::<Sample>::bulk_load(samples)
            .map_err(|e| computation_error("triangulation", &e))?;
        if delaunay.num_inner_faces() == 0 {
            return Err(computation_error(
                "triangulation",
                &"all points are collinear",
            ));
        }

        Ok(Self { delaunay })
    }

    /// Number of distinct sample points used as vertices
    pub fn vertex_count(&self) -> usize {
        self.delaunay.num_vertices()
    }

    /// Number of Delaunay triangles
    pub fn triangle_count(&self) -> usize {
        self.delaunay.num_inner_faces()
    }

    /// Interpolated value at a point, or `None` outside the convex hull
    pub fn interpolate(&self, x: f64, y: f64) -> Option<f64> {
        self.delaunay
            .natural_neighbor()
            .interpolate(|vertex| vertex.data().value, Point2::new(x, y))
            .filter(|value| value.is_finite())
    }

    /// Interpolate onto every node of a grid; nodes outside the hull are `NAN`
    pub fn interpolate_grid(&self, grid: &Grid) -> Array2<f64> {
        let natural = self.delaunay.natural_neighbor();
        grid.map(|x, y| {
            natural
                .interpolate(|vertex| vertex.data().value, Point2::new(x, y))
                .filter(|value| value.is_finite())
                .unwrap_or(f64::NAN)
        })
    }
}
