//! Radial basis function interpolation with a linear kernel
//!
//! The interpolant is `s(p) = sum_i w_i * |p - p_i|`, with weights chosen so
//! that `s` reproduces every sample exactly. There is no polynomial term and
//! no smoothing. Distance matrices of distinct points are non-singular, so
//! the system has a unique solution unless samples repeat.
//!
//! The interpolant is defined everywhere and extrapolates past the convex
//! hull of the samples.

use crate::io::error::{Result, computation_error};
use crate::spatial::grid::Grid;
use nalgebra::{DMatrix, DVector};
use ndarray::Array2;

/// Fitted linear-kernel RBF interpolant of scattered 2-D samples
#[derive(Debug, Clone)]
pub struct LinearRbf {
    centers: Vec<[f64; 2]>,
    weights: Vec<f64>,
}

impl LinearRbf {
    /// Fit the interpolant to samples `(x[i], y[i]) -> z[i]`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The three slices differ in length or are empty
    /// - The kernel matrix is singular (a single sample, or repeated points)
    pub fn fit(x: &[f64], y: &[f64], z: &[f64]) -> Result<Self> {
        let n = z.len();
        if x.len() != n || y.len() != n {
            return Err(computation_error(
                "rbf fit",
                &"x, y and z must have the same length",
            ));
        }
        if n == 0 {
            return Err(computation_error("rbf fit", &"no samples to interpolate"));
        }

        let centers: Vec<[f64; 2]> = x.iter().zip(y).map(|(&px, &py)| [px, py]).collect();
        let weights = solve_weights(&centers, z)?;

        Ok(Self { centers, weights })
    }

    /// Evaluate the interpolant at a point
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        self.centers
            .iter()
            .zip(&self.weights)
            .map(|(&c, &w)| w * distance(c, [x, y]))
            .sum()
    }

    /// Evaluate the interpolant at every node of a grid
    pub fn evaluate_grid(&self, grid: &Grid) -> Array2<f64> {
        grid.map(|x, y| self.evaluate(x, y))
    }

    /// Solved kernel weights, one per center
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Number of centers (samples) in the fit
    pub const fn len(&self) -> usize {
        self.centers.len()
    }

    /// Whether the fit holds no centers
    pub const fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }
}

// LU with partial pivoting; repeated points give identical kernel rows and
// therefore an exactly zero pivot
fn solve_weights(centers: &[[f64; 2]], z: &[f64]) -> Result<Vec<f64>> {
    let n = centers.len();
    let kernel = DMatrix::from_fn(n, n, |i, j| match (centers.get(i), centers.get(j)) {
        (Some(&a), Some(&b)) => distance(a, b),
        _ => 0.0,
    });
    let rhs = DVector::from_column_slice(z);

    let solution = kernel.lu().solve(&rhs).ok_or_else(|| {
        computation_error(
            "rbf fit",
            &format!("kernel matrix of {n} samples is singular"),
        )
    })?;

    if solution.iter().any(|w| !w.is_finite()) {
        return Err(computation_error(
            "rbf fit",
            &"kernel system has no finite solution",
        ));
    }

    Ok(solution.iter().copied().collect())
}

fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] - b[0]).hypot(a[1] - b[1])
}
