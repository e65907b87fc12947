//! Regular interpolation grid over the bounding box of a sample set
//!
//! Field arrays produced on the grid are indexed `[row, col]` where the row
//! follows y (row 0 is the minimum y) and the column follows x.

use ndarray::Array2;
use num_traits::Float;

/// Closed interval `[min, max]` of one coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl Extent {
    /// Minimum and maximum of the values, or `None` when there are none
    pub fn of(values: &[f64]) -> Option<Self> {
        let mut iter = values.iter().copied();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(Self { min, max })
    }

    /// Width of the interval
    pub const fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Whether the value lies inside the interval
    pub const fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Axis-aligned bounding box of the x/y sample coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Extent along x
    pub x: Extent,
    /// Extent along y
    pub y: Extent,
}

impl Bounds {
    /// Bounding box of paired coordinates, or `None` when there are none
    pub fn of(x: &[f64], y: &[f64]) -> Option<Self> {
        Some(Self {
            x: Extent::of(x)?,
            y: Extent::of(y)?,
        })
    }
}

/// `count` evenly spaced values from `start` to `stop`, both included
pub fn linspace<T: Float>(start: T, stop: T, count: usize) -> Vec<T> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let steps = T::from(count - 1).unwrap_or_else(T::one);
            let step = (stop - start) / steps;
            (0..count)
                .map(|i| {
                    if i + 1 == count {
                        stop
                    } else {
                        start + step * T::from(i).unwrap_or_else(T::zero)
                    }
                })
                .collect()
        }
    }
}

/// Regular mesh of `nx` by `ny` nodes spanning a bounding box
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    bounds: Bounds,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Grid {
    /// Build the mesh; node coordinates include both box edges
    pub fn new(bounds: Bounds, nx: usize, ny: usize) -> Self {
        Self {
            bounds,
            xs: linspace(bounds.x.min, bounds.x.max, nx),
            ys: linspace(bounds.y.min, bounds.y.max, ny),
        }
    }

    /// Bounding box covered by the mesh
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Node x coordinates, ascending
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Node y coordinates, ascending
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Array shape `(rows, cols)` of fields evaluated on this mesh
    pub const fn shape(&self) -> (usize, usize) {
        (self.ys.len(), self.xs.len())
    }

    /// Evaluate `f(x, y)` at every node
    pub fn map<F>(&self, mut f: F) -> Array2<f64>
    where
        F: FnMut(f64, f64) -> f64,
    {
        let mut field = Array2::from_elem(self.shape(), f64::NAN);
        for ((row, col), value) in field.indexed_iter_mut() {
            if let (Some(&x), Some(&y)) = (self.xs.get(col), self.ys.get(row)) {
                *value = f(x, y);
            }
        }
        field
    }

    /// Data coordinates of a fractional `(col, row)` position on the mesh
    pub fn point_at(&self, col: f64, row: f64) -> (f64, f64) {
        (
            position(self.bounds.x, self.xs.len(), col),
            position(self.bounds.y, self.ys.len(), row),
        )
    }

    /// Fractional column and row of a point, or `None` outside the mesh
    ///
    /// Degenerate axes (a single distinct coordinate) map every point on
    /// them to index zero.
    pub fn locate(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        Some((
            fractional_index(&self.xs, self.bounds.x, x)?,
            fractional_index(&self.ys, self.bounds.y, y)?,
        ))
    }
}

fn position(extent: Extent, count: usize, index: f64) -> f64 {
    if count < 2 {
        return extent.min;
    }
    (index / (count - 1) as f64).mul_add(extent.span(), extent.min)
}

fn fractional_index(nodes: &[f64], extent: Extent, value: f64) -> Option<f64> {
    if nodes.is_empty() || !extent.contains(value) {
        return None;
    }
    let span = extent.span();
    if span <= 0.0 {
        return Some(0.0);
    }
    let last = (nodes.len() - 1) as f64;
    Some(((value - extent.min) / span * last).clamp(0.0, last))
}

/// Minimum and maximum of the finite entries of a field
pub fn finite_range(field: &Array2<f64>) -> Option<Extent> {
    let finite: Vec<f64> = field.iter().copied().filter(|v| v.is_finite()).collect();
    Extent::of(&finite)
}

/// Bilinear sample of a field at fractional `(col, row)`, clamped to the field
///
/// Returns `NAN` when any of the four surrounding nodes is masked.
pub fn bilinear(field: &Array2<f64>, col: f64, row: f64) -> f64 {
    let (rows, cols) = field.dim();
    if rows == 0 || cols == 0 || !col.is_finite() || !row.is_finite() {
        return f64::NAN;
    }
    let u = col.clamp(0.0, (cols - 1) as f64);
    let v = row.clamp(0.0, (rows - 1) as f64);
    let (c0, r0) = (u.floor() as usize, v.floor() as usize);
    let (c1, r1) = ((c0 + 1).min(cols - 1), (r0 + 1).min(rows - 1));
    let (fu, fv) = (u - c0 as f64, v - r0 as f64);

    let at = |r: usize, c: usize| field.get((r, c)).copied().unwrap_or(f64::NAN);
    let bottom = (at(r0, c1) - at(r0, c0)).mul_add(fu, at(r0, c0));
    let top = (at(r1, c1) - at(r1, c0)).mul_add(fu, at(r1, c0));
    (top - bottom).mul_add(fv, bottom)
}
