//! Iso-line tracing on gridded fields and inline label placement
//!
//! Lines are traced by marching squares in grid index space: a point
//! `(col, row)` lies on the mesh with fractional indices. Cells touching a
//! masked (`NAN`) node produce no segments, so lines stop at mask borders.

use bitvec::prelude::{BitVec, bitvec};
use ndarray::Array2;
use std::collections::HashMap;

/// Grid edge a crossing lies on: `(row, col, vertical)`
///
/// A horizontal edge joins `(row, col)` and `(row, col + 1)`; a vertical edge
/// joins `(row, col)` and `(row + 1, col)`.
type EdgeKey = (usize, usize, bool);

/// One connected iso-line at a single level
#[derive(Debug, Clone, PartialEq)]
pub struct ContourLine {
    /// Field value traced by the line
    pub level: f64,
    /// Vertices as fractional `(col, row)` grid indices
    pub points: Vec<(f64, f64)>,
    /// Whether the last vertex joins back to the first
    pub closed: bool,
}

/// Trace every level in order
pub fn trace_levels(field: &Array2<f64>, levels: &[f64]) -> Vec<ContourLine> {
    levels
        .iter()
        .flat_map(|&level| trace_level(field, level))
        .collect()
}

/// Trace the iso-lines of a single level
///
/// Nodes equal to the level count as above it. Saddle cells are resolved with
/// the mean of their four corners.
pub fn trace_level(field: &Array2<f64>, level: f64) -> Vec<ContourLine> {
    if !level.is_finite() {
        return Vec::new();
    }
    let (segments, crossings) = march_squares(field, level);
    connect_segments(&segments, &crossings)
        .into_iter()
        .map(|(keys, closed)| ContourLine {
            level,
            points: keys
                .iter()
                .filter_map(|key| crossings.get(key).copied())
                .collect(),
            closed,
        })
        .filter(|line| line.points.len() >= 2)
        .collect()
}

fn march_squares(
    field: &Array2<f64>,
    level: f64,
) -> (Vec<(EdgeKey, EdgeKey)>, HashMap<EdgeKey, (f64, f64)>) {
    let (rows, cols) = field.dim();
    let mut segments = Vec::new();
    let mut crossings = HashMap::new();

    for row in 0..rows.saturating_sub(1) {
        for col in 0..cols.saturating_sub(1) {
            let at = |r: usize, c: usize| field.get((r, c)).copied().unwrap_or(f64::NAN);
            let corners = [
                at(row, col),
                at(row, col + 1),
                at(row + 1, col + 1),
                at(row + 1, col),
            ];
            if corners.iter().any(|v| !v.is_finite()) {
                continue;
            }

            let [bl, br, tr, tl] = corners;
            let case = usize::from(bl >= level)
                | usize::from(br >= level) << 1
                | usize::from(tr >= level) << 2
                | usize::from(tl >= level) << 3;

            let bottom = (row, col, false);
            let top = (row + 1, col, false);
            let left = (row, col, true);
            let right = (row, col + 1, true);
            let centre_above = (bl + br + tr + tl) / 4.0 >= level;

            let pairs: &[(EdgeKey, EdgeKey)] = match case {
                1 | 14 => &[(left, bottom)],
                2 | 13 => &[(bottom, right)],
                3 | 12 => &[(left, right)],
                4 | 11 => &[(right, top)],
                6 | 9 => &[(bottom, top)],
                7 | 8 => &[(left, top)],
                5 if centre_above => &[(left, top), (bottom, right)],
                5 => &[(left, bottom), (right, top)],
                10 if centre_above => &[(left, bottom), (right, top)],
                10 => &[(bottom, right), (left, top)],
                _ => &[],
            };

            for &(a, b) in pairs {
                for key in [a, b] {
                    crossings
                        .entry(key)
                        .or_insert_with(|| crossing_point(field, key, level));
                }
                segments.push((a, b));
            }
        }
    }

    (segments, crossings)
}

// Linear interpolation of the level along one grid edge
fn crossing_point(field: &Array2<f64>, (row, col, vertical): EdgeKey, level: f64) -> (f64, f64) {
    let (end_row, end_col) = if vertical { (row + 1, col) } else { (row, col + 1) };
    let v0 = field.get((row, col)).copied().unwrap_or(f64::NAN);
    let v1 = field.get((end_row, end_col)).copied().unwrap_or(f64::NAN);
    let delta = v1 - v0;
    let t = if delta.abs() > f64::EPSILON {
        ((level - v0) / delta).clamp(0.0, 1.0)
    } else {
        0.5
    };

    if vertical {
        (col as f64, row as f64 + t)
    } else {
        (col as f64 + t, row as f64)
    }
}

// Chains segments sharing an edge into polylines of edge keys
fn connect_segments(
    segments: &[(EdgeKey, EdgeKey)],
    crossings: &HashMap<EdgeKey, (f64, f64)>,
) -> Vec<(Vec<EdgeKey>, bool)> {
    let mut incident: HashMap<EdgeKey, Vec<usize>> = HashMap::with_capacity(crossings.len());
    for (index, &(a, b)) in segments.iter().enumerate() {
        incident.entry(a).or_default().push(index);
        incident.entry(b).or_default().push(index);
    }

    let mut used = bitvec![0; segments.len()];
    let mut lines = Vec::new();

    for (start, &(a, b)) in segments.iter().enumerate() {
        if used.get(start).is_none_or(|flag| *flag) {
            continue;
        }
        used.set(start, true);

        let mut chain = vec![a, b];
        let closed = extend_chain(&mut chain, segments, &incident, &mut used);
        if !closed {
            let mut backward = vec![a];
            extend_chain(&mut backward, segments, &incident, &mut used);
            if backward.len() > 1 {
                backward.reverse();
                backward.pop();
                backward.extend(chain);
                chain = backward;
            }
        }
        lines.push((chain, closed));
    }

    lines
}

// Walks from the chain's tail along unused segments; true when it closes
fn extend_chain(
    chain: &mut Vec<EdgeKey>,
    segments: &[(EdgeKey, EdgeKey)],
    incident: &HashMap<EdgeKey, Vec<usize>>,
    used: &mut BitVec,
) -> bool {
    loop {
        let Some(&tail) = chain.last() else {
            return false;
        };
        let next = incident.get(&tail).and_then(|candidates| {
            candidates
                .iter()
                .copied()
                .find(|&index| used.get(index).is_some_and(|flag| !*flag))
        });
        let Some(index) = next else {
            return false;
        };
        used.set(index, true);

        let Some(&(a, b)) = segments.get(index) else {
            return false;
        };
        let other = if a == tail { b } else { a };
        if chain.first() == Some(&other) {
            chain.push(other);
            return true;
        }
        chain.push(other);
    }
}

/// Text of an inline contour label
pub fn format_level(level: f64) -> String {
    format!("{level:.3}")
}

/// Axis-aligned box reserved for an inline label, in pixels
#[derive(Debug, Clone, PartialEq)]
pub struct LabelBox {
    /// Label text
    pub text: String,
    /// Centre of the box
    pub center: (f64, f64),
    /// Half of the box width
    pub half_width: f64,
    /// Half of the box height
    pub half_height: f64,
}

impl LabelBox {
    /// Whether a point falls inside the box
    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        (x - self.center.0).abs() <= self.half_width
            && (y - self.center.1).abs() <= self.half_height
    }

    fn overlaps(&self, other: &Self) -> bool {
        (self.center.0 - other.center.0).abs() <= self.half_width + other.half_width
            && (self.center.1 - other.center.1).abs() <= self.half_height + other.half_height
    }
}

/// Place at most one label per line at the midpoint of its arc length
///
/// `lines` holds each line's level and its vertices in pixel space and
/// `size` gives the `(width, height)` of a label's text. Lines shorter than
/// twice the label width and labels that would overlap an earlier one or
/// leave `area` (`left, top, right, bottom`) are skipped.
pub fn place_labels<F>(
    lines: &[(f64, Vec<(f64, f64)>)],
    size: F,
    padding: f64,
    area: (f64, f64, f64, f64),
) -> Vec<LabelBox>
where
    F: Fn(&str) -> (f64, f64),
{
    let mut placed: Vec<LabelBox> = Vec::new();

    for (level, points) in lines {
        let text = format_level(*level);
        let (width, height) = size(&text);
        let length = arc_length(points);
        if length < 2.0 * width {
            continue;
        }
        let Some(center) = point_at_distance(points, length / 2.0) else {
            continue;
        };

        let candidate = LabelBox {
            text,
            center,
            half_width: width / 2.0 + padding,
            half_height: height / 2.0 + padding,
        };
        let (left, top, right, bottom) = area;
        let inside = center.0 - candidate.half_width >= left
            && center.0 + candidate.half_width <= right
            && center.1 - candidate.half_height >= top
            && center.1 + candidate.half_height <= bottom;
        if inside && !placed.iter().any(|other| other.overlaps(&candidate)) {
            placed.push(candidate);
        }
    }

    placed
}

/// Total length of a polyline
pub fn arc_length(points: &[(f64, f64)]) -> f64 {
    points
        .windows(2)
        .filter_map(|pair| match pair {
            [a, b] => Some((b.0 - a.0).hypot(b.1 - a.1)),
            _ => None,
        })
        .sum()
}

fn point_at_distance(points: &[(f64, f64)], distance: f64) -> Option<(f64, f64)> {
    let mut walked = 0.0;
    for pair in points.windows(2) {
        let [a, b] = pair else {
            continue;
        };
        let step = (b.0 - a.0).hypot(b.1 - a.1);
        if walked + step >= distance && step > 0.0 {
            let t = (distance - walked) / step;
            return Some((t.mul_add(b.0 - a.0, a.0), t.mul_add(b.1 - a.1, a.1)));
        }
        walked += step;
    }
    points.last().copied()
}
