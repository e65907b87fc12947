//! Sample file parsing and column-wise masking of non-finite rows

use crate::io::error::{PlotError, Result, parse_error};
use std::path::Path;

/// Scattered (x, y, z) samples held as three equal-length columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl SampleSet {
    /// Build a sample set from three columns
    ///
    /// # Errors
    ///
    /// Returns an error if the columns differ in length
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() || x.len() != z.len() {
            return Err(PlotError::Computation {
                operation: "sample set",
                reason: format!(
                    "column lengths differ (x={}, y={}, z={})",
                    x.len(),
                    y.len(),
                    z.len()
                ),
            });
        }
        Ok(Self { x, y, z })
    }

    /// Read a sample file and drop every row holding a non-finite value
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - Any data line does not hold exactly three numeric tokens
    /// - The file holds no data lines at all
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| PlotError::FileSystem {
            path: path.to_path_buf(),
            operation: "read samples",
            source: e,
        })?;

        Ok(Self::parse(&text, path)?.finite_only())
    }

    /// Parse whitespace-delimited three-column text
    ///
    /// Blank lines and lines starting with `#` are skipped. Non-finite tokens
    /// (`nan`, `inf`) are kept; use [`SampleSet::finite_only`] to mask them.
    ///
    /// # Errors
    ///
    /// Returns an error if a data line has a column count other than three,
    /// holds a non-numeric token, or if there are no data lines
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let mut samples = Self::default();

        for (index, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let tokens: Vec<&str> = trimmed.split_whitespace().collect();
            let [x, y, z] = tokens.as_slice() else {
                return Err(parse_error(
                    path,
                    index + 1,
                    &format!("expected 3 columns, found {}", tokens.len()),
                ));
            };

            samples.x.push(parse_value(x, path, index + 1)?);
            samples.y.push(parse_value(y, path, index + 1)?);
            samples.z.push(parse_value(z, path, index + 1)?);
        }

        if samples.is_empty() {
            return Err(parse_error(path, 0, &"no data rows"));
        }

        Ok(samples)
    }

    /// Keep only rows where x, y and z are all finite, preserving row order
    #[must_use]
    pub fn finite_only(self) -> Self {
        let mut filtered = Self::default();
        for ((x, y), z) in self.x.into_iter().zip(self.y).zip(self.z) {
            if x.is_finite() && y.is_finite() && z.is_finite() {
                filtered.x.push(x);
                filtered.y.push(y);
                filtered.z.push(z);
            }
        }
        filtered
    }

    /// Number of rows
    pub const fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the set holds no rows
    pub const fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// X column
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Y column
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Z column
    pub fn z(&self) -> &[f64] {
        &self.z
    }

    /// Iterate rows as `(x, y, z)` tuples
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((&x, &y), &z)| (x, y, z))
    }
}

// Rust's float parser accepts "nan", "inf" and "infinity" in any case
fn parse_value(token: &str, path: &Path, line: usize) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|e| parse_error(path, line, &format!("invalid number '{token}': {e}")))
}
