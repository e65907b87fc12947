//! Error types for loading samples, interpolating and writing plots

use std::fmt;
use std::path::PathBuf;

/// Main error type for all plotting operations
#[derive(Debug)]
pub enum PlotError {
    /// Input text is not a rectangular three-column numeric table
    Parse {
        /// Path of the sample file
        path: PathBuf,
        /// 1-based line number of the offending line (0 when the whole file is at fault)
        line: usize,
        /// Description of what could not be parsed
        reason: String,
    },

    /// Numerical routine met degenerate input
    ///
    /// Raised for example when:
    /// - The RBF system is singular (duplicated sample points)
    /// - All samples are collinear, so no triangle covers the grid
    /// - A logarithmic axis has no positive extent
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// Failed to encode or save a rendered plot
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { path, line, reason } => {
                if *line == 0 {
                    write!(f, "Failed to parse '{}': {reason}", path.display())
                } else {
                    write!(
                        f,
                        "Failed to parse '{}' at line {line}: {reason}",
                        path.display()
                    )
                }
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for PlotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for plotting results
pub type Result<T> = std::result::Result<T, PlotError>;

impl From<image::ImageError> for PlotError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageExport {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for PlotError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> PlotError {
    PlotError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create a parse error for the given file and line
pub fn parse_error(path: impl Into<PathBuf>, line: usize, reason: &impl ToString) -> PlotError {
    PlotError::Parse {
        path: path.into(),
        line,
        reason: reason.to_string(),
    }
}
