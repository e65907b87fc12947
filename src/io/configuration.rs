//! Plot constants and rendering defaults

// Interpolation grid
/// Number of grid nodes along each axis
pub const GRID_RESOLUTION: usize = 200;

// Figure geometry and line defaults follow the classic matplotlib style
/// Output resolution in dots per inch
pub const OUTPUT_DPI: u32 = 200;
/// Default figure width in inches
pub const FIGURE_WIDTH_IN: f64 = 8.0;
/// Default figure height in inches
pub const FIGURE_HEIGHT_IN: f64 = 6.0;
/// Padding kept around drawn content when cropping to the tight bounding box
pub const TIGHT_PAD_IN: f64 = 0.1;

// Axis labels are fixed names of the two activation energies
/// Base and subscript of the x-axis label
pub const X_LABEL: (&str, &str) = ("Ea", "AA");
/// Base and subscript of the y-axis label
pub const Y_LABEL: (&str, &str) = ("Ea", "BC");

// Font sizes in points
/// Axis label font size
pub const AXIS_LABEL_FONT_PT: f64 = 20.0;
/// Tick label font size
pub const TICK_LABEL_FONT_PT: f64 = 12.0;
/// Inline contour label font size
pub const CONTOUR_LABEL_FONT_PT: f64 = 10.0;

// Line widths in points
/// Axes frame line width
pub const FRAME_LINE_WIDTH_PT: f64 = 1.0;
/// Default contour line width
pub const CONTOUR_LINE_WIDTH_PT: f64 = 1.0;
/// Thin contour line width used on the log plot
pub const THIN_CONTOUR_LINE_WIDTH_PT: f64 = 0.5;
/// Major tick length
pub const TICK_LENGTH_PT: f64 = 4.0;

// Scatter markers
/// Marker area in points squared
pub const MARKER_AREA_PT2: f64 = 20.0;

// Contour levels
/// Maximum number of automatic contour intervals on the linear plot
pub const DEFAULT_CONTOUR_BINS: usize = 8;
/// Number of contour levels requested on the log plot
pub const LOG_CONTOUR_LEVELS: usize = 15;

// Ticks
/// Maximum number of intervals between labelled ticks on linear axes and colorbars
pub const MAX_TICK_BINS: usize = 6;

// Colorbar
/// Gap between axes and colorbar in inches
pub const COLORBAR_PAD_IN: f64 = 0.25;
/// Colorbar height to width ratio
pub const COLORBAR_ASPECT: f64 = 20.0;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix of the linear contour plot
pub const LINEAR_OUTPUT_SUFFIX: &str = "_contour.png";
/// Suffix of the log contour plot
pub const LOG_OUTPUT_SUFFIX: &str = "_log_contour.png";

/// Convert a length in points to output pixels
pub fn points_to_pixels(points: f64) -> f64 {
    points * f64::from(OUTPUT_DPI) / 72.0
}

/// Convert a length in inches to output pixels
pub fn inches_to_pixels(inches: f64) -> f64 {
    inches * f64::from(OUTPUT_DPI)
}
