//! Tests for unit conversions and output constants

#[cfg(test)]
mod tests {
    use scatter_contour::io::configuration::{
        COLORBAR_ASPECT, COLORBAR_PAD_IN, CONTOUR_LINE_WIDTH_PT, FIGURE_HEIGHT_IN,
        FIGURE_WIDTH_IN, GRID_RESOLUTION, LINEAR_OUTPUT_SUFFIX, LOG_OUTPUT_SUFFIX,
        MAX_TICK_BINS, TICK_LABEL_FONT_PT, inches_to_pixels, points_to_pixels,
    };

    // Tests point and inch conversions at the output resolution
    // Verified by converting points with 96 instead of 72 per inch
    #[test]
    fn test_unit_conversions_at_output_dpi() {
        assert!((points_to_pixels(72.0) - 200.0).abs() < 1e-9);
        assert!((inches_to_pixels(FIGURE_WIDTH_IN) - 1600.0).abs() < 1e-9);
        assert!((inches_to_pixels(FIGURE_HEIGHT_IN) - 1200.0).abs() < 1e-9);
    }

    // Tests the fixed grid size and output naming
    // Verified by changing the linear suffix
    #[test]
    fn test_grid_and_output_constants() {
        assert_eq!(GRID_RESOLUTION, 200);
        assert_eq!(LINEAR_OUTPUT_SUFFIX, "_contour.png");
        assert_eq!(LOG_OUTPUT_SUFFIX, "_log_contour.png");
    }

    // Tests the classic style geometry and colorbar proportions
    // Verified by mixing in the newer 6.4 x 4.8 inch default figure
    #[test]
    fn test_classic_style_defaults() {
        assert!((FIGURE_WIDTH_IN - 8.0).abs() < f64::EPSILON);
        assert!((FIGURE_HEIGHT_IN - 6.0).abs() < f64::EPSILON);
        assert!((TICK_LABEL_FONT_PT - 12.0).abs() < f64::EPSILON);
        assert!((CONTOUR_LINE_WIDTH_PT - 1.0).abs() < f64::EPSILON);
        assert_eq!(MAX_TICK_BINS, 6);
        assert!((COLORBAR_ASPECT - 20.0).abs() < f64::EPSILON);
        assert!((COLORBAR_PAD_IN - 0.25).abs() < f64::EPSILON);
    }
}
