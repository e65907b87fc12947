//! Tests for the log-axes contour renderer

#[cfg(test)]
mod tests {
    use scatter_contour::PlotError;
    use scatter_contour::io::loader::SampleSet;
    use scatter_contour::render::colormap::Colormap;
    use scatter_contour::render::log::{LogContourPlot, render_log_contour};

    fn samples(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> SampleSet {
        SampleSet::new(x, y, z).unwrap_or_else(|e| panic!("samples: {e}"))
    }

    // Tests the mesh scale follows the unmasked field and markers follow z
    // Verified by sharing one colour scale between mesh and markers
    #[test]
    fn test_prepare_scales_and_masking() {
        let set = samples(
            vec![1.0, 10.0, 1.0, 10.0, 5.0],
            vec![1.0, 1.0, 10.0, 10.0, 5.0],
            vec![1.0, 2.0, 3.0, 4.0, 9.0],
        );

        let plot = LogContourPlot::prepare(&set).unwrap_or_else(|e| panic!("prepare failed: {e}"));

        assert_eq!(plot.field.dim(), (200, 200));
        assert_eq!(plot.mesh_scale.colormap, Colormap::Rainbow);
        assert_eq!(plot.marker_scale.colormap, Colormap::Jet);
        assert!((plot.marker_scale.max - 9.0).abs() < f64::EPSILON);
        assert!(plot.mesh_scale.max <= 9.0 && plot.mesh_scale.min >= 1.0);
        assert!(plot.levels.len() <= 16);
        assert!((plot.x_axis.min() - 1.0).abs() < 1e-12);
    }

    // Tests a triangle leaves the far corner of the grid masked
    // Verified by extrapolating outside the hull
    #[test]
    fn test_prepare_masks_outside_hull() {
        let set = samples(vec![1.0, 4.0, 1.0], vec![1.0, 1.0, 4.0], vec![1.0, 2.0, 3.0]);

        let plot = LogContourPlot::prepare(&set).unwrap_or_else(|e| panic!("prepare failed: {e}"));

        assert!(plot.field.get((199, 199)).is_some_and(|v| v.is_nan()));
        assert!(plot.field.get((0, 0)).is_some_and(|v| v.is_finite()));
    }

    // Tests a non-positive lower bound falls back to the smallest positive node
    // Verified by failing on any non-positive coordinate
    #[test]
    fn test_prepare_with_zero_lower_bound() {
        let set = samples(
            vec![0.0, 1.0, 0.0, 1.0],
            vec![0.0, 0.0, 1.0, 1.0],
            vec![1.0, 2.0, 3.0, 4.0],
        );

        let plot = LogContourPlot::prepare(&set).unwrap_or_else(|e| panic!("prepare failed: {e}"));

        assert!((plot.x_axis.min() - 1.0 / 199.0).abs() < 1e-12);
    }

    // Tests degenerate geometry is reported as a computation error
    // Verified by returning an all-masked field for collinear samples
    #[test]
    fn test_prepare_degenerate_inputs() {
        let collinear = samples(vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            LogContourPlot::prepare(&collinear),
            Err(PlotError::Computation { .. })
        ));

        let negative = samples(vec![-3.0, -1.0, -2.0], vec![1.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            LogContourPlot::prepare(&negative),
            Err(PlotError::Computation { .. })
        ));
    }

    // Tests the plot is written next to the stem
    // Verified by reusing the linear suffix
    #[test]
    fn test_render_writes_png() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let set = samples(
            vec![1.0, 100.0, 1.0, 100.0],
            vec![1.0, 1.0, 100.0, 100.0],
            vec![1.0, 2.0, 3.0, 4.0],
        );

        let path = render_log_contour(&set, &dir.path().join("grid"))
            .unwrap_or_else(|e| panic!("render failed: {e}"));

        assert_eq!(path, dir.path().join("grid_log_contour.png"));
        assert!(image::open(&path).is_ok());
    }
}
