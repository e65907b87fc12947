//! Tests for marching-squares tracing and inline label placement

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use scatter_contour::render::contour::{
        arc_length, format_level, place_labels, trace_level, trace_levels,
    };

    // Tests a ramp yields one straight open line through the whole field
    // Verified by skipping the backward extension of open chains
    #[test]
    fn test_ramp_gives_single_open_line() {
        let field = Array2::from_shape_fn((5, 6), |(_, c)| c as f64);

        let lines = trace_level(&field, 2.5);

        assert_eq!(lines.len(), 1);
        let line = lines.first().unwrap_or_else(|| panic!("no line"));
        assert!(!line.closed);
        assert_eq!(line.points.len(), 5);
        assert!(line.points.iter().all(|&(col, _)| (col - 2.5).abs() < 1e-12));
        let rows: Vec<f64> = line.points.iter().map(|&(_, row)| row).collect();
        assert!(rows == vec![0.0, 1.0, 2.0, 3.0, 4.0] || rows == vec![4.0, 3.0, 2.0, 1.0, 0.0]);
    }

    // Tests a cone yields a closed ring near the expected radius
    // Verified by never marking chains as closed
    #[test]
    fn test_cone_gives_closed_ring() {
        let field = Array2::from_shape_fn((11, 11), |(r, c)| {
            (c as f64 - 5.0).hypot(r as f64 - 5.0)
        });

        let lines = trace_level(&field, 3.0);

        assert_eq!(lines.len(), 1);
        let ring = lines.first().unwrap_or_else(|| panic!("no ring"));
        assert!(ring.closed);
        assert_eq!(ring.points.first(), ring.points.last());
        for &(col, row) in &ring.points {
            let radius = (col - 5.0).hypot(row - 5.0);
            assert!((radius - 3.0).abs() < 0.25, "radius {radius}");
        }
    }

    // Tests masked cells produce no segments
    // Verified by treating NaN corners as below the level
    #[test]
    fn test_masked_cells_are_skipped() {
        let mut field = Array2::from_shape_fn((5, 6), |(_, c)| c as f64);
        for row in 0..5 {
            if let Some(v) = field.get_mut((row, 2)) {
                *v = f64::NAN;
            }
        }

        assert!(trace_level(&field, 2.5).is_empty());
        assert!(trace_level(&Array2::from_elem((4, 4), f64::NAN), 0.0).is_empty());
    }

    // Tests every requested level is traced in order
    // Verified by tracing only the first level
    #[test]
    fn test_trace_levels_in_order() {
        let field = Array2::from_shape_fn((5, 6), |(_, c)| c as f64);

        let lines = trace_levels(&field, &[1.5, 3.5]);
        let levels: Vec<f64> = lines.iter().map(|l| l.level).collect();

        assert_eq!(levels, vec![1.5, 3.5]);
    }

    // Tests labels go to long lines only and never overlap
    // Verified by placing labels regardless of line length
    #[test]
    fn test_place_labels() {
        let size = |text: &str| (text.len() as f64 * 6.0, 7.0);
        let long = (1.25, vec![(10.0, 50.0), (110.0, 50.0)]);
        let parallel = (1.5, vec![(10.0, 52.0), (110.0, 52.0)]);
        let short = (2.0, vec![(10.0, 90.0), (20.0, 90.0)]);

        let labels = place_labels(&[long, parallel, short], size, 2.0, (0.0, 0.0, 200.0, 200.0));

        assert_eq!(labels.len(), 1);
        let label = labels.first().unwrap_or_else(|| panic!("no label"));
        assert_eq!(label.text, "1.250");
        assert!((label.center.0 - 60.0).abs() < 1e-9);
        assert!(label.contains((60.0, 50.0)));
        assert!(!label.contains((10.0, 50.0)));
    }

    // Tests label text uses three decimals
    // Verified by formatting with the default float display
    #[test]
    fn test_format_level_and_arc_length() {
        assert_eq!(format_level(0.5), "0.500");
        assert_eq!(format_level(-12.0), "-12.000");
        assert!((arc_length(&[(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)]) - 11.0).abs() < 1e-12);
    }
}
