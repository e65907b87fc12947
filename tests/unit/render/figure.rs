//! Tests for axes, layout and the cropped figure output

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use scatter_contour::PlotError;
    use scatter_contour::render::colormap::{ColorScale, Colormap};
    use scatter_contour::render::figure::{
        Aspect, Axis, AxisScale, Figure, TickLabel, crop_to_content,
    };
    use scatter_contour::render::canvas::font_scale;
    use scatter_contour::spatial::grid::Extent;

    fn extent(min: f64, max: f64) -> Extent {
        Extent { min, max }
    }

    // Tests a power label adds a raised exponent to its base
    // Verified by sizing powers as their base text only
    #[test]
    fn test_power_label_size() {
        let scale = font_scale(12.0);
        let (plain_w, plain_h) = TickLabel::Plain("10".to_string()).size(scale);
        let (power_w, power_h) = TickLabel::Power(3).size(scale);

        assert!(power_w > plain_w);
        assert!(power_h > plain_h);
    }

    // Tests linear fractions and widening of zero-width ranges
    // Verified by dividing by the zero span
    #[test]
    fn test_linear_axis() {
        let axis = Axis::linear(extent(2.0, 6.0));
        assert_eq!(axis.scale(), AxisScale::Linear);
        assert_eq!(axis.fraction(4.0), Some(0.5));
        assert_eq!(axis.fraction(f64::NAN), None);

        let flat = Axis::linear(extent(3.0, 3.0));
        assert!(flat.min() < 3.0 && flat.max() > 3.0);
        assert!(flat.fraction(3.0).is_some_and(|f| (f - 0.5).abs() < 1e-9));
    }

    // Tests log axes start at the smallest positive value
    // Verified by keeping the non-positive lower bound
    #[test]
    fn test_log_axis_uses_positive_part() {
        let axis = Axis::log(&[-1.0, 0.0, 0.5, 50.0])
            .unwrap_or_else(|e| panic!("log axis failed: {e}"));

        assert_eq!(axis.scale(), AxisScale::Log);
        assert!((axis.min() - 0.5).abs() < 1e-12);
        assert!((axis.max() - 50.0).abs() < 1e-9);
        assert!((axis.transformed_span() - 2.0).abs() < 1e-9);
        assert_eq!(axis.fraction(-3.0), None);
        assert!(axis.fraction(5.0).is_some_and(|f| (f - 0.5).abs() < 1e-9));
    }

    // Tests an axis without positive values cannot be logarithmic
    // Verified by clamping non-positive values to a tiny epsilon
    #[test]
    fn test_log_axis_without_positive_values() {
        assert!(matches!(
            Axis::log(&[-3.0, -1.0, 0.0]),
            Err(PlotError::Computation { .. })
        ));
    }

    // Tests decade ticks are labelled as powers of ten
    // Verified by labelling every log tick as a plain number
    #[test]
    fn test_log_ticks_and_minor_ticks() {
        let axis = Axis::log(&[1.0, 1000.0]).unwrap_or_else(|e| panic!("log axis failed: {e}"));

        let labels: Vec<TickLabel> = axis.ticks().into_iter().map(|t| t.label).collect();
        assert_eq!(
            labels,
            vec![
                TickLabel::Power(0),
                TickLabel::Power(1),
                TickLabel::Power(2),
                TickLabel::Power(3)
            ]
        );
        assert_eq!(axis.minor_ticks().len(), 24);
    }

    // Tests linear ticks stay within the axis range
    // Verified by keeping ticks outside the limits
    #[test]
    fn test_linear_ticks_inside_range() {
        let axis = Axis::linear(extent(0.13, 0.97));
        let ticks = axis.ticks();

        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|t| t.value >= 0.13 && t.value <= 0.97));
    }

    // Tests equal aspect gives one decade the same length on both axes
    // Verified by skipping the aspect adjustment
    #[test]
    fn test_equal_aspect_layout() {
        let x_axis = Axis::log(&[1.0, 1000.0]).unwrap_or_else(|e| panic!("log axis failed: {e}"));
        let y_axis = Axis::log(&[1.0, 10.0]).unwrap_or_else(|e| panic!("log axis failed: {e}"));
        let figure = Figure::new(
            x_axis,
            y_axis,
            Aspect::Equal,
            ColorScale::new(0.0, 1.0, Colormap::Rainbow),
        );

        let axes = figure.axes_rect();
        assert!((axes.width() / axes.height() - 3.0).abs() < 1e-9);

        let colorbar = figure.colorbar_rect();
        assert!(colorbar.left > axes.right);
        assert!((colorbar.height() - axes.height()).abs() < 1e-9);
    }

    // Tests data corners land on the axes box corners
    // Verified by flipping the y direction
    #[test]
    fn test_to_pixel_maps_corners() {
        let figure = Figure::new(
            Axis::linear(extent(0.0, 1.0)),
            Axis::linear(extent(0.0, 2.0)),
            Aspect::Auto,
            ColorScale::new(0.0, 1.0, Colormap::Jet),
        );
        let axes = figure.axes_rect();

        let lower_left = figure.to_pixel(0.0, 0.0).unwrap_or_else(|| panic!("unmapped"));
        let upper_right = figure.to_pixel(1.0, 2.0).unwrap_or_else(|| panic!("unmapped"));
        assert!((lower_left.0 - axes.left).abs() < 1e-9);
        assert!((lower_left.1 - axes.bottom).abs() < 1e-9);
        assert!((upper_right.0 - axes.right).abs() < 1e-9);
        assert!((upper_right.1 - axes.top).abs() < 1e-9);
    }

    // Tests finishing crops the canvas to the drawn content
    // Verified by returning the full canvas
    #[test]
    fn test_finish_crops_with_transparent_margin() {
        let mut figure = Figure::new(
            Axis::linear(extent(0.0, 1.0)),
            Axis::linear(extent(0.0, 1.0)),
            Aspect::Auto,
            ColorScale::new(0.0, 1.0, Colormap::Jet),
        );

        let image = figure.finish();
        let opaque_in_column = |x: u32| {
            (0..image.height()).any(|y| image.get_pixel(x, y).0.get(3).is_some_and(|&a| a > 0))
        };
        let opaque_in_row = |y: u32| {
            (0..image.width()).any(|x| image.get_pixel(x, y).0.get(3).is_some_and(|&a| a > 0))
        };

        assert!(image.width() < 1600 && image.height() < 1200);
        assert_eq!(image.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
        assert!(!opaque_in_column(19) && opaque_in_column(20));
        assert!(!opaque_in_row(19) && opaque_in_row(20));
        assert!(opaque_in_column(image.width() - 21) && !opaque_in_column(image.width() - 20));
    }

    // Tests cropping keeps content and adds the padding
    // Verified by omitting the padding
    #[test]
    fn test_crop_to_content() {
        let mut image = RgbaImage::from_pixel(50, 40, Rgba([0, 0, 0, 0]));
        image.put_pixel(10, 12, Rgba([1, 2, 3, 255]));
        image.put_pixel(14, 20, Rgba([4, 5, 6, 255]));

        let cropped = crop_to_content(&image, 3);

        assert_eq!(cropped.dimensions(), (5 + 6, 9 + 6));
        assert_eq!(cropped.get_pixel(3, 3), &Rgba([1, 2, 3, 255]));
        assert_eq!(cropped.get_pixel(7, 11), &Rgba([4, 5, 6, 255]));

        let empty = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
        assert_eq!(crop_to_content(&empty, 3).dimensions(), (4, 4));
    }
}
