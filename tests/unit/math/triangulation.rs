//! Tests for Delaunay triangulation and natural-neighbour interpolation

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use scatter_contour::PlotError;
    use scatter_contour::math::triangulation::Triangulation;
    use scatter_contour::spatial::grid::{Bounds, Grid};

    fn plane(x: f64, y: f64) -> f64 {
        2.0f64.mul_add(x, 3.0 * y) + 1.0
    }

    // Tests a unit square splits into two triangles
    // Verified by counting the outer face as a triangle
    #[test]
    fn test_square_has_two_triangles() {
        let tri = Triangulation::new(
            &[0.0, 1.0, 0.0, 1.0],
            &[0.0, 0.0, 1.0, 1.0],
            &[1.0, 2.0, 3.0, 4.0],
        )
        .unwrap_or_else(|e| panic!("triangulation failed: {e}"));

        assert_eq!(tri.vertex_count(), 4);
        assert_eq!(tri.triangle_count(), 2);
    }

    // Tests the interpolant reproduces a plane inside the hull
    // Verified by using nearest-vertex values instead of Sibson weights
    #[test]
    fn test_interpolation_reproduces_plane() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut x: Vec<f64> = vec![0.0, 10.0, 0.0, 10.0];
        let mut y: Vec<f64> = vec![0.0, 0.0, 10.0, 10.0];
        for _ in 0..30 {
            x.push(rng.random_range(0.5..9.5));
            y.push(rng.random_range(0.5..9.5));
        }
        let z: Vec<f64> = x.iter().zip(&y).map(|(&a, &b)| plane(a, b)).collect();
        let tri = Triangulation::new(&x, &y, &z)
            .unwrap_or_else(|e| panic!("triangulation failed: {e}"));

        let bounds = Bounds::of(&x, &y).unwrap_or_else(|| panic!("no bounds"));
        let grid = Grid::new(bounds, 50, 50);
        let field = tri.interpolate_grid(&grid);

        let mut checked = 0;
        for ((row, col), value) in field.indexed_iter() {
            let (Some(&px), Some(&py)) = (grid.xs().get(col), grid.ys().get(row)) else {
                continue;
            };
            if value.is_nan() {
                continue;
            }
            checked += 1;
            assert!(
                (value - plane(px, py)).abs() < 1e-8,
                "at ({px}, {py}): {value}"
            );
        }
        assert!(checked >= 48 * 48);
    }

    // Tests a vertex outside the enclosing triangle still contributes
    // Verified by falling back to barycentric weights on one triangle
    #[test]
    fn test_interpolation_uses_natural_neighbours() {
        // Flat rhombus split along the short diagonal: the query lies in the
        // right triangle but inside the circumcircle of the left one
        let x = [0.0, 4.0, 2.0, 2.0];
        let y = [0.0, 0.0, 1.0, -1.0];
        let z = [8.0, 0.0, 0.0, 0.0];
        let tri = Triangulation::new(&x, &y, &z)
            .unwrap_or_else(|e| panic!("triangulation failed: {e}"));

        assert!(tri.interpolate(0.0, 0.0).is_some_and(|v| (v - 8.0).abs() < 1e-9));

        let value = tri.interpolate(2.2, 0.1).unwrap_or(f64::NAN);
        assert!(value > 1e-6 && value < 8.0, "value {value}");
    }

    // Tests nodes outside the convex hull are masked
    // Verified by extrapolating from the nearest triangle
    #[test]
    fn test_outside_hull_is_masked() {
        let x = [0.0, 1.0, 0.0];
        let y = [0.0, 0.0, 1.0];
        let z = [1.0, 2.0, 3.0];
        let tri = Triangulation::new(&x, &y, &z)
            .unwrap_or_else(|e| panic!("triangulation failed: {e}"));

        assert!(tri.interpolate(0.9, 0.9).is_none());
        assert!(tri.interpolate(0.25, 0.25).is_some());

        let bounds = Bounds::of(&x, &y).unwrap_or_else(|| panic!("no bounds"));
        let field = tri.interpolate_grid(&Grid::new(bounds, 200, 200));
        assert!(field.get((199, 199)).is_some_and(|v| v.is_nan()));
        assert!(field.get((0, 0)).is_some_and(|v| (v - 1.0).abs() < 1e-12));
    }

    // Tests duplicates are merged and degenerate sets rejected
    // Verified by letting the last duplicate supply the value
    #[test]
    fn test_degenerate_inputs() {
        let duplicated = Triangulation::new(
            &[0.0, 0.0, 1.0, 0.0],
            &[0.0, 0.0, 0.0, 1.0],
            &[1.0, 9.0, 2.0, 3.0],
        )
        .unwrap_or_else(|e| panic!("triangulation failed: {e}"));
        assert_eq!(duplicated.vertex_count(), 3);
        assert!(
            duplicated
                .interpolate(0.0, 0.0)
                .is_some_and(|v| (v - 1.0).abs() < 1e-12)
        );

        let collinear =
            Triangulation::new(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 2.0, 3.0], &[1.0; 4]);
        assert!(matches!(collinear, Err(PlotError::Computation { .. })));

        assert!(Triangulation::new(&[0.0, 1.0], &[0.0, 1.0], &[1.0, 2.0]).is_err());
    }
}
