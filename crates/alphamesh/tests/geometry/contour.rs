use super::common::random_blob;
use alphamesh::math::Real;
use alphamesh::shape::OccupancyGrid;
use alphamesh::transformation::{simplify_polygon, trace_contour, triangulate_outline};
use oorandom::Rand32;

#[test]
fn rectangles_follow_the_pixel_cracks() {
    for (w, h) in [(1, 1), (3, 1), (4, 7), (10, 10)] {
        let grid = OccupancyGrid::from_mask(&vec![true; w * h], w, h).unwrap();
        let contour = trace_contour(&grid).unwrap();

        assert_eq!(contour.len(), 4 * (w + h));
        assert_relative_eq!(contour.signed_area(), (w * h) as Real);
        assert!(!contour.is_self_intersecting());
    }
}

#[test]
fn random_blobs_stay_inside_the_image() {
    let mut rng = Rand32::new(42);

    for _ in 0..20 {
        let grid = random_blob(&mut rng, 24);
        assert!(grid.border_is_empty());

        let contour = trace_contour(&grid).unwrap();
        assert!(contour.is_ccw());
        assert!(!contour.is_self_intersecting());
        for pt in contour.points() {
            assert!(pt.x >= 0.0 && pt.x <= 24.0 && pt.y >= 0.0 && pt.y <= 24.0);
        }

        // Pixels only touching the blob diagonally form separate regions.
        assert!(contour.signed_area() > 0.0);
        assert!(contour.signed_area() <= grid.occupied_count() as Real);
    }
}

#[test]
fn simplified_blobs_are_ordered_subsets() {
    let mut rng = Rand32::new(1234);

    for _ in 0..20 {
        let contour = trace_contour(&random_blob(&mut rng, 32)).unwrap();
        let simplified = simplify_polygon(&contour, 1.5).unwrap();

        assert!(simplified.len() >= 3);
        assert!(simplified.len() < contour.len());

        let mut source = contour.points().iter().cycle().skip_while(|pt| **pt != simplified.points()[0]);
        for pt in simplified.points() {
            assert!(source.any(|candidate| candidate == pt));
        }

        assert_eq!(simplify_polygon(&simplified, 1.5).unwrap(), simplified);
    }
}

#[test]
fn convex_outline_has_n_minus_two_triangles() {
    let mut mask = vec![false; 12 * 12];
    for row in 2..10 {
        for col in 3..9 {
            mask[row * 12 + col] = true;
        }
    }
    let grid = OccupancyGrid::from_mask(&mask, 12, 12).unwrap();
    let outline = simplify_polygon(&trace_contour(&grid).unwrap(), 1.5).unwrap();
    let triangulation = triangulate_outline(&outline, 12, 12);

    assert!(!triangulation.is_degenerate());
    assert_eq!(triangulation.mesh.faces().len(), outline.len() - 2);
    assert!(triangulation.mesh.is_consistently_oriented());
}
