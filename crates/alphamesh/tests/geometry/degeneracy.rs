use super::common::rgba;
use alphamesh::math::Point;
use alphamesh::shape::Polygon;
use alphamesh::transformation::{triangulate_outline, DegeneracyReason, Resolution};
use alphamesh::{convert, ConversionError, ConvertOptions, RasterImage};

#[test]
fn self_intersecting_outline_keeps_only_the_outline() {
    let bowtie = Polygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(4.0, 4.0),
        Point::new(4.0, 0.0),
        Point::new(0.0, 4.0),
    ]);
    let result = triangulate_outline(&bowtie, 4, 4);

    assert_eq!(result.degeneracy, Some(DegeneracyReason::SelfIntersecting));
    assert!(result.mesh.is_outline_only());
    assert_eq!(result.mesh.vertices().len(), 4);
    assert_eq!(result.mesh.edges().len(), 4);
}

#[test]
fn duplicate_points_keep_only_the_outline() {
    let polygon = Polygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(0.0, 4.0),
    ]);
    let result = triangulate_outline(&polygon, 4, 4);
    assert!(result.is_degenerate());
    assert!(result.mesh.is_outline_only());
}

#[test]
fn transparent_image_is_an_error() {
    let pixels = rgba(5, 5, |_, _| false);
    let image = RasterImage {
        pixels: &pixels,
        width: 5,
        height: 5,
        resolution: Resolution::uniform(72.0),
        name: "empty",
    };
    assert_eq!(
        convert(&image, &ConvertOptions::default()),
        Err(ConversionError::EmptyContour)
    );
}

#[test]
fn bad_tolerance_is_an_error() {
    let pixels = rgba(5, 5, |_, _| true);
    let image = RasterImage {
        pixels: &pixels,
        width: 5,
        height: 5,
        resolution: Resolution::uniform(72.0),
        name: "opaque",
    };

    for tolerance in [0.0, -1.5] {
        let options = ConvertOptions {
            simplify_tolerance: tolerance,
            ..Default::default()
        };
        assert_eq!(
            convert(&image, &options),
            Err(ConversionError::InvalidTolerance(tolerance))
        );
    }
}
