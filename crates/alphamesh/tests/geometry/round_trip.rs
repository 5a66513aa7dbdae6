use super::common::rgba;
use alphamesh::math::{Real, INCHES_PER_METER};
use alphamesh::transformation::Resolution;
use alphamesh::{convert, ConvertOptions, RasterImage};
use std::collections::BTreeSet;

#[test]
fn opaque_square_at_300_dpi() {
    let pixels = rgba(10, 10, |_, _| true);
    let image = RasterImage {
        pixels: &pixels,
        width: 10,
        height: 10,
        resolution: Resolution::uniform(300.0),
        name: "square",
    };
    let result = convert(&image, &ConvertOptions::default()).unwrap();

    assert!(!result.is_degraded());
    assert_eq!(result.outline.len(), 4);
    assert_relative_eq!(result.outline.signed_area(), 100.0);

    let mesh = &result.mesh;
    let boundary_vertices: BTreeSet<u32> = mesh
        .boundary_edges()
        .iter()
        .flat_map(|e| e.iter().copied())
        .collect();
    assert_eq!(boundary_vertices.len(), 4);
    assert_eq!(mesh.faces().len(), 2);
    assert!(mesh.is_consistently_oriented());
    assert!(mesh.is_edge_manifold());

    // Undo the physical scaling to measure the area in pixels.
    let scale = 10.0 / (300.0 / INCHES_PER_METER);
    let area_px = mesh.planar_area() / (scale * scale) * 100.0;
    assert_relative_eq!(area_px, 100.0, epsilon = 1.0e-3);

    assert_eq!(result.uvs.len(), 2);
    for uv in result.uvs.iter().flatten() {
        assert!(
            [0.0, 1.0].iter().any(|c: &Real| relative_eq!(uv.x, *c))
                && [0.0, 1.0].iter().any(|c: &Real| relative_eq!(uv.y, *c)),
            "unexpected uv {uv:?}"
        );
    }

    assert_eq!(result.image.name, "square");
    assert_eq!((result.image.width, result.image.height), (10, 10));
}

#[test]
fn refined_square_keeps_its_outline() {
    let pixels = rgba(16, 16, |_, _| true);
    let image = RasterImage {
        pixels: &pixels,
        width: 16,
        height: 16,
        resolution: Resolution::uniform(96.0),
        name: "square",
    };
    let options = ConvertOptions {
        subdivide: true,
        ..Default::default()
    };
    let result = convert(&image, &options).unwrap();

    assert!(result.mesh.is_edge_manifold());
    assert_eq!(result.mesh.boundary_edges().len(), 4);
    assert_eq!(result.uvs.len(), result.mesh.faces().len());
}

#[test]
fn refined_notched_disk_has_no_folded_triangles() {
    // A disk with a wedge cut out of its right side.
    let pixels = rgba(48, 48, |row, col| {
        let dx = col as Real + 0.5 - 24.0;
        let dy = row as Real + 0.5 - 24.0;
        dx * dx + dy * dy < 20.0 * 20.0 && !(dx > 0.0 && dy.abs() < dx * 0.5)
    });
    let image = RasterImage {
        pixels: &pixels,
        width: 48,
        height: 48,
        resolution: Resolution::uniform(72.0),
        name: "notched",
    };
    let options = ConvertOptions {
        subdivide: true,
        ..Default::default()
    };
    let base = convert(&image, &ConvertOptions::default()).unwrap();
    let refined = convert(&image, &options).unwrap();

    assert!(!base.mesh.is_outline_only());
    assert!(refined.mesh.is_edge_manifold());
    assert!(refined.mesh.is_consistently_oriented());
    assert!(!refined.mesh.is_outline_only());
    assert_relative_eq!(
        refined.mesh.planar_area(),
        base.mesh.planar_area(),
        max_relative = 1.0e-4
    );
}
