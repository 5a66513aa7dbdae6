use super::common::random_blob;
use alphamesh::math::Real;
use alphamesh::shape::{planar_point, Mesh, PolyMesh};
use alphamesh::transformation::refine::{apply_pass, refine, RefineOptions, REFINE_RECIPE};
use alphamesh::transformation::{simplify_polygon, trace_contour, triangulate_outline};
use oorandom::Rand32;

fn blob_meshes(seed: u64, count: usize) -> Vec<Mesh> {
    let mut rng = Rand32::new(seed);
    (0..count)
        .filter_map(|_| {
            let contour = trace_contour(&random_blob(&mut rng, 40)).ok()?;
            let outline = simplify_polygon(&contour, 1.5).ok()?;
            let triangulation = triangulate_outline(&outline, 40, 40);
            (!triangulation.is_degenerate()).then_some(triangulation.mesh)
        })
        .collect()
}

fn boundary_points(mesh: &PolyMesh) -> Vec<(Real, Real)> {
    let topo = mesh.topology();
    let mut points: Vec<_> = topo
        .edge_faces
        .iter()
        .filter(|(_, faces)| faces.len() == 1)
        .flat_map(|(edge, _)| edge.iter().copied())
        .map(|vid| {
            let pt = planar_point(&mesh.vertices[vid as usize]);
            (pt.x, pt.y)
        })
        .collect();
    points.sort_by(|a, b| a.partial_cmp(b).unwrap());
    points
}

#[test]
fn every_pass_keeps_the_outline_and_manifoldness() {
    let options = RefineOptions::default();
    let meshes = blob_meshes(7, 10);
    assert!(!meshes.is_empty());

    for mesh in meshes {
        let mut current = PolyMesh::from(&mesh);
        let outline = boundary_points(&current);

        for pass in REFINE_RECIPE {
            if let Ok(next) = apply_pass(pass, &current, &options) {
                current = next;
            }

            let topo = current.topology();
            assert!(
                topo.edge_faces.values().all(|f| f.len() == 1 || f.len() == 2),
                "{pass} broke manifoldness"
            );
            assert_eq!(boundary_points(&current), outline, "{pass} changed the outline");
        }

        assert!(current.is_triangulated());
    }
}

#[test]
fn refinement_preserves_the_area() {
    for mesh in blob_meshes(99, 5) {
        let refined = refine(&mesh, &RefineOptions::default());
        assert!(refined.mesh.is_edge_manifold());
        // A folded triangle would leave the signed area unchanged.
        assert!(refined.mesh.is_consistently_oriented());
        assert_relative_eq!(
            refined.mesh.planar_area(),
            mesh.planar_area(),
            max_relative = 1.0e-4
        );
    }
}

#[test]
fn smoothing_parameters_are_honored() {
    let meshes = blob_meshes(3, 4);
    let mesh = &meshes[0];
    let options = RefineOptions {
        smooth_iterations: 0,
        ..Default::default()
    };
    let unsmoothed = refine(mesh, &options);
    let smoothed = refine(mesh, &RefineOptions::default());
    assert!(unsmoothed.mesh.is_edge_manifold());
    assert_ne!(unsmoothed.mesh, smoothed.mesh);
}
