use super::SkipReason;
use crate::math::{Point3, Real, Vector3};
use crate::shape::PolyMesh;
use smallvec::SmallVec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Laplacian relaxation of the interior vertices.
///
/// Each iteration moves every interior vertex toward the centroid of its edge
/// neighbors by `factor` (`1.0` moves it onto the centroid). All the new
/// positions of an iteration are computed from the previous iteration's
/// positions, so the result does not depend on the vertex order. Vertices on
/// a boundary edge never move and the connectivity is left untouched.
///
/// Fails if the mesh has no face or no boundary edge.
pub fn smooth_verts(
    mesh: &PolyMesh,
    iterations: usize,
    factor: Real,
) -> Result<PolyMesh, SkipReason> {
    if mesh.faces.is_empty() {
        return Err(SkipReason::NoFaces);
    }

    let topo = mesh.topology();
    if !topo.boundary.iter().any(|b| *b) {
        return Err(SkipReason::NoBoundary);
    }

    let movable: Vec<u32> = (0..mesh.vertices.len() as u32)
        .filter(|i| !topo.boundary[*i as usize] && !topo.neighbors[*i as usize].is_empty())
        .collect();

    let mut positions = mesh.vertices.clone();
    for _ in 0..iterations {
        let relaxed = relax(&positions, &movable, &topo.neighbors, factor);
        for (vid, pt) in movable.iter().zip(relaxed) {
            positions[*vid as usize] = pt;
        }
    }

    Ok(PolyMesh::new(positions, mesh.faces.clone()))
}

fn relaxed_position(
    positions: &[Point3<Real>],
    vid: u32,
    neighbors: &[u32],
    factor: Real,
) -> Point3<Real> {
    let pt = positions[vid as usize];
    let centroid = neighbors
        .iter()
        .map(|n| positions[*n as usize].coords)
        .sum::<Vector3<Real>>()
        / neighbors.len() as Real;
    pt + (centroid - pt.coords) * factor
}

#[cfg(not(feature = "parallel"))]
fn relax(
    positions: &[Point3<Real>],
    movable: &[u32],
    neighbors: &[SmallVec<[u32; 8]>],
    factor: Real,
) -> Vec<Point3<Real>> {
    movable
        .iter()
        .map(|vid| relaxed_position(positions, *vid, &neighbors[*vid as usize], factor))
        .collect()
}

#[cfg(feature = "parallel")]
fn relax(
    positions: &[Point3<Real>],
    movable: &[u32],
    neighbors: &[SmallVec<[u32; 8]>],
    factor: Real,
) -> Vec<Point3<Real>> {
    movable
        .par_iter()
        .map(|vid| relaxed_position(positions, *vid, &neighbors[*vid as usize], factor))
        .collect()
}
