use super::SkipReason;
use crate::math::Real;
use crate::shape::{Face, PolyMesh};
use crate::utils::hashmap::HashMap;
use crate::utils::SortedPair;

/// Splits every interior edge into pieces about as long as the shortest edge.
///
/// An interior edge of length `l` is cut into `floor(l / l_min)` equal
/// segments, where `l_min` is the length of the shortest edge of the mesh. The
/// new vertices are inserted into the loops of both adjacent faces, which thus
/// become n-gons. Boundary edges are never split so the outline is preserved.
///
/// Fails if the mesh has no face or a zero-length edge.
pub fn average_edge_subdivide(mesh: &PolyMesh) -> Result<PolyMesh, SkipReason> {
    if mesh.faces.is_empty() {
        return Err(SkipReason::NoFaces);
    }

    let topo = mesh.topology();
    let edges = mesh.edges();
    let lengths: Vec<Real> = edges.iter().map(|e| mesh.edge_length(*e)).collect();
    let min_length = lengths.iter().copied().fold(Real::MAX, Real::min);
    let mean_length = lengths.iter().sum::<Real>() / lengths.len() as Real;

    if !(min_length > 0.0) {
        return Err(SkipReason::ZeroLengthEdge);
    }

    log::debug!("Edge lengths before subdivision: mean {mean_length}, min {min_length}.");

    let mut result = mesh.clone();
    let mut cuts: HashMap<SortedPair<u32>, Vec<u32>> = HashMap::default();

    for (edge, length) in edges.iter().zip(lengths.iter()) {
        if !topo.is_manifold_edge(edge.first(), edge.second()) {
            continue;
        }

        let segments = (length / min_length).floor() as usize;
        if segments < 2 {
            continue;
        }

        let a = mesh.vertices[edge.first() as usize];
        let b = mesh.vertices[edge.second() as usize];
        let inserted = (1..segments)
            .map(|k| {
                let t = k as Real / segments as Real;
                result.vertices.push(a + (b - a) * t);
                (result.vertices.len() - 1) as u32
            })
            .collect();
        let _ = cuts.insert(*edge, inserted);
    }

    if cuts.is_empty() {
        return Ok(result);
    }

    // Inserted vertices are ordered from the edge's smallest index to its largest.
    result.faces = mesh
        .faces
        .iter()
        .map(|face| {
            let mut new_face = Face::new();
            for (a, b) in PolyMesh::face_edges(face) {
                new_face.push(a);
                if let Some(inserted) = cuts.get(&SortedPair::new(a, b)) {
                    if a < b {
                        new_face.extend(inserted.iter().copied());
                    } else {
                        new_face.extend(inserted.iter().rev().copied());
                    }
                }
            }
            new_face
        })
        .collect();

    log::debug!(
        "Subdivided {} edges, adding {} vertices.",
        cuts.len(),
        result.vertices.len() - mesh.vertices.len()
    );

    Ok(result)
}
