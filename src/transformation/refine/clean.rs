use super::SkipReason;
use crate::math::{Point3, Real};
use crate::shape::{Face, PolyMesh, PolyMeshTopology};
use crate::utils::hashmap::HashSet;
use crate::utils::polygon_self_intersects;
use ena::unify::{InPlaceUnificationTable, UnifyKey};
use smallvec::SmallVec;

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
struct VertexKey(u32);

impl UnifyKey for VertexKey {
    type Value = ();
    fn index(&self) -> u32 {
        self.0
    }
    fn from_index(u: u32) -> VertexKey {
        VertexKey(u)
    }
    fn tag() -> &'static str {
        "VertexKey"
    }
}

/// Removes broken geometry, then dissolves the interior vertices of valence 3 or 4.
///
/// The cleanup runs in three steps:
/// 1. faces none of whose edges is shared by exactly two faces are deleted,
///    along with the vertices they leave unused;
/// 2. faces made only of non-manifold interior vertices are collapsed: the
///    vertices connected through such faces are merged at their centroid, and
///    the faces that became degenerate or duplicated are dropped;
/// 3. every interior vertex with three or four neighbors and a single closed
///    fan of faces is dissolved, its faces being replaced by the polygon
///    bounded by its neighbors. Two dissolved vertices never share a face.
///
/// The outline is left untouched. Fails if the mesh has no face or if the
/// first two steps would delete every face.
pub fn clean_verts(mesh: &PolyMesh) -> Result<PolyMesh, SkipReason> {
    if mesh.faces.is_empty() {
        return Err(SkipReason::NoFaces);
    }

    let mut result = delete_loose_faces(mesh)?;
    result = collapse_non_manifold_faces(&result)?;
    Ok(dissolve_low_valence_verts(&result))
}

fn delete_loose_faces(mesh: &PolyMesh) -> Result<PolyMesh, SkipReason> {
    let topo = mesh.topology();
    let faces: Vec<Face> = mesh
        .faces
        .iter()
        .filter(|f| PolyMesh::face_edges(f).any(|(a, b)| topo.is_manifold_edge(a, b)))
        .cloned()
        .collect();

    if faces.is_empty() {
        return Err(SkipReason::EmptyResult);
    }

    if faces.len() != mesh.faces.len() {
        log::debug!("Deleted {} loose faces.", mesh.faces.len() - faces.len());
    }

    let mut result = PolyMesh::new(mesh.vertices.clone(), faces);
    let _ = result.remove_unused_vertices();
    Ok(result)
}

fn collapse_non_manifold_faces(mesh: &PolyMesh) -> Result<PolyMesh, SkipReason> {
    let topo = mesh.topology();
    let is_flagged = |vid: u32| !topo.boundary[vid as usize] && !topo.is_manifold_vertex(vid);

    let mut ufind: InPlaceUnificationTable<VertexKey> = InPlaceUnificationTable::new();
    let keys: Vec<VertexKey> = (0..mesh.vertices.len()).map(|_| ufind.new_key(())).collect();
    let mut num_flagged_faces = 0;

    for face in &mesh.faces {
        if face.iter().all(|vid| is_flagged(*vid)) {
            num_flagged_faces += 1;
            for (a, b) in PolyMesh::face_edges(face) {
                ufind.union(keys[a as usize], keys[b as usize]);
            }
        }
    }

    if num_flagged_faces == 0 {
        return Ok(mesh.clone());
    }

    // Each group is merged into its smallest vertex index, moved to the group centroid.
    let mut representative: Vec<u32> = (0..mesh.vertices.len() as u32).collect();
    let mut sums = vec![(Point3::<Real>::origin().coords, 0usize); mesh.vertices.len()];
    for (vid, key) in keys.iter().enumerate() {
        let root = ufind.find(*key).0 as usize;
        sums[root].0 += mesh.vertices[vid].coords;
        sums[root].1 += 1;
    }

    let mut vertices = mesh.vertices.clone();
    let mut group_rep = vec![u32::MAX; mesh.vertices.len()];
    for (vid, key) in keys.iter().enumerate() {
        let root = ufind.find(*key).0 as usize;
        if group_rep[root] == u32::MAX {
            group_rep[root] = vid as u32;
            vertices[vid] = Point3::from(sums[root].0 / sums[root].1 as Real);
        }
        representative[vid] = group_rep[root];
    }

    let mut seen = HashSet::default();
    let faces: Vec<Face> = mesh
        .faces
        .iter()
        .filter_map(|face| {
            let mut merged = Face::new();
            for vid in face {
                let rep = representative[*vid as usize];
                if merged.last() != Some(&rep) {
                    merged.push(rep);
                }
            }
            while merged.len() > 1 && merged.first() == merged.last() {
                let _ = merged.pop();
            }

            let mut sorted = merged.clone();
            sorted.sort_unstable();
            sorted.dedup();
            if sorted.len() < 3 || sorted.len() != merged.len() || !seen.insert(sorted) {
                return None;
            }
            Some(merged)
        })
        .collect();

    if faces.is_empty() {
        return Err(SkipReason::EmptyResult);
    }

    log::debug!(
        "Collapsed {num_flagged_faces} faces with only non-manifold vertices, {} faces left.",
        faces.len()
    );

    let mut result = PolyMesh::new(vertices, faces);
    let _ = result.remove_unused_vertices();
    Ok(result)
}

/// Merges the fan of each interior valence-3 or 4 vertex into one face.
///
/// Only an independent set is dissolved per call: the fans of adjacent
/// candidates share faces, and merging both would need the merged ring
/// recomputed. The remaining candidates are left for a later call.
fn dissolve_low_valence_verts(mesh: &PolyMesh) -> PolyMesh {
    let topo = mesh.topology();
    let mut blocked = vec![false; mesh.vertices.len()];
    let mut consumed = vec![false; mesh.faces.len()];
    let mut new_faces = vec![];

    for vid in 0..mesh.vertices.len() as u32 {
        if blocked[vid as usize]
            || topo.boundary[vid as usize]
            || !matches!(topo.valence(vid), 3 | 4)
            || !topo.is_manifold_vertex(vid)
        {
            continue;
        }

        let fan = &topo.vertex_faces[vid as usize];
        if fan.iter().any(|fid| consumed[*fid as usize]) {
            continue;
        }

        let Some(ring) = link_ring(mesh, &topo, vid) else {
            continue;
        };

        for fid in fan {
            consumed[*fid as usize] = true;
        }
        blocked[vid as usize] = true;
        for nbh in &topo.neighbors[vid as usize] {
            blocked[*nbh as usize] = true;
        }
        new_faces.push(ring);
    }

    if new_faces.is_empty() {
        return mesh.clone();
    }

    log::debug!("Dissolved {} low-valence vertices.", new_faces.len());

    let faces = mesh
        .faces
        .iter()
        .zip(consumed.iter())
        .filter(|(_, is_consumed)| !**is_consumed)
        .map(|(f, _)| f.clone())
        .chain(new_faces)
        .collect();
    let mut result = PolyMesh::new(mesh.vertices.clone(), faces);
    let _ = result.remove_unused_vertices();
    result
}

/// The polygon bounded by the neighbors of `vid`, wound like the faces around it.
///
/// Returns `None` if the faces around `vid` do not chain into a single simple
/// counter-clockwise loop.
fn link_ring(mesh: &PolyMesh, topo: &PolyMeshTopology, vid: u32) -> Option<Face> {
    // For each face, the vertices following `vid` up to the one preceding it.
    let chains: SmallVec<[Face; 4]> = topo.vertex_faces[vid as usize]
        .iter()
        .map(|fid| {
            let face = &mesh.faces[*fid as usize];
            let pos = face.iter().position(|w| *w == vid)?;
            Some((1..face.len()).map(|k| face[(pos + k) % face.len()]).collect())
        })
        .collect::<Option<_>>()?;

    let mut used = vec![false; chains.len()];
    let mut ring = Face::new();
    let mut current = 0;
    loop {
        used[current] = true;
        let (end, body) = chains[current].split_last()?;
        let end = *end;
        ring.extend(body.iter().copied());

        match (0..chains.len()).find(|i| !used[*i] && chains[*i].first() == Some(&end)) {
            Some(next) => current = next,
            None if ring.first() == Some(&end) && used.iter().all(|u| *u) => break,
            None => return None,
        }
    }

    let mut sorted = ring.clone();
    sorted.sort_unstable();
    sorted.dedup();
    if ring.len() < 3 || sorted.len() != ring.len() {
        return None;
    }

    let planar = mesh.planar_face(&ring);
    if mesh.face_signed_area(&ring) <= 0.0 || polygon_self_intersects(&planar) {
        return None;
    }

    Some(ring)
}
