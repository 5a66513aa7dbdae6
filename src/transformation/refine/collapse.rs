use super::SkipReason;
use crate::math::{Point, Point3, Real};
use crate::shape::{planar_point, Face, PolyMesh};
use crate::utils::{polygon_signed_area, SortedPair};
use ordered_float::OrderedFloat;
use smallvec::SmallVec;

/// Collapses the interior edges shorter than `mean edge length × threshold`.
///
/// Candidates are processed from the shortest to the longest. Each collapse
/// merges both endpoints at the edge midpoint and removes the two triangles
/// bordering the edge. An edge touching the boundary is never collapsed, and
/// neither is an edge whose collapse would pinch the mesh (its endpoints share
/// a neighbor that is not the apex of one of its triangles) or flip a
/// triangle. A vertex takes part in at most one collapse per call.
///
/// Fails if the mesh has no face or is not made of triangles only.
pub fn collapse_short_edges(mesh: &PolyMesh, threshold: Real) -> Result<PolyMesh, SkipReason> {
    if mesh.faces.is_empty() {
        return Err(SkipReason::NoFaces);
    }
    if !mesh.is_triangulated() {
        return Err(SkipReason::NotTriangulated);
    }

    let topo = mesh.topology();
    let edges = mesh.edges();
    let mean_length =
        edges.iter().map(|e| mesh.edge_length(*e)).sum::<Real>() / edges.len() as Real;
    let max_length = mean_length * threshold;

    let mut candidates: Vec<(OrderedFloat<Real>, SortedPair<u32>)> = edges
        .iter()
        .filter(|e| {
            !topo.boundary[e.first() as usize]
                && !topo.boundary[e.second() as usize]
                && topo.is_manifold_edge(e.first(), e.second())
        })
        .map(|e| (OrderedFloat(mesh.edge_length(*e)), *e))
        .filter(|(length, _)| length.0 < max_length)
        .collect();
    candidates.sort_unstable();

    let mut state = CollapseState {
        vertices: mesh.vertices.clone(),
        faces: mesh.faces.iter().cloned().map(Some).collect(),
        vertex_faces: topo.vertex_faces.clone(),
    };
    let mut locked = vec![false; mesh.vertices.len()];
    let mut num_collapsed = 0;

    for (_, edge) in candidates {
        let (u, v) = (edge.first(), edge.second());
        if locked[u as usize] || locked[v as usize] {
            continue;
        }

        if state.try_collapse(u, v) {
            locked[u as usize] = true;
            locked[v as usize] = true;
            num_collapsed += 1;
        }
    }

    log::debug!(
        "Collapsed {num_collapsed} edges shorter than {max_length} (mean length {mean_length})."
    );

    let mut result = PolyMesh::new(state.vertices, state.faces.into_iter().flatten().collect());
    let _ = result.remove_unused_vertices();
    Ok(result)
}

struct CollapseState {
    vertices: Vec<Point3<Real>>,
    faces: Vec<Option<Face>>,
    vertex_faces: Vec<SmallVec<[u32; 8]>>,
}

impl CollapseState {
    fn live_faces(&self, vid: u32) -> impl Iterator<Item = (u32, &Face)> + '_ {
        self.vertex_faces[vid as usize]
            .iter()
            .filter_map(move |fid| self.faces[*fid as usize].as_ref().map(|f| (*fid, f)))
    }

    fn neighbors(&self, vid: u32) -> SmallVec<[u32; 8]> {
        let mut result: SmallVec<[u32; 8]> = self
            .live_faces(vid)
            .flat_map(|(_, f)| f.iter().copied())
            .filter(|w| *w != vid)
            .collect();
        result.sort_unstable();
        result.dedup();
        result
    }

    fn try_collapse(&mut self, u: u32, v: u32) -> bool {
        let shared: SmallVec<[u32; 2]> = self
            .live_faces(u)
            .filter(|(_, f)| f.contains(&v))
            .map(|(fid, _)| fid)
            .collect();
        if shared.len() != 2 {
            return false;
        }

        // Link condition: the only common neighbors are the two apexes.
        let mut apexes: SmallVec<[u32; 2]> = shared
            .iter()
            .filter_map(|fid| {
                self.faces[*fid as usize]
                    .as_ref()
                    .and_then(|f| f.iter().copied().find(|w| *w != u && *w != v))
            })
            .collect();
        apexes.sort_unstable();
        let nu = self.neighbors(u);
        let common: SmallVec<[u32; 2]> = self
            .neighbors(v)
            .into_iter()
            .filter(|w| *w != u && nu.contains(w))
            .collect();
        if common != apexes {
            return false;
        }

        let midpoint = na::center(&self.vertices[u as usize], &self.vertices[v as usize]);
        let flips = self
            .live_faces(u)
            .chain(self.live_faces(v))
            .filter(|(_, f)| !(f.contains(&u) && f.contains(&v)))
            .any(|(_, f)| {
                let moved: SmallVec<[Point<Real>; 3]> = f
                    .iter()
                    .map(|w| {
                        if *w == u || *w == v {
                            planar_point(&midpoint)
                        } else {
                            planar_point(&self.vertices[*w as usize])
                        }
                    })
                    .collect();
                polygon_signed_area(&moved) <= 0.0
            });
        if flips {
            return false;
        }

        self.vertices[u as usize] = midpoint;
        for fid in &shared {
            self.faces[*fid as usize] = None;
        }

        let v_faces = std::mem::take(&mut self.vertex_faces[v as usize]);
        for fid in v_faces {
            if let Some(face) = &mut self.faces[fid as usize] {
                for w in face.iter_mut() {
                    if *w == v {
                        *w = u;
                    }
                }
                self.vertex_faces[u as usize].push(fid);
            }
        }

        let faces = &self.faces;
        self.vertex_faces[u as usize].retain(|fid| faces[*fid as usize].is_some());
        self.vertex_faces[u as usize].sort_unstable();
        true
    }
}
