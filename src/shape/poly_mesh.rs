use crate::math::{Point, Point3, Real};
use crate::shape::{planar_point, Mesh};
use crate::utils::hashmap::HashMap;
use crate::utils::{polygon_signed_area, SortedPair};
use smallvec::SmallVec;

/// A polygonal face: vertex indices in counter-clockwise order.
pub type Face = SmallVec<[u32; 4]>;

/// A planar polygon mesh, the working state of the refinement passes.
///
/// Unlike [`Mesh`], faces may have more than three vertices: edge subdivision
/// and vertex dissolution produce n-gons that are triangulated later on.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PolyMesh {
    /// The vertex positions.
    pub vertices: Vec<Point3<Real>>,
    /// The faces, as loops of vertex indices.
    pub faces: Vec<Face>,
}

impl From<&Mesh> for PolyMesh {
    fn from(mesh: &Mesh) -> Self {
        Self {
            vertices: mesh.vertices().to_vec(),
            faces: mesh.faces().iter().map(|f| Face::from_slice(f)).collect(),
        }
    }
}

impl PolyMesh {
    /// Builds a polygon mesh from its vertices and faces.
    pub fn new(vertices: Vec<Point3<Real>>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Iterates through the directed edges of a face.
    pub fn face_edges(face: &[u32]) -> impl Iterator<Item = (u32, u32)> + '_ {
        face.iter()
            .zip(face.iter().cycle().skip(1))
            .map(|(a, b)| (*a, *b))
    }

    /// The sorted list of undirected edges of every face.
    pub fn edges(&self) -> Vec<SortedPair<u32>> {
        let mut edges: Vec<_> = self
            .faces
            .iter()
            .flat_map(|f| Self::face_edges(f).map(|(a, b)| SortedPair::new(a, b)))
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges
    }

    /// The length of the given edge.
    pub fn edge_length(&self, edge: SortedPair<u32>) -> Real {
        na::distance(
            &self.vertices[edge.first() as usize],
            &self.vertices[edge.second() as usize],
        )
    }

    /// The projection of a face onto the `(x, z)` plane.
    pub fn planar_face(&self, face: &[u32]) -> Vec<Point<Real>> {
        face.iter()
            .map(|i| planar_point(&self.vertices[*i as usize]))
            .collect()
    }

    /// The signed area of a face in the `(x, z)` plane.
    pub fn face_signed_area(&self, face: &[u32]) -> Real {
        polygon_signed_area(&self.planar_face(face))
    }

    /// Are all the faces triangles?
    pub fn is_triangulated(&self) -> bool {
        self.faces.iter().all(|f| f.len() == 3)
    }

    /// Is every edge bordered by at most two faces?
    pub fn is_edge_manifold(&self) -> bool {
        self.topology().edge_faces.values().all(|f| f.len() <= 2)
    }

    /// Computes the adjacency information of this mesh.
    pub fn topology(&self) -> PolyMeshTopology {
        PolyMeshTopology::new(self)
    }

    /// Removes the vertices that are not referenced by any face, remapping the faces.
    ///
    /// Returns the old-to-new index map (`u32::MAX` for removed vertices).
    pub fn remove_unused_vertices(&mut self) -> Vec<u32> {
        let mut used = vec![false; self.vertices.len()];
        for i in self.faces.iter().flatten() {
            used[*i as usize] = true;
        }

        let mut remap = vec![u32::MAX; self.vertices.len()];
        let mut new_vertices = Vec::with_capacity(self.vertices.len());
        for (i, pt) in self.vertices.iter().enumerate() {
            if used[i] {
                remap[i] = new_vertices.len() as u32;
                new_vertices.push(*pt);
            }
        }

        for face in &mut self.faces {
            for i in face.iter_mut() {
                *i = remap[*i as usize];
            }
        }
        self.vertices = new_vertices;
        remap
    }

    /// Converts this polygon mesh into a triangle mesh.
    ///
    /// Returns `None` if a face is not a triangle.
    pub fn to_mesh(&self) -> Option<Mesh> {
        let faces = self
            .faces
            .iter()
            .map(|f| match f.as_slice() {
                [a, b, c] => Some([*a, *b, *c]),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Mesh::new(self.vertices.clone(), faces))
    }
}

/// Adjacency information of a [`PolyMesh`], computed once per pass.
#[derive(Clone, Debug, Default)]
pub struct PolyMeshTopology {
    /// For each undirected edge, the faces it borders.
    pub edge_faces: HashMap<SortedPair<u32>, SmallVec<[u32; 2]>>,
    /// For each vertex, its neighbors along an edge, sorted.
    pub neighbors: Vec<SmallVec<[u32; 8]>>,
    /// For each vertex, the faces containing it, sorted.
    pub vertex_faces: Vec<SmallVec<[u32; 8]>>,
    /// For each vertex, does it lie on an edge bordering exactly one face?
    pub boundary: Vec<bool>,
}

impl PolyMeshTopology {
    /// Computes the adjacency information of `mesh`.
    pub fn new(mesh: &PolyMesh) -> Self {
        let num_vertices = mesh.vertices.len();
        let mut edge_faces: HashMap<SortedPair<u32>, SmallVec<[u32; 2]>> = HashMap::default();
        let mut neighbors = vec![SmallVec::<[u32; 8]>::new(); num_vertices];
        let mut vertex_faces = vec![SmallVec::<[u32; 8]>::new(); num_vertices];

        for (fid, face) in mesh.faces.iter().enumerate() {
            for (a, b) in PolyMesh::face_edges(face) {
                edge_faces
                    .entry(SortedPair::new(a, b))
                    .or_default()
                    .push(fid as u32);
                neighbors[a as usize].push(b);
                neighbors[b as usize].push(a);
                vertex_faces[a as usize].push(fid as u32);
            }
        }

        for list in neighbors.iter_mut().chain(vertex_faces.iter_mut()) {
            list.sort_unstable();
            list.dedup();
        }

        let mut boundary = vec![false; num_vertices];
        for (edge, faces) in &edge_faces {
            if faces.len() == 1 {
                boundary[edge.first() as usize] = true;
                boundary[edge.second() as usize] = true;
            }
        }

        Self {
            edge_faces,
            neighbors,
            vertex_faces,
            boundary,
        }
    }

    /// The number of faces bordered by the given edge.
    pub fn edge_face_count(&self, a: u32, b: u32) -> usize {
        self.edge_faces
            .get(&SortedPair::new(a, b))
            .map(|f| f.len())
            .unwrap_or(0)
    }

    /// Is the given edge bordered by exactly two faces?
    pub fn is_manifold_edge(&self, a: u32, b: u32) -> bool {
        self.edge_face_count(a, b) == 2
    }

    /// Is the given edge bordered by exactly one face?
    pub fn is_boundary_edge(&self, a: u32, b: u32) -> bool {
        self.edge_face_count(a, b) == 1
    }

    /// The number of edges connected to the given vertex.
    pub fn valence(&self, vid: u32) -> usize {
        self.neighbors[vid as usize].len()
    }

    /// Is the neighborhood of this vertex a single disk or half-disk?
    ///
    /// This requires at least one face, every incident edge to border one or
    /// two faces, and the incident faces to form a single fan.
    pub fn is_manifold_vertex(&self, vid: u32) -> bool {
        let faces = &self.vertex_faces[vid as usize];
        if faces.is_empty() {
            return false;
        }

        let neighbors = &self.neighbors[vid as usize];
        let mut fan_edges: SmallVec<[&SmallVec<[u32; 2]>; 8]> = SmallVec::new();
        for nbh in neighbors {
            match self.edge_faces.get(&SortedPair::new(vid, *nbh)) {
                Some(f) if f.len() == 1 || f.len() == 2 => fan_edges.push(f),
                _ => return false,
            }
        }

        // Walk the fan: faces sharing an edge incident to `vid` are connected.
        let mut reached: SmallVec<[u32; 8]> = SmallVec::new();
        reached.push(faces[0]);
        let mut changed = true;
        while changed {
            changed = false;
            for edge_faces in &fan_edges {
                let touches = edge_faces.iter().any(|f| reached.contains(f));
                for f in edge_faces.iter() {
                    if touches && !reached.contains(f) {
                        reached.push(*f);
                        changed = true;
                    }
                }
            }
        }

        reached.len() == faces.len()
    }

    /// The faces bordered by the given edge.
    pub fn faces_of_edge(&self, a: u32, b: u32) -> &[u32] {
        self.edge_faces
            .get(&SortedPair::new(a, b))
            .map(|f| f.as_slice())
            .unwrap_or(&[])
    }
}
