use crate::math::{Point, Point3, Real};
use crate::utils::hashmap::HashMap;
use crate::utils::SortedPair;

/// Projects a mesh vertex onto the `(x, z)` plane the mesh is built in.
#[inline]
pub fn planar_point(pt: &Point3<Real>) -> Point<Real> {
    Point::new(pt.x, pt.z)
}

/// A planar triangle mesh.
///
/// All the triangles are wound counter-clockwise in the `(x, z)` plane. The
/// edge list always contains every edge of every triangle; an outline-only
/// mesh (see [`Mesh::outline`]) has edges but no triangle.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Mesh {
    vertices: Vec<Point3<Real>>,
    edges: Vec<SortedPair<u32>>,
    faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Builds a triangle mesh, deriving its edges from its faces.
    pub fn new(vertices: Vec<Point3<Real>>, faces: Vec<[u32; 3]>) -> Self {
        let mut edges: Vec<_> = faces
            .iter()
            .flat_map(|f| {
                [
                    SortedPair::new(f[0], f[1]),
                    SortedPair::new(f[1], f[2]),
                    SortedPair::new(f[2], f[0]),
                ]
            })
            .collect();
        edges.sort_unstable();
        edges.dedup();

        Self {
            vertices,
            edges,
            faces,
        }
    }

    /// Builds a mesh made only of the closed loop `0 → 1 → … → n-1 → 0`.
    pub fn outline(vertices: Vec<Point3<Real>>) -> Self {
        let n = vertices.len() as u32;
        let mut edges: Vec<_> = match n {
            0 | 1 => vec![],
            2 => vec![SortedPair::new(0, 1)],
            _ => (0..n).map(|i| SortedPair::new(i, (i + 1) % n)).collect(),
        };
        edges.sort_unstable();

        Self {
            vertices,
            edges,
            faces: vec![],
        }
    }

    /// The vertices of this mesh.
    pub fn vertices(&self) -> &[Point3<Real>] {
        &self.vertices
    }

    /// The undirected edges of this mesh, sorted.
    pub fn edges(&self) -> &[SortedPair<u32>] {
        &self.edges
    }

    /// The triangles of this mesh.
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Does this mesh have edges but no triangle?
    pub fn is_outline_only(&self) -> bool {
        self.faces.is_empty()
    }

    /// Counts, for each edge, the triangles it borders.
    pub fn edge_face_counts(&self) -> HashMap<SortedPair<u32>, usize> {
        let mut counts: HashMap<_, usize> = self.edges.iter().map(|e| (*e, 0)).collect();
        for f in &self.faces {
            for k in 0..3 {
                *counts.entry(SortedPair::new(f[k], f[(k + 1) % 3])).or_insert(0) += 1;
            }
        }
        counts
    }

    /// The edges bordering exactly one triangle, sorted.
    ///
    /// For an outline-only mesh this is empty.
    pub fn boundary_edges(&self) -> Vec<SortedPair<u32>> {
        let mut result: Vec<_> = self
            .edge_face_counts()
            .into_iter()
            .filter(|(_, count)| *count == 1)
            .map(|(edge, _)| edge)
            .collect();
        result.sort_unstable();
        result
    }

    /// Is every edge bordered by at most two triangles?
    pub fn is_edge_manifold(&self) -> bool {
        self.edge_face_counts().values().all(|count| *count <= 2)
    }

    /// Is every triangle wound counter-clockwise in the `(x, z)` plane?
    pub fn is_consistently_oriented(&self) -> bool {
        self.faces
            .iter()
            .all(|f| self.triangle_signed_area(f) > 0.0)
    }

    /// The total area of the triangles, measured in the `(x, z)` plane.
    pub fn planar_area(&self) -> Real {
        self.faces
            .iter()
            .map(|f| self.triangle_signed_area(f))
            .sum()
    }

    fn triangle_signed_area(&self, face: &[u32; 3]) -> Real {
        let [a, b, c] = face.map(|i| planar_point(&self.vertices[i as usize]));
        (b - a).perp(&(c - a)) / 2.0
    }

    /// Scales every vertex along the `x` and `z` axes.
    pub fn scale_planar(&mut self, sx: Real, sz: Real) {
        for v in &mut self.vertices {
            v.x *= sx;
            v.z *= sz;
        }
    }
}
