//! Constrained Delaunay fill of a simple polygon.

use crate::math::{Point, Point3, Real};
use crate::shape::{Mesh, Polygon};
use crate::utils::{self, point_in_poly2d};
use spade::{ConstrainedDelaunayTriangulation, Point2 as Pt2, Triangulation as _};

/// Why a polygon could not be filled with triangles.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum DegeneracyReason {
    /// The polygon has less than three points.
    #[error("the outline has {0} points, at least 3 are needed.")]
    TooFewPoints(usize),
    /// The polygon crosses or touches itself.
    #[error("the outline intersects itself.")]
    SelfIntersecting,
    /// Two points of the polygon are at the same position.
    #[error("the outline has duplicate points.")]
    DuplicatePoints,
    /// A point could not be inserted into the triangulation.
    #[error("an outline point could not be inserted into the triangulation.")]
    InsertionFailed,
    /// An outline edge could not be enforced as a constraint.
    #[error("the outline edge ({0}, {1}) could not be enforced.")]
    ConstraintRejected(u32, u32),
    /// The triangles do not cover the polygon exactly once.
    #[error("expected {expected} triangles covering the outline, found {found}.")]
    IncompleteFill {
        /// `N - 2` for an outline with `N` points.
        expected: usize,
        /// The number of triangles kept inside the outline.
        found: usize,
    },
}

/// The result of [`triangulate_outline`].
#[derive(Clone, Debug, PartialEq)]
pub struct Triangulation {
    /// The mesh. Outline-only if `degeneracy` is set.
    pub mesh: Mesh,
    /// Set if the fill failed and only the outline was kept.
    pub degeneracy: Option<DegeneracyReason>,
}

impl Triangulation {
    /// Did the fill fail?
    pub fn is_degenerate(&self) -> bool {
        self.degeneracy.is_some()
    }
}

/// Maps a point of the image plane to the mesh plane.
///
/// The image spans the unit square `[-0.5, 0.5]²` of the `(x, z)` plane, centered
/// on the origin, with `y = 0`.
pub fn image_to_mesh_point(pt: &Point<Real>, image_width: usize, image_height: usize) -> Point3<Real> {
    Point3::new(
        pt.x / image_width as Real - 0.5,
        0.0,
        pt.y / image_height as Real - 0.5,
    )
}

/// Triangulates the inside of a simple counter-clockwise outline.
///
/// Vertex `i` of the resulting mesh is point `i` of the outline, mapped with
/// [`image_to_mesh_point`]. The triangulation is a constrained Delaunay
/// triangulation: it maximizes the smallest angles while keeping every outline
/// edge. No vertex is added and the outline is never altered.
///
/// If the outline cannot be filled (see [`DegeneracyReason`]) the result is the
/// outline-only mesh, with the reason attached. This never panics.
pub fn triangulate_outline(
    outline: &Polygon,
    image_width: usize,
    image_height: usize,
) -> Triangulation {
    let vertices = outline
        .points()
        .iter()
        .map(|pt| image_to_mesh_point(pt, image_width, image_height))
        .collect();

    match fill_polygon(outline.points()) {
        Ok(faces) => Triangulation {
            mesh: Mesh::new(vertices, faces),
            degeneracy: None,
        },
        Err(reason) => {
            log::warn!("Could not triangulate the sprite outline: {reason} Keeping the outline only.");
            Triangulation {
                mesh: Mesh::outline(vertices),
                degeneracy: Some(reason),
            }
        }
    }
}

/// Coordinates too close to zero are rejected by spade.
#[allow(clippy::unnecessary_cast)]
fn to_spade_point(pt: &Point<Real>) -> Pt2<Real> {
    let flush = |coord: Real| {
        if (coord.abs() as f64) < spade::MIN_ALLOWED_VALUE {
            0.0
        } else {
            coord
        }
    };
    Pt2::new(flush(pt.x), flush(pt.y))
}

fn fill_polygon(poly: &[Point<Real>]) -> Result<Vec<[u32; 3]>, DegeneracyReason> {
    let n = poly.len();
    if n < 3 {
        return Err(DegeneracyReason::TooFewPoints(n));
    }

    if utils::polygon_self_intersects(poly) {
        return Err(DegeneracyReason::SelfIntersecting);
    }

    let mut cdt = ConstrainedDelaunayTriangulation::<Pt2<Real>>::new();
    let mut handles = Vec::with_capacity(n);

    for pt in poly {
        let handle = cdt
            .insert(to_spade_point(pt))
            .map_err(|_| DegeneracyReason::InsertionFailed)?;
        handles.push(handle);
    }

    if cdt.num_vertices() != n {
        return Err(DegeneracyReason::DuplicatePoints);
    }

    let mut handle_to_pt_id = vec![u32::MAX; n];
    for (i, handle) in handles.iter().enumerate() {
        handle_to_pt_id[handle.index()] = i as u32;
    }

    for ia in 0..n {
        let ib = (ia + 1) % n;
        if !cdt.can_add_constraint(handles[ia], handles[ib]) {
            return Err(DegeneracyReason::ConstraintRejected(ia as u32, ib as u32));
        }
        let _ = cdt.add_constraint(handles[ia], handles[ib]);
    }

    // Eliminate the triangles filling the concavities of the outline.
    let mut faces = vec![];
    for face in cdt.inner_faces() {
        let mut tri = face.vertices().map(|v| handle_to_pt_id[v.fix().index()]);
        let tri_pts = tri.map(|i| poly[i as usize]);

        if !point_in_poly2d(&utils::center(&tri_pts), poly) {
            continue;
        }

        if utils::corner_direction(&tri_pts[0], &tri_pts[1], &tri_pts[2]) == utils::Orientation::Cw {
            tri.swap(1, 2);
        }
        faces.push(tri);
    }

    if faces.len() != n - 2 {
        return Err(DegeneracyReason::IncompleteFill {
            expected: n - 2,
            found: faces.len(),
        });
    }

    Ok(faces)
}
