//! Ear-clipping triangulation of the n-gons produced during refinement.

use crate::math::{Point, Real};
use crate::utils::{corner_direction, is_point_in_triangle, Orientation};

/// Cosine of the corner angle at `curr`. Smaller angles have larger values.
fn sharpness(prev: &Point<Real>, curr: &Point<Real>, next: &Point<Real>) -> Option<Real> {
    let u = (prev - curr).try_normalize(0.0)?;
    let v = (next - curr).try_normalize(0.0)?;
    Some(u.dot(&v))
}

/// Doubly-linked ring of the vertices not clipped yet.
struct Ring {
    prev: Vec<usize>,
    next: Vec<usize>,
    len: usize,
}

impl Ring {
    fn new(n: usize) -> Self {
        Self {
            prev: (0..n).map(|i| (i + n - 1) % n).collect(),
            next: (0..n).map(|i| (i + 1) % n).collect(),
            len: n,
        }
    }

    fn remove(&mut self, i: usize) {
        let (p, n) = (self.prev[i], self.next[i]);
        self.next[p] = n;
        self.prev[n] = p;
        self.len -= 1;
    }
}

/// Is the corner at `i` an ear, i.e. a strictly convex corner whose triangle
/// contains no other remaining vertex?
fn is_ear(i: usize, ring: &Ring, active: &[bool], pts: &[Point<Real>]) -> bool {
    let (p, n) = (ring.prev[i], ring.next[i]);

    if corner_direction(&pts[p], &pts[i], &pts[n]) != Orientation::Ccw {
        return false;
    }

    (0..pts.len())
        .filter(|j| active[*j] && *j != p && *j != i && *j != n)
        .all(|j| {
            // Vertices at the same position as a corner do not block the ear.
            pts[j] == pts[p]
                || pts[j] == pts[n]
                || is_point_in_triangle(&pts[j], &pts[p], &pts[i], &pts[n]) == Some(false)
        })
}

/// Triangulates a simple counter-clockwise polygon by ear clipping.
///
/// The sharpest ear is clipped first, which avoids leaving slivers at the end.
/// Collinear vertices (e.g. points inserted on an edge) are never used as ear
/// tips, so no zero-area triangle is produced for them.
///
/// Returns triangles of local indices, or `None` if the polygon is not simple,
/// is clockwise, or has less than three vertices.
pub fn triangulate_ear_clipping(pts: &[Point<Real>]) -> Option<Vec<[u32; 3]>> {
    let n = pts.len();
    if n < 3 {
        return None;
    }

    let mut ring = Ring::new(n);
    let mut active = vec![true; n];
    let mut triangles = Vec::with_capacity(n - 2);

    while ring.len > 3 {
        let ear = (0..n)
            .filter(|i| active[*i] && is_ear(*i, &ring, &active, pts))
            .filter_map(|i| {
                sharpness(&pts[ring.prev[i]], &pts[i], &pts[ring.next[i]]).map(|s| (i, s))
            })
            .fold(None, |best: Option<(usize, Real)>, (i, s)| match best {
                Some((_, best_s)) if best_s >= s => best,
                _ => Some((i, s)),
            });

        let (tip, _) = ear?;
        triangles.push([ring.prev[tip] as u32, tip as u32, ring.next[tip] as u32]);
        active[tip] = false;
        ring.remove(tip);
    }

    let last = (0..n).find(|i| active[*i])?;
    let (p, nx) = (ring.prev[last], ring.next[last]);
    if corner_direction(&pts[p], &pts[last], &pts[nx]) != Orientation::Ccw {
        return None;
    }
    triangles.push([p as u32, last as u32, nx as u32]);

    Some(triangles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[[Real; 2]]) -> Vec<Point<Real>> {
        coords.iter().map(|c| Point::from(*c)).collect()
    }

    fn area(pts: &[Point<Real>], tris: &[[u32; 3]]) -> Real {
        tris.iter()
            .map(|t| {
                let [a, b, c] = t.map(|i| pts[i as usize]);
                (b - a).perp(&(c - a)) / 2.0
            })
            .sum()
    }

    #[test]
    fn triangle_ccw() {
        let vertices = pts(&[[0., 0.], [1., 0.], [1., 1.]]);
        assert_eq!(triangulate_ear_clipping(&vertices), Some(vec![[2, 0, 1]]));
    }

    #[test]
    fn square_cw_fails() {
        let vertices = pts(&[[0., 1.], [1., 1.], [1., 0.], [0., 0.]]);
        assert!(triangulate_ear_clipping(&vertices).is_none());
    }

    #[test]
    fn triangle_with_points_on_its_edges() {
        // What edge subdivision produces: collinear points on two edges.
        let vertices = pts(&[
            [0.0, 0.0],
            [1.0, 0.0],
            [2.0, 0.0],
            [3.0, 0.0],
            [1.5, 1.5],
            [0.75, 0.75],
        ]);
        let tris = triangulate_ear_clipping(&vertices).unwrap();
        assert_eq!(tris.len(), 4);
        assert_relative_eq!(area(&vertices, &tris), 2.25, epsilon = 1.0e-5);
        for t in &tris {
            let [a, b, c] = t.map(|i| vertices[i as usize]);
            assert_eq!(corner_direction(&a, &b, &c), Orientation::Ccw);
        }
    }

    #[test]
    fn concave_quad() {
        // An arrow head: vertex 3 is reflex.
        let vertices = pts(&[[0., 0.], [2., 1.], [0., 2.], [0.5, 1.]]);
        let tris = triangulate_ear_clipping(&vertices).unwrap();
        assert_eq!(tris.len(), 2);
        assert_relative_eq!(area(&vertices, &tris), 1.5, epsilon = 1.0e-5);
    }

    #[test]
    fn origin_outside_shape() {
        let vertices = pts(&[
            [2.0, 2.0],
            [2.0, -2.0],
            [4.0, -2.0],
            [4.0, 4.0],
            [-4.0, 4.0],
            [-4.0, -2.0],
            [-2.0, -2.0],
            [-2.0, 2.0],
        ]);
        let tris = triangulate_ear_clipping(&vertices).unwrap();
        assert_eq!(tris.len(), 6);
        assert_relative_eq!(area(&vertices, &tris), 32.0, epsilon = 1.0e-4);
    }
}
