use crate::math::{Point, Real};
use crate::utils::{corner_direction, Orientation};

fn on_segment(a: &Point<Real>, b: &Point<Real>, p: &Point<Real>) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Tests if the closed segments `[a, b]` and `[c, d]` share at least one point.
pub fn segments_intersect2d(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    d: &Point<Real>,
) -> bool {
    let o1 = corner_direction(a, b, c);
    let o2 = corner_direction(a, b, d);
    let o3 = corner_direction(c, d, a);
    let o4 = corner_direction(c, d, b);

    if o1 != o2 && o3 != o4 && o1 != Orientation::None && o2 != Orientation::None
        && o3 != Orientation::None && o4 != Orientation::None
    {
        return true;
    }

    (o1 == Orientation::None && on_segment(a, b, c))
        || (o2 == Orientation::None && on_segment(a, b, d))
        || (o3 == Orientation::None && on_segment(c, d, a))
        || (o4 == Orientation::None && on_segment(c, d, b))
}

/// Tests if a closed polygon is not simple.
///
/// Two edges that are not adjacent along the loop must not share any point,
/// and two adjacent edges must only share their common vertex.
pub fn polygon_self_intersects(poly: &[Point<Real>]) -> bool {
    let n = poly.len();
    if n < 3 {
        return false;
    }

    for i in 0..n {
        let (a, b) = (poly[i], poly[(i + 1) % n]);
        if a == b {
            return true;
        }

        for j in i + 1..n {
            let (c, d) = (poly[j], poly[(j + 1) % n]);

            if j == i + 1 || (i == 0 && j == n - 1) {
                // Adjacent edges: they overlap iff they fold back onto each other.
                let (shared, p, q) = if j == i + 1 { (b, a, d) } else { (a, b, c) };
                if corner_direction(&p, &shared, &q) == Orientation::None
                    && (p - shared).dot(&(q - shared)) > 0.0
                {
                    return true;
                }
            } else if segments_intersect2d(&a, &b, &c, &d) {
                return true;
            }
        }
    }

    false
}
