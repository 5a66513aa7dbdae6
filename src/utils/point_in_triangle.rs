//! Orientation predicates on the image plane.

use crate::math::{Point, Real};

#[derive(Eq, PartialEq, Debug, Copy, Clone)]
/// The orientation or winding direction of a corner or polygon.
pub enum Orientation {
    /// Counter-clockwise
    Ccw,
    /// Clockwise
    Cw,
    /// Neither (a straight line, or a corner involving NaN coordinates)
    None,
}

/// Returns the direction of the corner `p1 → p2 → p3`.
///
/// Uses the usual mathematical convention: a left turn in a `x`-right,
/// `y`-up frame is [`Orientation::Ccw`].
pub fn corner_direction(p1: &Point<Real>, p2: &Point<Real>, p3: &Point<Real>) -> Orientation {
    let cross: Real = (p2 - p1).perp(&(p3 - p2));

    match cross.partial_cmp(&0.0) {
        Some(std::cmp::Ordering::Greater) => Orientation::Ccw,
        Some(std::cmp::Ordering::Less) => Orientation::Cw,
        _ => Orientation::None,
    }
}

/// Returns `true` if point `p` is in triangle with corners `v1`, `v2` and `v3`.
///
/// Points on the triangle boundary count as inside.
/// Returns `None` if the triangle is invalid i.e. all points are the same or on a straight line.
pub fn is_point_in_triangle(
    p: &Point<Real>,
    v1: &Point<Real>,
    v2: &Point<Real>,
    v3: &Point<Real>,
) -> Option<bool> {
    if corner_direction(v1, v2, v3) == Orientation::None {
        return None;
    }

    let d1 = corner_direction(v1, v2, p);
    let d2 = corner_direction(v2, v3, p);
    let d3 = corner_direction(v3, v1, p);

    let has_cw = d1 == Orientation::Cw || d2 == Orientation::Cw || d3 == Orientation::Cw;
    let has_ccw = d1 == Orientation::Ccw || d2 == Orientation::Ccw || d3 == Orientation::Ccw;

    Some(!(has_cw && has_ccw))
}
