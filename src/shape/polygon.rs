use crate::math::{Point, Real};
use crate::utils;

/// A closed polygon on the image plane, in pixel units.
///
/// Two consecutive points determine an edge, and the last point is implicitly
/// connected to the first one. The first and last points are distinct.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Polygon {
    points: Vec<Point<Real>>,
}

impl Polygon {
    /// Builds a polygon from its ordered points.
    pub fn new(points: Vec<Point<Real>>) -> Self {
        Self { points }
    }

    /// The points of this polygon.
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }

    /// Consumes the polygon, returning its points.
    pub fn into_points(self) -> Vec<Point<Real>> {
        self.points
    }

    /// The number of points of this polygon.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Does this polygon have no point at all?
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The signed area of this polygon, positive if it is counter-clockwise.
    pub fn signed_area(&self) -> Real {
        utils::polygon_signed_area(&self.points)
    }

    /// Is this polygon wound counter-clockwise?
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Does this polygon cross or touch itself?
    pub fn is_self_intersecting(&self) -> bool {
        utils::polygon_self_intersects(&self.points)
    }

    /// Iterates through the edges of this polygon, closing edge included.
    pub fn edges(&self) -> impl Iterator<Item = (Point<Real>, Point<Real>)> + '_ {
        self.points
            .iter()
            .zip(self.points.iter().cycle().skip(1))
            .map(|(a, b)| (*a, *b))
    }
}

impl From<Vec<Point<Real>>> for Polygon {
    fn from(points: Vec<Point<Real>>) -> Self {
        Self::new(points)
    }
}
