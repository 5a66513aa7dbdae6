use crate::math::Real;
use na::{Point, SVector};

/// Computes the geometric center (centroid) of a set of points.
///
/// All points are weighted equally. Works for the 2D image plane as well as
/// for 3D mesh vertices.
///
/// # Panics
///
/// Panics if the input slice is empty.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use alphamesh::math::Point2;
/// use alphamesh::utils::center;
///
/// let square = [
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(0.0, 2.0),
/// ];
/// let c = center(&square);
/// assert!((c.x - 1.0).abs() < 1e-6);
/// assert!((c.y - 1.0).abs() < 1e-6);
/// # }
/// ```
#[inline]
pub fn center<const D: usize>(pts: &[Point<Real, D>]) -> Point<Real, D> {
    assert!(
        !pts.is_empty(),
        "Cannot compute the center of less than 1 point."
    );

    let denom: Real = na::convert::<f64, Real>(1.0 / (pts.len() as f64));
    let sum = pts
        .iter()
        .fold(SVector::<Real, D>::zeros(), |acc, pt| acc + pt.coords);

    Point::from(sum * denom)
}
