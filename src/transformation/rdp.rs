//! Ramer–Douglas–Peucker simplification of closed polygons.

use crate::math::{Point, Real};
use crate::shape::Polygon;

/// The tolerance used when none is given, in pixels.
pub const DEFAULT_SIMPLIFY_TOLERANCE: Real = 1.5;

/// Error raised when the simplification tolerance is not strictly positive.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
#[error("the simplification tolerance must be strictly positive and finite, found {0}.")]
pub struct InvalidToleranceError(pub Real);

/// Distance from `pt` to the segment `[a, b]`.
fn segment_distance(pt: &Point<Real>, a: &Point<Real>, b: &Point<Real>) -> Real {
    let ab = b - a;
    let sq_len = ab.norm_squared();

    if sq_len == 0.0 {
        return na::distance(pt, a);
    }

    let t = ((pt - a).dot(&ab) / sq_len).clamp(0.0, 1.0);
    na::distance(pt, &(a + ab * t))
}

/// Position, among `candidates`, of the point farthest from the segment `[a, b]`.
///
/// Ties keep the first candidate.
fn farthest_from_segment(
    candidates: impl Iterator<Item = Point<Real>>,
    a: &Point<Real>,
    b: &Point<Real>,
) -> Option<(usize, Real)> {
    let mut best: Option<(usize, Real)> = None;

    for (k, pt) in candidates.enumerate() {
        let dist = segment_distance(&pt, a, b);
        if best.map(|(_, d)| dist > d).unwrap_or(true) {
            best = Some((k, dist));
        }
    }

    best
}

/// Marks the points of `chain` (indices into `points`) that survive simplification.
///
/// The chain endpoints must already be marked.
fn simplify_chain(points: &[Point<Real>], chain: &[usize], epsilon: Real, keep: &mut [bool]) {
    let mut stack = vec![(0, chain.len() - 1)];

    while let Some((first, last)) = stack.pop() {
        if last <= first + 1 {
            continue;
        }

        let a = points[chain[first]];
        let b = points[chain[last]];
        let inner = chain[first + 1..last].iter().map(|i| points[*i]);

        if let Some((k, dist)) = farthest_from_segment(inner, &a, &b) {
            if dist > epsilon {
                let split = first + 1 + k;
                keep[chain[split]] = true;
                stack.push((first, split));
                stack.push((split, last));
            }
        }
    }
}

/// Simplifies a closed polygon with the Ramer–Douglas–Peucker algorithm.
///
/// The loop is split at two anchors that are always kept: `a`, its point with
/// the smallest `(y, x)`, and `b`, the point farthest from `a`. Each of the two
/// chains `a → b` and `b → a` is then simplified recursively: a point survives
/// if it lies farther than `epsilon` from the chord replacing it.
///
/// The result is an ordered subset of the input starting at `a`, and
/// simplifying it again with the same `epsilon` returns it unchanged. If less
/// than three points survive, the point farthest from the chord `a → b` is put
/// back so that the result still encloses an area. Polygons with less than
/// three points are returned as-is.
///
/// The output is not guaranteed to be simple if `epsilon` is large compared to
/// the features of the polygon.
pub fn simplify_polygon(polygon: &Polygon, epsilon: Real) -> Result<Polygon, InvalidToleranceError> {
    if !(epsilon > 0.0 && epsilon.is_finite()) {
        return Err(InvalidToleranceError(epsilon));
    }

    let points = polygon.points();
    let n = points.len();
    if n < 3 {
        return Ok(polygon.clone());
    }

    let a = points
        .iter()
        .enumerate()
        .min_by(|(_, p), (_, q)| {
            (p.y, p.x)
                .partial_cmp(&(q.y, q.x))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap_or(0);

    // Loop order starting at `a`.
    let order: Vec<usize> = (0..n).map(|k| (a + k) % n).collect();

    let mut b_pos = 1;
    let mut b_dist = -1.0;
    for (pos, i) in order.iter().enumerate().skip(1) {
        let dist = na::distance(&points[*i], &points[a]);
        if dist > b_dist {
            b_dist = dist;
            b_pos = pos;
        }
    }

    let mut keep = vec![false; n];
    keep[a] = true;
    keep[order[b_pos]] = true;

    let forward = &order[..=b_pos];
    let backward: Vec<usize> = order[b_pos..].iter().copied().chain(std::iter::once(a)).collect();
    simplify_chain(points, forward, epsilon, &mut keep);
    simplify_chain(points, &backward, epsilon, &mut keep);

    if keep.iter().filter(|k| **k).count() < 3 {
        let (pa, pb) = (points[a], points[order[b_pos]]);
        if let Some((i, dist)) = farthest_from_segment(points.iter().copied(), &pa, &pb) {
            if dist > 0.0 {
                keep[i] = true;
            }
        }
    }

    Ok(Polygon::new(
        order
            .into_iter()
            .filter(|i| keep[*i])
            .map(|i| points[i])
            .collect(),
    ))
}
