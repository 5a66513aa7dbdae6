//! Contour extraction by marching squares.
//!
//! Each 2×2 window of the occupancy grid is classified by the 4-bit code
//! `tl | tr << 1 | br << 2 | bl << 3`. A window edge whose two cells disagree
//! is crossed by the boundary at its midpoint, which lies on the crack between
//! two pixels. The boundary runs from that midpoint to the window center (a
//! pixel corner), so the traced loops follow the pixel outlines exactly.
//!
//! Saddle windows (codes 5 and 10) are resolved by treating occupied cells as
//! 4-connected: the two occupied corners are cut off by two diagonal segments
//! that never reach the window center, so the resulting loops never touch.

use crate::math::{Point, Real};
use crate::shape::{OccupancyGrid, Polygon};
use crate::utils::hashmap::HashMap;

/// Error raised when the occupancy grid has no occupied cell.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
#[error("the image has no opaque pixel: there is no contour to trace.")]
pub struct EmptyContourError;

/// A point of the doubled lattice: pixel corners have two even coordinates,
/// crack midpoints have exactly one odd coordinate.
type LatticePoint = (i64, i64);

#[derive(Copy, Clone)]
struct Window {
    center: LatticePoint,
    top: LatticePoint,
    right: LatticePoint,
    bottom: LatticePoint,
    left: LatticePoint,
}

impl Window {
    fn new(row: usize, col: usize) -> Self {
        let (x, y) = (2 * col as i64, 2 * row as i64);
        Self {
            center: (x, y),
            top: (x, y - 1),
            right: (x + 1, y),
            bottom: (x, y + 1),
            left: (x - 1, y),
        }
    }
}

/// Emits the boundary segments of one window, each oriented with the occupied
/// cell on its left.
fn window_segments(code: u8, w: &Window, out: &mut Vec<(LatticePoint, LatticePoint)>) {
    let tl = code & 1 != 0;
    let tr = code & 2 != 0;
    let br = code & 4 != 0;
    let bl = code & 8 != 0;

    match code {
        0 | 15 => {}
        5 => {
            out.push((w.top, w.left));
            out.push((w.bottom, w.right));
        }
        10 => {
            out.push((w.right, w.top));
            out.push((w.left, w.bottom));
        }
        _ => {
            if tl != tr {
                out.push(if tl { (w.top, w.center) } else { (w.center, w.top) });
            }
            if tr != br {
                out.push(if br { (w.center, w.right) } else { (w.right, w.center) });
            }
            if bl != br {
                out.push(if bl { (w.center, w.bottom) } else { (w.bottom, w.center) });
            }
            if tl != bl {
                out.push(if bl { (w.left, w.center) } else { (w.center, w.left) });
            }
        }
    }
}

/// Traces every boundary loop of the grid.
///
/// Points are expressed in image pixel units: pixel `(row, col)` covers
/// `[col, col + 1] × [row, row + 1]`. Outer boundaries are counter-clockwise
/// (positive signed area) and holes are clockwise. Loops are listed in the
/// raster order of their first segment, and each loop starts at its point
/// with the smallest `(y, x)`.
pub fn trace_contours(grid: &OccupancyGrid) -> Vec<Polygon> {
    let mut segments = vec![];

    for row in 0..grid.height() - 1 {
        for col in 0..grid.width() - 1 {
            let code = grid.is_occupied(row, col) as u8
                | (grid.is_occupied(row, col + 1) as u8) << 1
                | (grid.is_occupied(row + 1, col + 1) as u8) << 2
                | (grid.is_occupied(row + 1, col) as u8) << 3;
            window_segments(code, &Window::new(row, col), &mut segments);
        }
    }

    let next: HashMap<LatticePoint, usize> = segments
        .iter()
        .enumerate()
        .map(|(i, (start, _))| (*start, i))
        .collect();
    debug_assert_eq!(next.len(), segments.len(), "two segments share a start point");

    let mut visited = vec![false; segments.len()];
    let mut loops = vec![];

    for first in 0..segments.len() {
        if visited[first] {
            continue;
        }

        let mut lattice_loop = vec![];
        let mut curr = first;
        while !visited[curr] {
            visited[curr] = true;
            let (start, end) = segments[curr];
            lattice_loop.push(start);

            match next.get(&end) {
                Some(i) => curr = *i,
                None => {
                    // Cannot happen on a padded grid: every crack midpoint and
                    // every window center has as many incoming as outgoing segments.
                    log::debug!("Hit unexpected state in marching squares: open boundary at {end:?}.");
                    break;
                }
            }
        }

        if let Some(start) = lattice_loop
            .iter()
            .enumerate()
            .min_by_key(|(_, (x, y))| (*y, *x))
            .map(|(i, _)| i)
        {
            lattice_loop.rotate_left(start);
        }

        let points = lattice_loop
            .into_iter()
            .map(|(x, y)| Point::new(x as Real / 2.0, y as Real / 2.0))
            .collect();
        loops.push(Polygon::new(points));
    }

    loops
}

/// Traces the outer boundary with the largest area.
///
/// Only one region is meshed: smaller disjoint regions and holes are ignored.
/// Among equally large regions the first one in raster order wins.
pub fn trace_contour(grid: &OccupancyGrid) -> Result<Polygon, EmptyContourError> {
    let mut best: Option<(Real, Polygon)> = None;

    for contour in trace_contours(grid) {
        let area = contour.signed_area();
        if area > 0.0 && best.as_ref().map(|(a, _)| area > *a).unwrap_or(true) {
            best = Some((area, contour));
        }
    }

    best.map(|(_, contour)| contour).ok_or(EmptyContourError)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> OccupancyGrid {
        let width = rows[0].len();
        let mask: Vec<bool> = rows.iter().flat_map(|r| r.chars().map(|c| c == '#')).collect();
        OccupancyGrid::from_mask(&mask, width, rows.len()).unwrap()
    }

    #[test]
    fn single_pixel() {
        let contour = trace_contour(&grid(&["#"])).unwrap();
        let expected = [
            [0.0, 0.0],
            [0.5, 0.0],
            [1.0, 0.0],
            [1.0, 0.5],
            [1.0, 1.0],
            [0.5, 1.0],
            [0.0, 1.0],
            [0.0, 0.5],
        ]
        .map(Point::from);
        assert_eq!(contour.points(), &expected);
        assert_relative_eq!(contour.signed_area(), 1.0);
    }

    #[test]
    fn rectangle_follows_pixel_outline() {
        let contour = trace_contour(&grid(&["....", ".###", ".###", "...."])).unwrap();
        assert_eq!(contour.len(), 4 * (3 + 2));
        assert_relative_eq!(contour.signed_area(), 6.0);
        assert_eq!(contour.points()[0], Point::new(1.0, 1.0));
        assert!(!contour.is_self_intersecting());
    }

    #[test]
    fn concave_shape_area_is_exact() {
        let contour = trace_contour(&grid(&["###", "#..", "###"])).unwrap();
        assert_relative_eq!(contour.signed_area(), 7.0);
        assert!(contour.is_ccw());
        assert!(!contour.is_self_intersecting());
    }

    #[test]
    fn saddle_keeps_diagonal_pixels_apart() {
        let contours = trace_contours(&grid(&["#.", ".#"]));
        assert_eq!(contours.len(), 2);

        for c in &contours {
            assert_relative_eq!(c.signed_area(), 0.875);
            assert!(!c.is_self_intersecting());
        }
        assert!(contours[0]
            .points()
            .iter()
            .all(|p| !contours[1].points().contains(p)));

        let anti = trace_contours(&grid(&[".#", "#."]));
        assert_eq!(anti.len(), 2);
        assert!(anti.iter().all(|c| c.is_ccw()));
    }

    #[test]
    fn holes_are_clockwise_and_ignored() {
        let g = grid(&["###", "#.#", "###"]);
        let contours = trace_contours(&g);
        assert_eq!(contours.len(), 2);
        assert_relative_eq!(contours[0].signed_area(), 9.0);
        assert_relative_eq!(contours[1].signed_area(), -1.0);
        assert_relative_eq!(trace_contour(&g).unwrap().signed_area(), 9.0);
    }

    #[test]
    fn largest_region_wins() {
        let contour = trace_contour(&grid(&["#...", "..##", "..##"])).unwrap();
        assert_relative_eq!(contour.signed_area(), 4.0);
    }

    #[test]
    fn empty_grid_has_no_contour() {
        assert_eq!(trace_contour(&grid(&["...", "..."])), Err(EmptyContourError));
        assert!(trace_contours(&grid(&["..."])).is_empty());
    }
}
