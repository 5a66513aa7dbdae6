//! Various unsorted geometrical and logical operators.

pub use self::center::center;
pub use self::point_in_poly2d::{point_in_poly2d, polygon_signed_area};
pub use self::point_in_triangle::{corner_direction, is_point_in_triangle, Orientation};
pub use self::segments_intersection::{polygon_self_intersects, segments_intersect2d};
pub use self::sorted_pair::SortedPair;

mod center;
pub mod hashmap;
mod point_in_poly2d;
mod point_in_triangle;
mod segments_intersection;
mod sorted_pair;
