/*!
alphamesh
=========

**alphamesh** turns the alpha silhouette of a sprite into a planar triangle
mesh with UV coordinates.

The conversion is a strictly forward pipeline:

1. [`shape::OccupancyGrid`]: the alpha channel as a padded binary mask.
2. [`transformation::trace_contour`]: marching squares along pixel cracks.
3. [`transformation::simplify_polygon`]: closed Ramer–Douglas–Peucker.
4. [`transformation::triangulate_outline`]: constrained Delaunay fill.
5. [`transformation::refine()`]: optional subdivide/smooth/collapse/clean recipe.
6. [`transformation::project_uvs`]: planar UVs and physical scaling.

[`pipeline::convert`] chains all of them.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![warn(unused_qualifications)]

#[cfg(all(feature = "f32", feature = "f64"))]
std::compile_error!("The `f32` and `f64` features are mutually exclusive.");

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[cfg(test)]
#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub mod pipeline;
pub mod shape;
pub mod transformation;
pub mod utils;

pub use pipeline::{
    convert, ConversionError, ConversionWarning, ConvertOptions, ImageRef, RasterImage, SpriteMesh,
};

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    pub use na::{Point2, Point3, Vector2, Vector3};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// Number of inches in a meter, used to turn a DPI resolution into pixels per meter.
    pub const INCHES_PER_METER: Real = 39.3701;

    /// The point type of the image plane.
    pub use Point2 as Point;
}
