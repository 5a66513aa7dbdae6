//! The stages of the sprite conversion: contour tracing, simplification,
//! triangulation, refinement and UV projection.

pub use self::ear_clipping::triangulate_ear_clipping;
pub use self::marching_squares::{trace_contour, trace_contours, EmptyContourError};
pub use self::rdp::{simplify_polygon, InvalidToleranceError, DEFAULT_SIMPLIFY_TOLERANCE};
pub use self::refine::{refine, RefineOptions, RefinePass, RefinePassWarning, Refinement};
pub use self::triangulate_delaunay::{
    image_to_mesh_point, triangulate_outline, DegeneracyReason, Triangulation,
};
pub use self::uv_projection::{project_uvs, Resolution, UvProjection};

mod ear_clipping;
mod marching_squares;
mod rdp;
/// Subdivision, smoothing, collapse and cleanup passes over a triangulated sprite.
pub mod refine;
mod triangulate_delaunay;
mod uv_projection;
