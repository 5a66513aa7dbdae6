//! Data model of the conversion pipeline.

pub use self::grid::{InvalidImageError, OccupancyGrid};
pub use self::mesh::{planar_point, Mesh};
pub use self::poly_mesh::{Face, PolyMesh, PolyMeshTopology};
pub use self::polygon::Polygon;

mod grid;
mod mesh;
mod poly_mesh;
mod polygon;
