//! Planar UV mapping and physical sizing of a sprite mesh.

use crate::math::{Point, Real, INCHES_PER_METER};
use crate::shape::{planar_point, InvalidImageError, Mesh};

/// The resolution of an image, in dots per inch along each axis.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Resolution {
    /// Horizontal resolution.
    pub x: Real,
    /// Vertical resolution.
    pub y: Real,
}

impl Resolution {
    /// A resolution with distinct horizontal and vertical densities.
    pub fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }

    /// The same resolution along both axes.
    pub fn uniform(dpi: Real) -> Self {
        Self { x: dpi, y: dpi }
    }

    /// Checks that both densities are strictly positive and finite.
    pub fn validate(&self) -> Result<(), InvalidImageError> {
        for dpi in [self.x, self.y] {
            if !(dpi > 0.0 && dpi.is_finite()) {
                return Err(InvalidImageError::InvalidResolution(dpi));
            }
        }
        Ok(())
    }

    /// The factors applied to the `x` and `z` coordinates of the unit-sized
    /// mesh of a `width × height` image.
    pub fn scale_factors(&self, width: usize, height: usize) -> (Real, Real) {
        (
            width as Real / (self.x / INCHES_PER_METER),
            height as Real / (self.y / INCHES_PER_METER),
        )
    }
}

/// The result of [`project_uvs`].
#[derive(Clone, Debug, PartialEq)]
pub struct UvProjection {
    /// The mesh, scaled to its physical size.
    pub mesh: Mesh,
    /// The UV coordinates of each face corner, in the order of [`Mesh::faces`].
    pub uvs: Vec<[Point<Real>; 3]>,
}

/// Computes the UVs of a unit-sized sprite mesh, then scales it to its physical size.
///
/// The mesh must span `[-0.5, 0.5]²` in the `(x, z)` plane, as produced by
/// [`triangulate_outline`](crate::transformation::triangulate_outline). Every
/// face corner gets `uv = (x + 0.5, z + 0.5)`, so the UVs are independent of
/// the resolution. The vertices are then scaled by
/// [`Resolution::scale_factors`]. An outline-only mesh is scaled and gets no UV.
pub fn project_uvs(
    mesh: &Mesh,
    image_width: usize,
    image_height: usize,
    resolution: &Resolution,
) -> Result<UvProjection, InvalidImageError> {
    resolution.validate()?;

    let uvs = mesh
        .faces()
        .iter()
        .map(|face| {
            face.map(|vid| {
                let pt = planar_point(&mesh.vertices()[vid as usize]);
                Point::new(pt.x + 0.5, pt.y + 0.5)
            })
        })
        .collect();

    let (sx, sz) = resolution.scale_factors(image_width, image_height);
    let mut scaled = mesh.clone();
    scaled.scale_planar(sx, sz);

    Ok(UvProjection { mesh: scaled, uvs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point3;

    fn unit_square() -> Mesh {
        Mesh::new(
            vec![
                Point3::new(-0.5, 0.0, -0.5),
                Point3::new(0.5, 0.0, -0.5),
                Point3::new(0.5, 0.0, 0.5),
                Point3::new(-0.5, 0.0, 0.5),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn corners_map_to_the_unit_square() {
        let result = project_uvs(&unit_square(), 10, 10, &Resolution::uniform(300.0)).unwrap();
        assert_eq!(result.uvs.len(), 2);
        assert_relative_eq!(result.uvs[0][0], Point::new(0.0, 0.0));
        assert_relative_eq!(result.uvs[0][1], Point::new(1.0, 0.0));
        assert_relative_eq!(result.uvs[0][2], Point::new(1.0, 1.0));
        assert_relative_eq!(result.uvs[1][2], Point::new(0.0, 1.0));
    }

    #[test]
    fn uvs_do_not_depend_on_the_resolution() {
        let low = project_uvs(&unit_square(), 10, 20, &Resolution::uniform(72.0)).unwrap();
        let high = project_uvs(&unit_square(), 10, 20, &Resolution::new(300.0, 600.0)).unwrap();
        assert_eq!(low.uvs, high.uvs);
        assert_ne!(low.mesh, high.mesh);
    }

    #[test]
    fn vertices_are_scaled_per_axis() {
        let resolution = Resolution::new(300.0, 150.0);
        let result = project_uvs(&unit_square(), 10, 20, &resolution).unwrap();
        let sx = 10.0 / (300.0 / INCHES_PER_METER);
        let sz = 20.0 / (150.0 / INCHES_PER_METER);

        assert_relative_eq!(result.mesh.vertices()[2], Point3::new(0.5 * sx, 0.0, 0.5 * sz));
        assert_relative_eq!(result.mesh.planar_area(), sx * sz, epsilon = 1.0e-5);
        assert_eq!(result.mesh.faces(), unit_square().faces());
    }

    #[test]
    fn outline_only_mesh_has_no_uv() {
        let outline = Mesh::outline(unit_square().vertices().to_vec());
        let result = project_uvs(&outline, 10, 10, &Resolution::uniform(96.0)).unwrap();
        assert!(result.uvs.is_empty());
        assert_eq!(result.mesh.edges().len(), 4);
    }

    #[test]
    fn invalid_resolutions() {
        for dpi in [0.0, -72.0, Real::NAN, Real::INFINITY] {
            assert!(Resolution::uniform(dpi).validate().is_err());
        }
        assert_eq!(
            Resolution::new(72.0, 0.0).validate(),
            Err(InvalidImageError::InvalidResolution(0.0))
        );
        assert!(project_uvs(&unit_square(), 10, 10, &Resolution::uniform(0.0)).is_err());
    }
}
