//! The end-to-end conversion of a sprite into a textured planar mesh.

use crate::math::{Point, Real};
use crate::shape::{InvalidImageError, Mesh, OccupancyGrid, Polygon};
use crate::transformation::{
    self, DegeneracyReason, EmptyContourError, InvalidToleranceError, RefineOptions,
    RefinePassWarning, Resolution, DEFAULT_SIMPLIFY_TOLERANCE,
};

/// A decoded image, as handed over by the caller.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RasterImage<'a> {
    /// Row-major RGBA values in `[0, 1]`, four per pixel.
    pub pixels: &'a [Real],
    /// Width of the image, in pixels.
    pub width: usize,
    /// Height of the image, in pixels.
    pub height: usize,
    /// Resolution of the image.
    pub resolution: Resolution,
    /// Name of the image, carried over to the result.
    pub name: &'a str,
}

/// Parameters of [`convert`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ConvertOptions {
    /// Should the base triangulation be refined into a more even mesh?
    pub subdivide: bool,
    /// Tolerance of the outline simplification, in pixels.
    pub simplify_tolerance: Real,
    /// Parameters of the refinement, used only if `subdivide` is set.
    pub refine: RefineOptions,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            subdivide: false,
            simplify_tolerance: DEFAULT_SIMPLIFY_TOLERANCE,
            refine: RefineOptions::default(),
        }
    }
}

impl ConvertOptions {
    /// Checks that the tolerance and the collapse threshold are strictly positive and finite.
    pub fn validate(&self) -> Result<(), ConversionError> {
        if !(self.simplify_tolerance > 0.0 && self.simplify_tolerance.is_finite()) {
            return Err(ConversionError::InvalidTolerance(self.simplify_tolerance));
        }

        let threshold = self.refine.collapse_threshold;
        if !(threshold > 0.0 && threshold.is_finite()) {
            return Err(ConversionError::InvalidThreshold(threshold));
        }

        Ok(())
    }
}

/// Error aborting a conversion. No mesh is produced.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum ConversionError {
    /// The pixel buffer or the resolution are invalid.
    #[error("invalid image: {0}")]
    InvalidImage(#[from] InvalidImageError),
    /// The image is fully transparent.
    #[error("the image has no opaque pixel.")]
    EmptyContour,
    /// The simplification tolerance is not strictly positive and finite.
    #[error("the simplification tolerance must be strictly positive and finite, found {0}.")]
    InvalidTolerance(Real),
    /// The collapse threshold is not strictly positive and finite.
    #[error("the collapse threshold must be strictly positive and finite, found {0}.")]
    InvalidThreshold(Real),
}

impl From<EmptyContourError> for ConversionError {
    fn from(_: EmptyContourError) -> Self {
        ConversionError::EmptyContour
    }
}

impl From<InvalidToleranceError> for ConversionError {
    fn from(err: InvalidToleranceError) -> Self {
        ConversionError::InvalidTolerance(err.0)
    }
}

/// A recoverable problem met during a conversion. The result is still usable.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum ConversionWarning {
    /// The outline could not be filled: the mesh is made of the outline only.
    #[error("triangulation failed: {0}")]
    TriangulationDegeneracy(DegeneracyReason),
    /// A refinement pass was skipped.
    #[error(transparent)]
    RefinementPass(RefinePassWarning),
}

/// The image a [`SpriteMesh`] was built from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ImageRef {
    /// Name of the image.
    pub name: String,
    /// Width of the image, in pixels.
    pub width: usize,
    /// Height of the image, in pixels.
    pub height: usize,
    /// Resolution of the image.
    pub resolution: Resolution,
}

/// The result of [`convert`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SpriteMesh {
    /// The mesh, in the `(x, z)` plane, scaled to the physical size of the image.
    pub mesh: Mesh,
    /// The UV coordinates of each face corner, in the order of the mesh faces.
    pub uvs: Vec<[Point<Real>; 3]>,
    /// The simplified outline, in image pixels.
    pub outline: Polygon,
    /// The image the mesh should be textured with.
    pub image: ImageRef,
    /// The recoverable problems met during the conversion.
    pub warnings: Vec<ConversionWarning>,
}

impl SpriteMesh {
    /// Was any warning recorded during the conversion?
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Converts the alpha silhouette of an image into a textured planar mesh.
///
/// The largest opaque region of the image is outlined, simplified, then filled
/// with triangles. If `options.subdivide` is set, the triangulation is refined.
/// Finally, UVs are computed and the mesh is scaled to the physical size of
/// the image.
///
/// Invalid inputs and fully transparent images are errors. An outline that
/// cannot be filled, or a refinement pass that cannot run, only degrades the
/// result and is reported in [`SpriteMesh::warnings`].
pub fn convert(
    image: &RasterImage,
    options: &ConvertOptions,
) -> Result<SpriteMesh, ConversionError> {
    options.validate()?;
    image.resolution.validate()?;

    let grid = OccupancyGrid::from_rgba(image.pixels, image.width, image.height)?;
    let contour = transformation::trace_contour(&grid)?;
    let outline = transformation::simplify_polygon(&contour, options.simplify_tolerance)?;
    log::debug!(
        "Outline of {:?}: {} points, simplified to {}.",
        image.name,
        contour.len(),
        outline.len()
    );

    let mut warnings = vec![];
    let triangulation = transformation::triangulate_outline(&outline, image.width, image.height);
    if let Some(reason) = triangulation.degeneracy {
        warnings.push(ConversionWarning::TriangulationDegeneracy(reason));
    }

    let mut mesh = triangulation.mesh;
    if options.subdivide && !mesh.is_outline_only() {
        let refinement = transformation::refine(&mesh, &options.refine);
        warnings.extend(
            refinement
                .warnings
                .into_iter()
                .map(ConversionWarning::RefinementPass),
        );
        mesh = refinement.mesh;
    }

    let projection =
        transformation::project_uvs(&mesh, image.width, image.height, &image.resolution)?;

    Ok(SpriteMesh {
        mesh: projection.mesh,
        uvs: projection.uvs,
        outline,
        image: ImageRef {
            name: image.name.to_string(),
            width: image.width,
            height: image.height,
            resolution: image.resolution,
        },
        warnings,
    })
}
