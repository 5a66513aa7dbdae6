//! Retopology of the base triangulation into a more even, organic mesh.
//!
//! [`refine`] runs a fixed recipe of passes, [`REFINE_RECIPE`]. The order
//! matters: every pass relies on the mesh being edge-manifold with its outline
//! vertices pinned, as left by the previous pass. There is no convergence
//! criterion, the recipe always runs to the end.
//!
//! A pass that cannot run leaves the mesh as it was and reports a
//! [`RefinePassWarning`]; refinement itself never fails.

pub use self::clean::clean_verts;
pub use self::collapse::collapse_short_edges;
pub use self::smooth::smooth_verts;
pub use self::subdivide::average_edge_subdivide;
pub use self::triangulate::triangulate_faces;

use crate::math::Real;
use crate::shape::{Mesh, PolyMesh};
use std::fmt;

mod clean;
mod collapse;
mod smooth;
mod subdivide;
mod triangulate;

/// Parameters of the refinement passes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RefineOptions {
    /// Edges shorter than `mean edge length × collapse_threshold` are collapsed.
    pub collapse_threshold: Real,
    /// Number of relaxation iterations of each smoothing pass.
    pub smooth_iterations: usize,
    /// How far a vertex moves toward the centroid of its neighbors, in `[0, 1]`.
    pub smooth_factor: Real,
}

impl Default for RefineOptions {
    fn default() -> Self {
        Self {
            collapse_threshold: 1.0,
            smooth_iterations: 50,
            smooth_factor: 1.0,
        }
    }
}

/// The passes a refinement is made of.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum RefinePass {
    /// Splits interior edges according to their length, see [`average_edge_subdivide`].
    AverageEdgeSubdivide,
    /// Splits n-gons into triangles, see [`triangulate_faces`].
    Triangulate,
    /// Laplacian relaxation of the interior vertices, see [`smooth_verts`].
    SmoothVerts,
    /// Merges the endpoints of short interior edges, see [`collapse_short_edges`].
    CollapseShortEdges,
    /// Removes broken geometry and low-valence vertices, see [`clean_verts`].
    CleanVerts,
}

impl fmt::Display for RefinePass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            RefinePass::AverageEdgeSubdivide => "AverageEdgeSubdivide",
            RefinePass::Triangulate => "Triangulate",
            RefinePass::SmoothVerts => "SmoothVerts",
            RefinePass::CollapseShortEdges => "CollapseShortEdges",
            RefinePass::CleanVerts => "CleanVerts",
        };
        f.write_str(name)
    }
}

/// The refinement recipe, in execution order.
///
/// Subdivide, triangulate and relax; collapse what became too dense and relax
/// again; clean up, then settle with a final relax/triangulate/relax sequence.
pub const REFINE_RECIPE: [RefinePass; 9] = [
    RefinePass::AverageEdgeSubdivide,
    RefinePass::Triangulate,
    RefinePass::SmoothVerts,
    RefinePass::CollapseShortEdges,
    RefinePass::SmoothVerts,
    RefinePass::CleanVerts,
    RefinePass::SmoothVerts,
    RefinePass::Triangulate,
    RefinePass::SmoothVerts,
];

/// Why a refinement pass was skipped.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum SkipReason {
    /// The mesh has no face to work on.
    #[error("the mesh has no face.")]
    NoFaces,
    /// No boundary edge was found, so no vertex can be pinned.
    #[error("the mesh has no boundary edge to pin.")]
    NoBoundary,
    /// An edge has a zero length.
    #[error("the mesh has a zero-length edge.")]
    ZeroLengthEdge,
    /// The pass needs a triangle mesh.
    #[error("the mesh has non-triangular faces.")]
    NotTriangulated,
    /// The pass would have removed every face.
    #[error("the pass would remove every face.")]
    EmptyResult,
    /// The pass would have produced an edge bordering more than two faces.
    #[error("the pass would break edge-manifoldness.")]
    NonManifoldResult,
}

/// A refinement pass that did not run.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[error("refinement step {step} ({pass}) skipped: {reason}")]
pub struct RefinePassWarning {
    /// Index of the step in [`REFINE_RECIPE`].
    pub step: usize,
    /// The pass that was skipped.
    pub pass: RefinePass,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// The result of [`refine`].
#[derive(Clone, Debug, PartialEq)]
pub struct Refinement {
    /// The refined triangle mesh.
    pub mesh: Mesh,
    /// The passes that were skipped.
    pub warnings: Vec<RefinePassWarning>,
}

/// Runs a single refinement pass.
///
/// The input is left untouched; on success the new mesh is returned. A result
/// that is not edge-manifold is rejected.
pub fn apply_pass(
    pass: RefinePass,
    mesh: &PolyMesh,
    options: &RefineOptions,
) -> Result<PolyMesh, SkipReason> {
    let result = match pass {
        RefinePass::AverageEdgeSubdivide => average_edge_subdivide(mesh),
        RefinePass::Triangulate => triangulate_faces(mesh),
        RefinePass::SmoothVerts => {
            smooth_verts(mesh, options.smooth_iterations, options.smooth_factor)
        }
        RefinePass::CollapseShortEdges => collapse_short_edges(mesh, options.collapse_threshold),
        RefinePass::CleanVerts => clean_verts(mesh),
    }?;

    if !result.is_edge_manifold() {
        return Err(SkipReason::NonManifoldResult);
    }

    Ok(result)
}

/// Refines a triangle mesh with the passes of [`REFINE_RECIPE`].
pub fn refine(mesh: &Mesh, options: &RefineOptions) -> Refinement {
    let mut current = PolyMesh::from(mesh);
    let mut warnings = vec![];

    for (step, pass) in REFINE_RECIPE.iter().enumerate() {
        match apply_pass(*pass, &current, options) {
            Ok(next) => {
                log::debug!(
                    "Refinement step {step} ({pass}): {} vertices, {} faces.",
                    next.vertices.len(),
                    next.faces.len()
                );
                current = next;
            }
            Err(reason) => {
                let warning = RefinePassWarning {
                    step,
                    pass: *pass,
                    reason,
                };
                log::warn!("{warning}");
                warnings.push(warning);
            }
        }
    }

    finish(current, mesh, warnings)
}

/// Converts the refined working mesh back to triangles.
///
/// Falls back to `input` with a warning when the refinement lost every face
/// or was left with n-gons.
fn finish(
    current: PolyMesh,
    input: &Mesh,
    mut warnings: Vec<RefinePassWarning>,
) -> Refinement {
    let fallback = |reason: SkipReason, warnings: &mut Vec<RefinePassWarning>| {
        let warning = RefinePassWarning {
            step: REFINE_RECIPE.len(),
            pass: RefinePass::Triangulate,
            reason,
        };
        log::warn!("{warning}");
        warnings.push(warning);
        input.clone()
    };

    let mesh = match current.to_mesh() {
        Some(refined) if !refined.is_outline_only() => refined,
        // Every pass already reported `NoFaces`.
        Some(_) if input.is_outline_only() => input.clone(),
        Some(_) => fallback(SkipReason::EmptyResult, &mut warnings),
        // Only reachable if the final triangulation was skipped.
        None => fallback(SkipReason::NotTriangulated, &mut warnings),
    };

    Refinement { mesh, warnings }
}
