use super::SkipReason;
use crate::shape::{Face, PolyMesh};
use crate::transformation::triangulate_ear_clipping;
use smallvec::smallvec;

/// Splits every face with more than three vertices into triangles.
///
/// Faces are ear-clipped in the `(x, z)` plane. A face the ear clipper cannot
/// handle (e.g. one that became non-simple after smoothing) is split as a fan
/// around its first vertex. No vertex is added or moved.
pub fn triangulate_faces(mesh: &PolyMesh) -> Result<PolyMesh, SkipReason> {
    if mesh.faces.is_empty() {
        return Err(SkipReason::NoFaces);
    }

    let mut faces: Vec<Face> = Vec::with_capacity(mesh.faces.len() * 2);
    let mut num_fans = 0;

    for face in &mesh.faces {
        if face.len() <= 3 {
            faces.push(face.clone());
            continue;
        }

        match triangulate_ear_clipping(&mesh.planar_face(face)) {
            Some(triangles) => faces.extend(
                triangles
                    .iter()
                    .map(|t| smallvec![face[t[0] as usize], face[t[1] as usize], face[t[2] as usize]]),
            ),
            None => {
                num_fans += 1;
                faces.extend((1..face.len() - 1).map(|i| smallvec![face[0], face[i], face[i + 1]]));
            }
        }
    }

    if num_fans > 0 {
        log::debug!("{num_fans} faces could not be ear-clipped and were split as fans.");
    }

    Ok(PolyMesh::new(mesh.vertices.clone(), faces))
}

#[cfg(test)]
mod tests {
    use super::super::test_meshes::assert_manifold;
    use super::*;
    use crate::math::{Point3, Real};

    fn strip() -> PolyMesh {
        PolyMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 1.0),
                Point3::new(1.0, 0.0, 1.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            vec![smallvec![0, 1, 4, 5], smallvec![1, 2, 3, 4]],
        )
    }

    #[test]
    fn quads_become_triangles() {
        let mesh = strip();
        let result = triangulate_faces(&mesh).unwrap();

        assert!(result.is_triangulated());
        assert_eq!(result.faces.len(), 4);
        assert_eq!(result.vertices, mesh.vertices);
        assert!(result.faces.iter().all(|f| result.face_signed_area(f) > 0.0));
        assert_relative_eq!(
            result.faces.iter().map(|f| result.face_signed_area(f)).sum::<Real>(),
            2.0
        );
        assert_manifold(&result);
        // The shared edge is still shared.
        assert!(result.topology().is_manifold_edge(1, 4));
    }

    #[test]
    fn triangles_are_untouched() {
        let mesh = triangulate_faces(&strip()).unwrap();
        assert_eq!(triangulate_faces(&mesh).unwrap(), mesh);
    }

    #[test]
    fn flipped_face_falls_back_to_a_fan() {
        let mut mesh = strip();
        mesh.faces = vec![smallvec![0, 5, 4, 1]];
        let result = triangulate_faces(&mesh).unwrap();
        assert_eq!(result.faces.len(), 2);
        assert_eq!(result.faces[0].as_slice(), &[0, 5, 4]);
        assert_eq!(result.faces[1].as_slice(), &[0, 4, 1]);
    }

    #[test]
    fn empty_mesh_is_skipped() {
        assert_eq!(triangulate_faces(&PolyMesh::default()), Err(SkipReason::NoFaces));
    }
}
