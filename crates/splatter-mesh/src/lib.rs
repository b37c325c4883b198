pub mod geometry;
pub mod obj;

pub use geometry::{FaceGeometry, analyze_faces, try_analyze_faces};
pub use obj::{ObjError, load_obj, parse_obj};

use glam::Vec3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("mesh has no vertices")]
    EmptyVertices,
    #[error("mesh has no faces")]
    EmptyFaces,
    #[error("vertex {vertex} has a non-finite coordinate")]
    NonFiniteVertex { vertex: usize },
    #[error("face {face} references vertex {index}, but the mesh only has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
}

/// A triangle mesh as handed over by the mesh loader.
///
/// Faces index into `vertices`. Nothing else (normals, uvs, manifoldness) is
/// required.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Build a mesh from plain coordinate arrays.
    pub fn from_arrays(vertices: &[[f32; 3]], faces: &[[u32; 3]]) -> Self {
        Self {
            vertices: vertices.iter().copied().map(Vec3::from).collect(),
            faces: faces.to_vec(),
        }
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Check the input contract: at least one vertex and face, finite vertex
    /// coordinates, and every face index in range.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.vertices.is_empty() {
            return Err(MeshError::EmptyVertices);
        }
        if self.faces.is_empty() {
            return Err(MeshError::EmptyFaces);
        }
        if let Some(vertex) = self.vertices.iter().position(|v| !v.is_finite()) {
            return Err(MeshError::NonFiniteVertex { vertex });
        }
        let vertex_count = self.vertices.len();
        for (face, indices) in self.faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Vertex positions of a face. The face must be in range.
    pub(crate) fn triangle(&self, face: [u32; 3]) -> [Vec3; 3] {
        face.map(|i| self.vertices[i as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_triangle() {
        let mesh = Mesh::from_arrays(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            &[[0, 1, 2]],
        );
        assert_eq!(mesh.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_empty() {
        assert_eq!(Mesh::default().validate(), Err(MeshError::EmptyVertices));

        let no_faces = Mesh::from_arrays(&[[0.0, 0.0, 0.0]], &[]);
        assert_eq!(no_faces.validate(), Err(MeshError::EmptyFaces));
    }

    #[test]
    fn validate_rejects_non_finite_vertices() {
        for bad in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN] {
            let mesh = Mesh::from_arrays(
                &[[0.0, 0.0, 0.0], [1.0, bad, 0.0], [0.0, 1.0, 0.0]],
                &[[0, 1, 2]],
            );
            assert_eq!(
                mesh.validate(),
                Err(MeshError::NonFiniteVertex { vertex: 1 }),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn validate_reports_first_bad_index() {
        let mesh = Mesh::from_arrays(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            &[[0, 1, 2], [0, 7, 2]],
        );
        assert_eq!(
            mesh.validate(),
            Err(MeshError::IndexOutOfRange {
                face: 1,
                index: 7,
                vertex_count: 3,
            })
        );
    }
}
