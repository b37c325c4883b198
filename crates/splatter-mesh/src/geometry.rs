use glam::Vec3;

use crate::{Mesh, MeshError};

/// Per-face quantities the splats are derived from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceGeometry {
    pub center: Vec3,
    /// Unit normal, or `None` when the face has (numerically) zero area.
    pub normal: Option<Vec3>,
    pub area: f32,
}

impl FaceGeometry {
    /// Geometry of one triangle. The math runs in f64, so large but finite
    /// coordinates neither overflow the center nor the normal length.
    pub fn from_triangle(triangle: [Vec3; 3]) -> Self {
        let [v0, v1, v2] = triangle.map(|v| v.as_dvec3());
        let center = ((v0 + v1 + v2) / 3.0).as_vec3();
        let raw_normal = (v1 - v0).cross(v2 - v0);

        // try_normalize rejects zero and non-finite lengths, so collapsed
        // triangles never produce a NaN normal.
        match raw_normal.try_normalize() {
            Some(normal) => Self {
                center,
                normal: Some(normal.as_vec3()),
                area: (raw_normal.length() * 0.5).min(f64::from(f32::MAX)) as f32,
            },
            None => Self {
                center,
                normal: None,
                area: 0.0,
            },
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.normal.is_none()
    }
}

/// Analyze every face of a mesh, in face order.
///
/// The mesh must be valid (see [`Mesh::validate`]); out of range indices panic.
pub fn analyze_faces(mesh: &Mesh) -> Vec<FaceGeometry> {
    let _span = tracing::trace_span!("analyze_faces", faces = mesh.num_faces()).entered();

    mesh.faces
        .iter()
        .map(|&face| FaceGeometry::from_triangle(mesh.triangle(face)))
        .collect()
}

/// Like [`analyze_faces`], but validates the mesh first.
pub fn try_analyze_faces(mesh: &Mesh) -> Result<Vec<FaceGeometry>, MeshError> {
    mesh.validate()?;
    Ok(analyze_faces(mesh))
}
