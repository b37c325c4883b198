use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Axis a splat's local frame is aligned with before rotation.
pub const REFERENCE_AXIS: Vec3 = Vec3::Z;

pub const IDENTITY_ROTATION: [f32; 4] = [1.0, 0.0, 0.0, 0.0];

/// How splat orientations are derived from face normals.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum RotationMode {
    /// Every splat gets the identity rotation, regardless of its face.
    #[default]
    Identity,
    /// Shortest-arc rotation taking [`REFERENCE_AXIS`] onto the face normal.
    NormalAligned,
}

impl RotationMode {
    /// Scalar-first quaternion for a splat on a face with this unit normal.
    pub fn rotation_for(self, normal: Vec3) -> [f32; 4] {
        match self {
            Self::Identity => IDENTITY_ROTATION,
            Self::NormalAligned => {
                let q = Quat::from_rotation_arc(REFERENCE_AXIS, normal);
                [q.w, q.x, q.y, q.z]
            }
        }
    }
}
