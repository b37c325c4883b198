use std::ops::RangeInclusive;

use rand::Rng;
use splatter_mesh::FaceGeometry;

use crate::{RotationMode, Splat, SplatSet};

/// Multiplier from sqrt(face area) to splat scale.
pub const SCALE_FACTOR: f32 = 0.1;
pub const MIN_SCALE: f32 = 0.01;
pub const MAX_SCALE: f32 = 1.0;
pub const SPLAT_OPACITY: f32 = 0.8;
/// Placeholder colors are drawn from this range until textures are sampled.
pub const COLOR_RANGE: RangeInclusive<f32> = 0.5..=1.0;

pub fn splat_scale(area: f32) -> f32 {
    (area.sqrt() * SCALE_FACTOR).clamp(MIN_SCALE, MAX_SCALE)
}

fn random_color(rng: &mut impl Rng) -> [f32; 3] {
    [
        rng.random_range(COLOR_RANGE),
        rng.random_range(COLOR_RANGE),
        rng.random_range(COLOR_RANGE),
    ]
}

/// Turn analyzed faces into splats, one per non-degenerate face, in face order.
///
/// Degenerate faces are skipped, so the result may be shorter than `faces`.
pub fn synthesize(
    faces: &[FaceGeometry],
    rotation: RotationMode,
    rng: &mut impl Rng,
) -> SplatSet {
    let _span = tracing::trace_span!("synthesize", faces = faces.len()).entered();

    let mut splats = SplatSet::with_capacity(faces.len());
    for face in faces {
        let Some(normal) = face.normal else {
            continue;
        };
        let scale = splat_scale(face.area);
        splats.push(Splat {
            position: face.center.to_array(),
            scale: [scale; 3],
            rotation: rotation.rotation_for(normal),
            color: random_color(rng),
            opacity: SPLAT_OPACITY,
        });
    }

    let skipped = faces.len() - splats.len();
    if skipped > 0 {
        log::warn!("Skipped {skipped} degenerate faces out of {}", faces.len());
    }
    splats
}
