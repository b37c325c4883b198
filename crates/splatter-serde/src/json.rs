//! Text payload shared by the web and mobile targets.
//!
//! The document is a single JSON object with the fields `positions`, `scales`,
//! `rotations`, `colors` and `opacities`, written in that order. Each field is
//! an array holding one array per splat (3, 3, 4, 3 and 1 values).

use serde::{Deserialize, Serialize, Serializer};
use splatter_synth::SplatSet;

use crate::{DecodeError, EncodeError};

fn ser_opacities<S: Serializer>(opacities: &[f32], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(opacities.iter().map(|&o| [o]))
}

#[derive(Serialize)]
struct SplatDocumentRef<'a> {
    positions: &'a [[f32; 3]],
    scales: &'a [[f32; 3]],
    rotations: &'a [[f32; 4]],
    colors: &'a [[f32; 3]],
    #[serde(serialize_with = "ser_opacities")]
    opacities: &'a [f32],
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SplatDocument {
    positions: Vec<[f32; 3]>,
    scales: Vec<[f32; 3]>,
    rotations: Vec<[f32; 4]>,
    colors: Vec<[f32; 3]>,
    opacities: Vec<[f32; 1]>,
}

fn first_non_finite<const N: usize>(values: &[[f32; N]]) -> Option<usize> {
    values.iter().position(|v| !v.iter().all(|f| f.is_finite()))
}

/// JSON has no representation for infinities and NaN, so they are rejected
/// instead of silently written as `null`.
fn check_finite(splats: &SplatSet) -> Result<(), EncodeError> {
    let opacities = splats.opacities().iter().position(|o| !o.is_finite());
    for (field, index) in [
        ("positions", first_non_finite(splats.positions())),
        ("scales", first_non_finite(splats.scales())),
        ("rotations", first_non_finite(splats.rotations())),
        ("colors", first_non_finite(splats.colors())),
        ("opacities", opacities),
    ] {
        if let Some(index) = index {
            return Err(EncodeError::NonFinite { field, index });
        }
    }
    Ok(())
}

pub fn encode_json(splats: &SplatSet) -> Result<Vec<u8>, EncodeError> {
    let _span = tracing::trace_span!("encode_json", splats = splats.len()).entered();
    check_finite(splats)?;

    let doc = SplatDocumentRef {
        positions: splats.positions(),
        scales: splats.scales(),
        rotations: splats.rotations(),
        colors: splats.colors(),
        opacities: splats.opacities(),
    };
    Ok(serde_json::to_vec(&doc)?)
}

pub fn decode_json(bytes: &[u8]) -> Result<SplatSet, DecodeError> {
    let doc: SplatDocument = serde_json::from_slice(bytes)?;
    Ok(SplatSet::from_columns(
        doc.positions,
        doc.scales,
        doc.rotations,
        doc.colors,
        doc.opacities.into_iter().map(|[o]| o).collect(),
    )?)
}
