pub mod desktop;
pub mod json;
pub mod platform;

pub use desktop::{decode_desktop, encode_desktop, infer_splat_count};
pub use json::{decode_json, encode_json};
pub use platform::{MOBILE_STRIDE, Platform, UnknownPlatform};

use splatter_synth::{LengthMismatch, SplatSet};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to serialize splat document")]
    Json(#[from] serde_json::Error),
    #[error("splat {index} has a non-finite value in '{field}'")]
    NonFinite { field: &'static str, index: usize },
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload does not start with the SPLAT magic")]
    BadMagic,
    #[error("payload is {found} bytes, expected {expected}")]
    Length { expected: usize, found: usize },
    #[error("invalid splat document")]
    Json(#[from] serde_json::Error),
    #[error("splat fields have different lengths")]
    Ragged(#[from] LengthMismatch),
}

/// Encode the full resolution set for one platform.
///
/// Platforms that want fewer splats decimate `splats` themselves, so every
/// platform is handed the same set.
pub fn encode(platform: Platform, splats: &SplatSet) -> Result<Vec<u8>, EncodeError> {
    match platform {
        Platform::Web => encode_json(splats),
        Platform::Desktop => Ok(encode_desktop(splats)),
        Platform::Android => encode_json(&splats.decimated(platform.stride())),
    }
}

/// Decode a payload produced by [`encode`]. Desktop payloads need the splat
/// count from the conversion result; pass `None` to infer it from the length.
pub fn decode(
    platform: Platform,
    bytes: &[u8],
    splat_count: Option<usize>,
) -> Result<SplatSet, DecodeError> {
    match platform {
        Platform::Web | Platform::Android => decode_json(bytes),
        Platform::Desktop => {
            let count = match splat_count {
                Some(count) => count,
                None => infer_splat_count(bytes)?,
            };
            decode_desktop(bytes, count)
        }
    }
}
