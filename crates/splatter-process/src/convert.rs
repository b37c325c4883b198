use std::path::Path;

use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use splatter_mesh::{Mesh, analyze_faces};
use splatter_serde::{EncodeError, Platform, encode};
use splatter_synth::{SplatSet, synthesize};

use crate::{
    config::ConvertConfig,
    error::ConvertError,
    message::ConvertStage,
    output::StagedOutput,
    result::ConversionResult,
};

/// Encoded payloads for all platforms, in [`Platform::ALL`] order.
pub struct EncodedPayloads {
    pub splat_count: usize,
    pub payloads: Vec<(Platform, Vec<u8>)>,
}

/// Analyze and synthesize the full resolution splat set for a mesh.
pub fn mesh_to_splats(
    mesh: &Mesh,
    config: &ConvertConfig,
    on_stage: &mut impl FnMut(ConvertStage),
) -> Result<SplatSet, ConvertError> {
    on_stage(ConvertStage::Analyzing {
        faces: mesh.num_faces(),
    });
    mesh.validate()?;
    let faces = analyze_faces(mesh);

    let usable_faces = faces.iter().filter(|f| !f.is_degenerate()).count();
    if usable_faces == 0 {
        return Err(ConvertError::NoUsableFaces {
            degenerate: faces.len(),
        });
    }

    on_stage(ConvertStage::Synthesizing { usable_faces });
    let splats = match config.seed {
        Some(seed) => synthesize(&faces, config.rotation, &mut StdRng::seed_from_u64(seed)),
        None => synthesize(&faces, config.rotation, &mut rand::rng()),
    };
    Ok(splats)
}

/// Encode a splat set for every platform.
pub fn encode_all(splats: &SplatSet, parallel: bool) -> Result<EncodedPayloads, ConvertError> {
    let _span = tracing::trace_span!("encode_all", parallel).entered();

    let encode_one = |&platform: &Platform| (platform, encode(platform, splats));
    let results: Vec<(Platform, Result<Vec<u8>, EncodeError>)> = if parallel {
        Platform::ALL.par_iter().map(encode_one).collect()
    } else {
        Platform::ALL.iter().map(encode_one).collect()
    };

    let payloads = results
        .into_iter()
        .map(|(platform, bytes)| {
            let bytes = bytes.map_err(|source| ConvertError::Encode { platform, source })?;
            log::info!("Encoded {platform} payload: {} bytes", bytes.len());
            Ok((platform, bytes))
        })
        .collect::<Result<_, ConvertError>>()?;

    Ok(EncodedPayloads {
        splat_count: splats.len(),
        payloads,
    })
}

fn write_payloads(
    output_dir: &Path,
    encoded: &EncodedPayloads,
) -> Result<ConversionResult, (ConvertError, Option<StagedOutput>)> {
    let mut output = StagedOutput::create(output_dir).map_err(|e| (e, None))?;

    let committed = encoded
        .payloads
        .iter()
        .try_for_each(|(platform, bytes)| output.stage(*platform, bytes))
        .and_then(|()| output.commit());

    match committed {
        Ok(outputs) => Ok(ConversionResult::Success {
            splat_count: encoded.splat_count,
            outputs,
        }),
        Err(e) => Err((e, Some(output))),
    }
}

/// Convert a mesh into splat previews written to `output_dir`.
///
/// Never fails outright: errors are reported through
/// [`ConversionResult::Failure`]. On failure no payload of this conversion is
/// left in `output_dir`, except for files listed as invalid in the result.
pub fn convert(mesh: &Mesh, output_dir: &Path, config: &ConvertConfig) -> ConversionResult {
    convert_with_progress(mesh, output_dir, config, |_| {})
}

/// [`convert`], reporting each stage to `on_stage` as it is entered.
pub fn convert_with_progress(
    mesh: &Mesh,
    output_dir: &Path,
    config: &ConvertConfig,
    mut on_stage: impl FnMut(ConvertStage),
) -> ConversionResult {
    let _span = tracing::trace_span!("convert", faces = mesh.num_faces()).entered();

    let encoded = mesh_to_splats(mesh, config, &mut on_stage).and_then(|splats| {
        on_stage(ConvertStage::Encoding {
            splats: splats.len(),
        });
        encode_all(&splats, config.parallel_encode)
    });

    let result = match encoded {
        Ok(encoded) => {
            on_stage(ConvertStage::Writing);
            match write_payloads(output_dir, &encoded) {
                Ok(result) => result,
                Err((err, output)) => {
                    let invalid = output.map(StagedOutput::rollback).unwrap_or_default();
                    ConversionResult::failure(&err, invalid)
                }
            }
        }
        Err(err) => ConversionResult::failure(&err, vec![]),
    };

    match &result {
        ConversionResult::Success { splat_count, .. } => {
            log::info!("Converted mesh to {splat_count} splats in {}", output_dir.display());
            on_stage(ConvertStage::Succeeded {
                splat_count: *splat_count,
            });
        }
        ConversionResult::Failure { error, .. } => {
            log::warn!("Conversion failed: {error}");
            on_stage(ConvertStage::Failed);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_and_serial_encoding_agree() {
        let mesh = Mesh::from_arrays(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
            &[[0, 1, 2], [1, 3, 2]],
        );
        let config = ConvertConfig {
            seed: Some(3),
            ..Default::default()
        };
        let splats = mesh_to_splats(&mesh, &config, &mut |_| {}).unwrap();

        let serial = encode_all(&splats, false).unwrap();
        let parallel = encode_all(&splats, true).unwrap();
        assert_eq!(serial.payloads, parallel.payloads);
        assert_eq!(
            serial.payloads.iter().map(|(p, _)| *p).collect::<Vec<_>>(),
            Platform::ALL
        );
    }

    #[test]
    fn stages_are_reported_in_order() {
        let mesh = Mesh::from_arrays(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            &[[0, 1, 2]],
        );
        let dir = tempfile::tempdir().unwrap();
        let mut stages = vec![];
        let result = convert_with_progress(&mesh, dir.path(), &ConvertConfig::default(), |s| {
            stages.push(s);
        });
        assert!(result.is_success(), "{result:?}");
        assert_eq!(
            stages,
            [
                ConvertStage::Analyzing { faces: 1 },
                ConvertStage::Synthesizing { usable_faces: 1 },
                ConvertStage::Encoding { splats: 1 },
                ConvertStage::Writing,
                ConvertStage::Succeeded { splat_count: 1 },
            ]
        );
    }

    #[test]
    fn failure_stops_before_encoding() {
        let mesh = Mesh::from_arrays(&[[0.0, 0.0, 0.0]], &[[0, 0, 0]]);
        let dir = tempfile::tempdir().unwrap();
        let mut stages = vec![];
        let result = convert_with_progress(&mesh, dir.path(), &ConvertConfig::default(), |s| {
            stages.push(s);
        });
        assert!(!result.is_success(), "degenerate mesh should fail");
        assert_eq!(
            stages,
            [ConvertStage::Analyzing { faces: 1 }, ConvertStage::Failed]
        );
    }
}
