//! Binary payload for desktop viewers.
//!
//! Layout: the 5 ASCII bytes `SPLAT`, then the little endian f32 buffers for
//! positions, scales, rotations, colors and opacities, each densely packed.
//! There is no count field; readers get the splat count from the conversion
//! result.

use splatter_synth::SplatSet;

use crate::DecodeError;

pub const MAGIC: &[u8; 5] = b"SPLAT";

/// Floats per splat for each field, in file order.
pub const FIELD_WIDTHS: [usize; 5] = [3, 3, 4, 3, 1];

pub const BYTES_PER_SPLAT: usize = 14 * size_of::<f32>();

pub fn encoded_len(splat_count: usize) -> usize {
    MAGIC.len() + splat_count * BYTES_PER_SPLAT
}

fn write_floats<T: bytemuck::Pod>(out: &mut Vec<u8>, values: &[T]) {
    let floats: &[f32] = bytemuck::cast_slice(values);
    if cfg!(target_endian = "little") {
        out.extend_from_slice(bytemuck::cast_slice(floats));
    } else {
        for f in floats {
            out.extend_from_slice(&f.to_le_bytes());
        }
    }
}

pub fn encode_desktop(splats: &SplatSet) -> Vec<u8> {
    let _span = tracing::trace_span!("encode_desktop", splats = splats.len()).entered();

    let mut out = Vec::with_capacity(encoded_len(splats.len()));
    out.extend_from_slice(MAGIC);
    write_floats(&mut out, splats.positions());
    write_floats(&mut out, splats.scales());
    write_floats(&mut out, splats.rotations());
    write_floats(&mut out, splats.colors());
    write_floats(&mut out, splats.opacities());
    out
}

/// Splat count implied by the payload length, if the payload is well formed.
pub fn infer_splat_count(bytes: &[u8]) -> Result<usize, DecodeError> {
    check_magic(bytes)?;
    let body = bytes.len() - MAGIC.len();
    if body % BYTES_PER_SPLAT != 0 {
        return Err(DecodeError::Length {
            expected: encoded_len(body / BYTES_PER_SPLAT),
            found: bytes.len(),
        });
    }
    Ok(body / BYTES_PER_SPLAT)
}

fn check_magic(bytes: &[u8]) -> Result<(), DecodeError> {
    if bytes.starts_with(MAGIC) {
        Ok(())
    } else {
        Err(DecodeError::BadMagic)
    }
}

fn read_field<const N: usize>(body: &[u8], count: usize, offset: &mut usize) -> Vec<[f32; N]> {
    let len = count * N * size_of::<f32>();
    let bytes = &body[*offset..*offset + len];
    *offset += len;

    bytes
        .chunks_exact(N * size_of::<f32>())
        .map(|chunk| {
            std::array::from_fn(|i| {
                let start = i * size_of::<f32>();
                let mut raw = [0; 4];
                raw.copy_from_slice(&chunk[start..start + 4]);
                f32::from_le_bytes(raw)
            })
        })
        .collect()
}

/// Decode a desktop payload holding exactly `splat_count` splats.
pub fn decode_desktop(bytes: &[u8], splat_count: usize) -> Result<SplatSet, DecodeError> {
    check_magic(bytes)?;
    let expected = encoded_len(splat_count);
    if bytes.len() != expected {
        return Err(DecodeError::Length {
            expected,
            found: bytes.len(),
        });
    }

    let body = &bytes[MAGIC.len()..];
    let mut offset = 0;
    let positions = read_field::<3>(body, splat_count, &mut offset);
    let scales = read_field::<3>(body, splat_count, &mut offset);
    let rotations = read_field::<4>(body, splat_count, &mut offset);
    let colors = read_field::<3>(body, splat_count, &mut offset);
    let opacities = read_field::<1>(body, splat_count, &mut offset)
        .into_iter()
        .map(|[o]| o)
        .collect();

    Ok(SplatSet::from_columns(
        positions, scales, rotations, colors, opacities,
    )?)
}
