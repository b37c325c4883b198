use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use splatter_process::Platform;

#[derive(Args)]
pub struct InspectArgs {
    /// Payload written by `convert`.
    #[arg(value_name = "FILE")]
    pub payload: PathBuf,
    /// Platform the payload was encoded for. Guessed from the file name when
    /// omitted.
    #[arg(long, value_enum)]
    pub platform: Option<Platform>,
    /// Splat count reported by the conversion. Desktop payloads are otherwise
    /// sized from their length.
    #[arg(long)]
    pub splat_count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct FieldLengths {
    pub positions: usize,
    pub scales: usize,
    pub rotations: usize,
    pub colors: usize,
    pub opacities: usize,
}

#[derive(Debug, Serialize)]
pub struct PayloadSummary {
    pub platform: Platform,
    pub bytes: usize,
    pub splat_count: usize,
    pub fields: FieldLengths,
    /// Axis aligned bounds of the splat positions, absent for an empty set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<[[f32; 3]; 2]>,
}

/// Guess the platform of a payload from its file name.
pub fn guess_platform(path: &Path) -> Option<Platform> {
    let name = path.file_name()?.to_str()?;
    if let Some(platform) = Platform::ALL.into_iter().find(|p| p.file_name() == name) {
        return Some(platform);
    }
    match path.extension()?.to_str()? {
        "bin" => Some(Platform::Desktop),
        // Web and mobile documents share a layout.
        "json" => Some(Platform::Web),
        _ => None,
    }
}

fn bounds(positions: &[[f32; 3]]) -> Option<[[f32; 3]; 2]> {
    let (first, rest) = positions.split_first()?;
    Some(rest.iter().fold([*first, *first], |[mut min, mut max], p| {
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
        [min, max]
    }))
}

pub fn inspect_payload(args: &InspectArgs) -> anyhow::Result<PayloadSummary> {
    let platform = match args.platform {
        Some(platform) => platform,
        None => guess_platform(&args.payload).with_context(|| {
            format!(
                "Cannot tell the platform of {}, pass --platform",
                args.payload.display()
            )
        })?,
    };

    let bytes = std::fs::read(&args.payload)
        .with_context(|| format!("Failed to read {}", args.payload.display()))?;
    let splats = splatter_serde::decode(platform, &bytes, args.splat_count)
        .with_context(|| format!("Failed to decode {platform} payload"))?;

    Ok(PayloadSummary {
        platform,
        bytes: bytes.len(),
        splat_count: splats.len(),
        fields: FieldLengths {
            positions: splats.positions().len(),
            scales: splats.scales().len(),
            rotations: splats.rotations().len(),
            colors: splats.colors().len(),
            opacities: splats.opacities().len(),
        },
        bounds: bounds(splats.positions()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_from_file_name() {
        assert_eq!(
            guess_platform(Path::new("out/splats_android.json")),
            Some(Platform::Android)
        );
        assert_eq!(
            guess_platform(Path::new("out/splats_desktop.bin")),
            Some(Platform::Desktop)
        );
        assert_eq!(guess_platform(Path::new("preview.json")), Some(Platform::Web));
        assert_eq!(guess_platform(Path::new("preview.ply")), None);
    }

    #[test]
    fn bounds_of_positions() {
        assert_eq!(bounds(&[]), None);
        assert_eq!(
            bounds(&[[0.0, 2.0, -1.0], [1.0, -2.0, 0.5]]),
            Some([[0.0, -2.0, -1.0], [1.0, 2.0, 0.5]])
        );
    }
}
