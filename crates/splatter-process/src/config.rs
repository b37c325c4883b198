use clap::{ArgAction, Args, Parser};
use serde::{Deserialize, Serialize};
use splatter_synth::RotationMode;

#[derive(Clone, Debug, PartialEq, Eq, Args, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConvertConfig {
    /// Seed for the placeholder splat colors. Without a seed every run picks
    /// different colors.
    #[arg(long, help_heading = "Conversion options")]
    pub seed: Option<u64>,
    /// How splat rotations are derived from face normals.
    #[arg(
        long,
        help_heading = "Conversion options",
        value_enum,
        default_value = "identity"
    )]
    pub rotation: RotationMode,
    /// Encode the platform payloads on multiple threads.
    #[arg(
        long,
        help_heading = "Conversion options",
        default_value = "true",
        action = ArgAction::Set
    )]
    pub parallel_encode: bool,
}

/// Standalone parser for [`ConvertConfig`], used for defaults and args files.
#[derive(Parser)]
pub(crate) struct ConfigArgs {
    #[clap(flatten)]
    pub(crate) config: ConvertConfig,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConfigArgs::parse_from(["splatter"]).config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ConvertConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.rotation, RotationMode::Identity);
        assert!(config.parallel_encode, "parallel encoding is on by default");
    }

    #[test]
    fn parse_flags() {
        let args = ConfigArgs::try_parse_from([
            "splatter",
            "--seed",
            "9",
            "--rotation",
            "normal-aligned",
            "--parallel-encode",
            "false",
        ])
        .unwrap();
        assert_eq!(args.config.seed, Some(9));
        assert_eq!(args.config.rotation, RotationMode::NormalAligned);
        assert!(!args.config.parallel_encode, "flag should disable parallelism");
    }
}
