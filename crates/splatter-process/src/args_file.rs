//! Conversion settings stored next to a mesh in an `args.txt` file.
//!
//! The file holds plain command line flags (`--seed 3 --rotation
//! normal-aligned`). Values given on the actual command line win.

use std::path::Path;

use clap::Parser;

use crate::config::{ConfigArgs, ConvertConfig};

pub const ARGS_FILE_NAME: &str = "args.txt";

pub fn split_args_str(content: &str) -> Vec<String> {
    content.split_whitespace().map(|s| s.to_owned()).collect()
}

fn parse_args(args: &[String]) -> Result<ConvertConfig, clap::Error> {
    let mut all_args = vec!["splatter".to_owned()];
    all_args.extend(args.iter().cloned());
    ConfigArgs::try_parse_from(&all_args).map(|a| a.config)
}

/// Load the args file sitting in the same directory as `mesh_path`, if any.
pub fn load_config_near(mesh_path: &Path) -> Option<ConvertConfig> {
    let dir = mesh_path.parent()?;
    let args_path = dir.join(ARGS_FILE_NAME);
    if !args_path.is_file() {
        return None;
    }

    let content = match std::fs::read_to_string(&args_path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("Failed to read {}: {e}", args_path.display());
            return None;
        }
    };

    let file_args = split_args_str(&content);
    if file_args.is_empty() {
        return None;
    }

    match parse_args(&file_args) {
        Ok(config) => {
            log::info!("Loaded settings from {}", args_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("Ignoring {}: {e}", args_path.display());
            None
        }
    }
}

/// Convert a config back to command line flags. Only values that differ from
/// the defaults are included.
pub fn config_to_args(config: &ConvertConfig) -> Vec<String> {
    use serde_json::Value;

    let config_json = serde_json::to_value(config).unwrap_or(Value::Null);
    let default_json = serde_json::to_value(ConvertConfig::default()).unwrap_or(Value::Null);

    let mut args = Vec::new();

    if let (Value::Object(config_map), Value::Object(default_map)) = (config_json, default_json) {
        for (key, value) in config_map {
            if default_map.get(&key) == Some(&value) || value.is_null() {
                continue;
            }

            args.push(format!("--{key}"));
            match value {
                Value::String(s) => args.push(s),
                other => args.push(other.to_string()),
            }
        }
    }

    args
}

/// Merge a config loaded from an args file with the one from the command
/// line. Command line values take precedence.
pub fn merge_configs(file_config: &ConvertConfig, cli_config: &ConvertConfig) -> ConvertConfig {
    let cli_args = config_to_args(cli_config);
    let mut all_args: Vec<String> = config_to_args(file_config)
        .chunks(2)
        .filter(|pair| !cli_args.contains(&pair[0]))
        .flatten()
        .cloned()
        .collect();
    all_args.extend(cli_args);

    match parse_args(&all_args) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Failed to merge configs: {e}");
            cli_config.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splatter_synth::RotationMode;

    #[test]
    fn config_to_args_only_includes_changes() {
        let config = ConvertConfig {
            seed: Some(5),
            ..Default::default()
        };
        assert_eq!(config_to_args(&config), vec!["--seed", "5"]);
        assert!(
            config_to_args(&ConvertConfig::default()).is_empty(),
            "defaults produce no args"
        );
    }

    #[test]
    fn config_round_trip() {
        let original = ConvertConfig {
            seed: Some(123),
            rotation: RotationMode::NormalAligned,
            parallel_encode: false,
        };
        let parsed = parse_args(&config_to_args(&original)).expect("Should parse");
        assert_eq!(parsed, original);
    }

    #[test]
    fn cli_wins_over_file() {
        let file = ConvertConfig {
            seed: Some(1),
            rotation: RotationMode::NormalAligned,
            ..Default::default()
        };
        let cli = ConvertConfig {
            seed: Some(2),
            ..Default::default()
        };
        let merged = merge_configs(&file, &cli);
        assert_eq!(merged.seed, Some(2));
        assert_eq!(merged.rotation, RotationMode::NormalAligned);
        assert!(merged.parallel_encode, "untouched default survives");
    }

    #[test]
    fn load_from_mesh_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mesh_path = dir.path().join("model.obj");
        std::fs::write(dir.path().join(ARGS_FILE_NAME), "--seed 77\n--rotation normal-aligned\n")
            .unwrap();

        let config = load_config_near(&mesh_path).expect("args file should load");
        assert_eq!(config.seed, Some(77));
        assert_eq!(config.rotation, RotationMode::NormalAligned);
    }

    #[test]
    fn invalid_args_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ARGS_FILE_NAME), "--no-such-flag").unwrap();
        assert!(
            load_config_near(&dir.path().join("model.obj")).is_none(),
            "bad file should be ignored"
        );
    }
}
