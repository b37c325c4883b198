mod inspect;

use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use splatter_process::{
    ConversionResult, ConvertConfig, ConvertStage,
    args_file::{load_config_near, merge_configs},
    convert_with_progress,
};

pub use inspect::{InspectArgs, PayloadSummary, guess_platform, inspect_payload};

#[derive(Parser)]
#[command(
    author,
    version,
    arg_required_else_help = true,
    about = "Splatter - mesh to splat previews"
)]
pub struct Cli {
    /// Print span timings of the conversion passes.
    #[arg(long, global = true)]
    pub trace: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert an OBJ mesh into web, desktop and mobile splat previews.
    Convert(ConvertArgs),
    /// Decode a preview payload and print what it contains.
    Inspect(InspectArgs),
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Mesh to convert (Wavefront OBJ).
    #[arg(value_name = "MESH")]
    pub mesh: PathBuf,
    /// Directory for the payloads. Defaults to a `splats` directory next to
    /// the mesh.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
    #[clap(flatten)]
    pub config: ConvertConfig,
}

impl ConvertArgs {
    pub fn output_dir(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            self.mesh
                .parent()
                .map_or_else(|| PathBuf::from("splats"), |dir| dir.join("splats"))
        })
    }

    /// Settings from an args file next to the mesh, overridden by the command
    /// line.
    pub fn effective_config(&self) -> ConvertConfig {
        match load_config_near(&self.mesh) {
            Some(file_config) => merge_configs(&file_config, &self.config),
            None => self.config.clone(),
        }
    }
}

fn stage_message(stage: &ConvertStage) -> String {
    match stage {
        ConvertStage::Analyzing { faces } => format!("Analyzing {faces} faces"),
        ConvertStage::Synthesizing { usable_faces } => {
            format!("Synthesizing splats for {usable_faces} faces")
        }
        ConvertStage::Encoding { splats } => format!("Encoding {splats} splats"),
        ConvertStage::Writing => "Writing payloads".to_owned(),
        ConvertStage::Succeeded { splat_count } => format!("Done, {splat_count} splats"),
        ConvertStage::Failed => "Failed".to_owned(),
    }
}

/// Load the mesh and run a conversion, showing progress on a spinner.
pub fn run_convert(args: &ConvertArgs) -> anyhow::Result<ConversionResult> {
    let mesh = splatter_mesh::load_obj(&args.mesh)
        .with_context(|| format!("Failed to load mesh {}", args.mesh.display()))?;
    let config = args.effective_config();
    let output_dir = args.output_dir();
    log::info!(
        "Converting {} ({} vertices, {} faces) into {}",
        args.mesh.display(),
        mesh.vertices.len(),
        mesh.num_faces(),
        output_dir.display()
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.green} [{elapsed}] {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = convert_with_progress(&mesh, &output_dir, &config, |stage| {
        spinner.set_message(stage_message(&stage));
    });
    spinner.finish_and_clear();
    Ok(result)
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Convert(args) => {
            let result = run_convert(&args)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            if let Some(error) = result.error() {
                anyhow::bail!("Conversion failed: {error}");
            }
        }
        Command::Inspect(args) => {
            let summary = inspect_payload(&args)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use splatter_process::Platform;

    #[test]
    fn parse_convert() {
        let cli = Cli::try_parse_from([
            "splatter",
            "convert",
            "assets/cube.obj",
            "--seed",
            "7",
            "--output",
            "out",
        ])
        .unwrap();
        assert!(!cli.trace, "trace is off by default");
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.mesh, PathBuf::from("assets/cube.obj"));
        assert_eq!(args.output_dir(), PathBuf::from("out"));
        assert_eq!(args.config.seed, Some(7));
    }

    #[test]
    fn default_output_is_next_to_mesh() {
        let cli = Cli::try_parse_from(["splatter", "convert", "assets/cube.obj"]).unwrap();
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.output_dir(), PathBuf::from("assets/splats"));
    }

    #[test]
    fn parse_inspect_with_mobile_alias() {
        let cli = Cli::try_parse_from([
            "splatter",
            "--trace",
            "inspect",
            "out/preview.json",
            "--platform",
            "mobile",
        ])
        .unwrap();
        assert!(cli.trace);
        let Command::Inspect(args) = cli.command else {
            panic!("expected inspect");
        };
        assert_eq!(args.platform, Some(Platform::Android));
    }

    #[test]
    fn convert_requires_mesh() {
        assert!(
            Cli::try_parse_from(["splatter", "convert"]).is_err(),
            "mesh argument is required"
        );
    }
}
