/*!
 * Prism CLI - Command Line Interface
 */

use anyhow::Context;
use clap::{Parser, Subcommand};
use prism::{
    commands::{
        self, coordinator::CoordinatorAction, detect::DetectAction, harmony::HarmonyAction,
        render::RenderAction, track::TrackAction, OutputFormat,
    },
    config::PrismConfig,
    error::{PrismError, EXIT_FATAL, EXIT_SUCCESS},
    logging,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prism")]
#[command(version, about = "Client for the Prism vision service grid", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", env = "PRISM_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Image loading service
    #[command(subcommand)]
    Harmony(HarmonyAction),

    /// Rendered frames
    #[command(subcommand)]
    Render(RenderAction),

    /// Task wiring and lifecycle
    #[command(subcommand)]
    Coordinator(CoordinatorAction),

    /// Target detection
    #[command(subcommand)]
    Detect(DetectAction),

    /// Target tracking
    #[command(subcommand)]
    Track(TrackAction),
}

#[tokio::main]
async fn main() {
    let code = match run(Cli::parse()).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.downcast_ref::<PrismError>()
                .map(PrismError::exit_code)
                .unwrap_or(EXIT_FATAL)
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match cli.config {
        Some(ref path) => PrismConfig::from_file(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => PrismConfig::default(),
    };
    config.logging.verbose |= cli.verbose;

    if let Err(e) = logging::init_logging(&config.logging) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let format = OutputFormat::from_json_flag(cli.json);
    let output = match cli.command {
        Commands::Harmony(action) => commands::harmony::execute(action, &config, format).await,
        Commands::Render(action) => commands::render::execute(action, &config, format).await,
        Commands::Coordinator(action) => {
            commands::coordinator::execute(action, &config, format).await
        }
        Commands::Detect(action) => commands::detect::execute(action, &config, format).await,
        Commands::Track(action) => commands::track::execute(action, &config, format).await,
    }?;

    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_detect_results() {
        let cli = Cli::try_parse_from([
            "prism", "--json", "detect", "results", "--task", "3", "--image-id", "42", "--label",
            "person", "--label", "car",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Detect(DetectAction::Results {
                task,
                image_id,
                labels,
            }) => {
                assert_eq!(task, Some(3));
                assert_eq!(image_id, 42);
                assert_eq!(labels, vec!["person", "car"]);
            }
            _ => panic!("expected detect results"),
        }
    }

    #[test]
    fn test_parse_inform_previous_args() {
        let cli = Cli::try_parse_from([
            "prism",
            "coordinator",
            "inform-previous",
            "--task",
            "cam-1",
            "--name",
            "image_harmony",
            "--ip",
            "10.0.0.2",
            "--port",
            "50051",
            "--arg",
            "loader=rtsp",
        ])
        .unwrap();

        match cli.command {
            Commands::Coordinator(CoordinatorAction::InformPrevious { args, .. }) => {
                assert_eq!(args, vec![("loader".to_string(), "rtsp".to_string())]);
            }
            _ => panic!("expected coordinator inform-previous"),
        }
    }

    #[test]
    fn test_parse_harmony_fetch() {
        let cli = Cli::try_parse_from([
            "prism", "harmony", "fetch", "--loader-hash", "7", "--image-id", "1", "--format",
            "png", "--out", "frame.png", "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Harmony(HarmonyAction::Fetch { loader_hash: 7, .. })
        ));
    }

    #[test]
    fn test_track_requires_label() {
        assert!(Cli::try_parse_from(["prism", "track", "results", "--image-id", "1"]).is_err());
    }

    #[test]
    fn test_bad_key_value_rejected() {
        assert!(Cli::try_parse_from([
            "prism",
            "coordinator",
            "inform-current",
            "--task",
            "t",
            "--arg",
            "novalue",
        ])
        .is_err());
    }
}
