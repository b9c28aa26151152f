/*!
 * `prism track`: tracking results of a task
 */

use super::{render, resolve_task, OutputFormat};
use crate::config::PrismConfig;
use crate::error::Result;
use clap::Subcommand;
use prism_connect::{TargetTrackingClient, TargetTrackingRpc};

#[derive(Debug, Clone, Subcommand)]
pub enum TrackAction {
    /// Print the tracks visible in one image, waiting until they exist
    Results {
        /// Task id (defaults to services.tracking.task_id)
        #[arg(long)]
        task: Option<i64>,

        #[arg(long)]
        image_id: i64,

        /// Labels to follow (repeatable); at least one is required
        #[arg(long = "label", required = true)]
        labels: Vec<String>,

        /// Only the newest box of each track
        #[arg(long)]
        latest: bool,
    },
}

pub async fn execute(
    action: TrackAction,
    config: &PrismConfig,
    format: OutputFormat,
) -> Result<String> {
    let TrackAction::Results { task, .. } = &action;
    let task_id = resolve_task(*task, &config.services.tracking, "tracking")?;
    let client = TargetTrackingClient::new(
        config.services.tracking.endpoint(),
        task_id,
        config.channel.options(),
    )?;
    run(client, action, format).await
}

pub async fn run<R: TargetTrackingRpc>(
    mut client: TargetTrackingClient<R>,
    action: TrackAction,
    format: OutputFormat,
) -> Result<String> {
    let TrackAction::Results {
        image_id,
        labels,
        latest,
        ..
    } = action;

    client.filter_mut().extend(labels);
    let tracks = client.get_result_by_image_id(image_id, latest).await?;

    render(&tracks, format, |tracks| {
        tracks
            .iter()
            .map(|(id, boxes)| {
                let boxes = boxes
                    .iter()
                    .map(|b| format!("({}, {}), ({}, {})", b.x1, b.y1, b.x2, b.y2))
                    .collect::<Vec<_>>()
                    .join("; ");
                format!("Track {}: {}", id, boxes)
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}
