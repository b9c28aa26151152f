/*!
 * `prism detect`: detection labels and results of a task
 */

use super::{render, resolve_task, OutputFormat};
use crate::config::PrismConfig;
use crate::error::Result;
use clap::Subcommand;
use prism_connect::{Detection, TargetDetectionClient, TargetDetectionRpc};
use serde::Serialize;

#[derive(Debug, Clone, Subcommand)]
pub enum DetectAction {
    /// Print the task's label mapping table
    Labels {
        /// Task id (defaults to services.detection.task_id)
        #[arg(long)]
        task: Option<i64>,
    },

    /// Print detections for one image, waiting until they exist
    Results {
        /// Task id (defaults to services.detection.task_id)
        #[arg(long)]
        task: Option<i64>,

        #[arg(long)]
        image_id: i64,

        /// Keep only these labels (repeatable); all labels by default
        #[arg(long = "label")]
        labels: Vec<String>,
    },
}

impl DetectAction {
    fn task(&self) -> Option<i64> {
        match self {
            DetectAction::Labels { task } | DetectAction::Results { task, .. } => *task,
        }
    }
}

#[derive(Debug, Serialize)]
struct LabelEntry<'a> {
    id: i32,
    label: &'a str,
}

pub async fn execute(
    action: DetectAction,
    config: &PrismConfig,
    format: OutputFormat,
) -> Result<String> {
    let task_id = resolve_task(action.task(), &config.services.detection, "detection")?;
    let client = TargetDetectionClient::connect(
        config.services.detection.endpoint(),
        task_id,
        config.channel.options(),
    )
    .await?;
    run(client, action, format).await
}

pub async fn run<R: TargetDetectionRpc>(
    mut client: TargetDetectionClient<R>,
    action: DetectAction,
    format: OutputFormat,
) -> Result<String> {
    match action {
        DetectAction::Labels { .. } => {
            let entries: Vec<LabelEntry<'_>> = client
                .labels()
                .iter()
                .map(|(id, label)| LabelEntry { id, label })
                .collect();
            render(&entries, format, |entries| {
                entries
                    .iter()
                    .map(|entry| format!("{}: {}", entry.id, entry.label))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        DetectAction::Results {
            image_id, labels, ..
        } => {
            if !labels.is_empty() {
                let ids = labels
                    .iter()
                    .map(|label| client.query_label_id(label))
                    .collect::<prism_connect::Result<Vec<_>>>()?;
                let filter = client.filter_mut();
                filter.clear();
                filter.extend(ids);
            }

            let detections = client.get_result_by_image_id(image_id).await?;
            render(&detections, format, |detections| {
                detections
                    .iter()
                    .map(Detection::to_string)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
    }
}
