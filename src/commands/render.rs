/*!
 * `prism render`: rendered frames of a task
 */

use super::{render, resolve_task, write_buffer, EncodingArgs, FetchReport, OutputFormat};
use crate::config::PrismConfig;
use crate::error::Result;
use clap::Subcommand;
use prism_connect::{ImageRendererClient, ImageRendererRpc, ImageSize};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Subcommand)]
pub enum RenderAction {
    /// Print a rendered frame's dimensions
    Size {
        /// Task id (defaults to services.renderer.task_id)
        #[arg(long)]
        task: Option<i64>,

        #[arg(long)]
        image_id: i64,
    },

    /// Fetch a rendered frame and write it to a file
    Fetch {
        /// Task id (defaults to services.renderer.task_id)
        #[arg(long)]
        task: Option<i64>,

        #[arg(long)]
        image_id: i64,

        #[arg(long, default_value_t = 0)]
        width: i32,

        #[arg(long, default_value_t = 0)]
        height: i32,

        #[command(flatten)]
        encoding: EncodingArgs,

        /// Output file
        #[arg(short, long)]
        out: PathBuf,
    },
}

#[derive(Debug, Serialize)]
struct SizeReport {
    task_id: i64,
    image_id: i64,
    #[serde(flatten)]
    size: ImageSize,
}

pub async fn execute(
    action: RenderAction,
    config: &PrismConfig,
    format: OutputFormat,
) -> Result<String> {
    let client = ImageRendererClient::new(
        config.services.renderer.endpoint(),
        config.channel.options(),
    )?;
    run(&client, action, config, format).await
}

pub async fn run<R: ImageRendererRpc>(
    client: &ImageRendererClient<R>,
    action: RenderAction,
    config: &PrismConfig,
    format: OutputFormat,
) -> Result<String> {
    let service = &config.services.renderer;

    match action {
        RenderAction::Size { task, image_id } => {
            let task_id = resolve_task(task, service, "renderer")?;
            let size = client.get_image_size_by_image_id(task_id, image_id).await?;
            let report = SizeReport {
                task_id,
                image_id,
                size,
            };
            render(&report, format, |r| {
                format!("Task {} image {}: {}", r.task_id, r.image_id, r.size)
            })
        }
        RenderAction::Fetch {
            task,
            image_id,
            width,
            height,
            encoding,
            out,
        } => {
            let task_id = resolve_task(task, service, "renderer")?;
            let image = client
                .get_image_buffer_by_image_id(task_id, image_id, width, height, &encoding.encoding())
                .await?;
            let report = write_buffer(&out, image.image_id, &image.buffer).await?;
            render(&report, format, FetchReport::text)
        }
    }
}
