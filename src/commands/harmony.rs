/*!
 * `prism harmony`: frames from an image loader
 */

use super::{render, write_buffer, EncodingArgs, FetchReport, OutputFormat};
use crate::config::PrismConfig;
use crate::error::Result;
use clap::Subcommand;
use prism_connect::{ImageHarmonyClient, ImageHarmonyRpc, ImageSize};
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, Subcommand)]
pub enum HarmonyAction {
    /// Print a frame's dimensions
    Size {
        /// Hash of the image loader's arguments
        #[arg(long)]
        loader_hash: i64,

        #[arg(long)]
        image_id: i64,
    },

    /// Fetch an encoded frame and write it to a file
    Fetch {
        /// Hash of the image loader's arguments
        #[arg(long)]
        loader_hash: i64,

        #[arg(long)]
        image_id: i64,

        /// Requested width
        #[arg(long, default_value_t = 0)]
        width: i32,

        /// Requested height
        #[arg(long, default_value_t = 0)]
        height: i32,

        #[command(flatten)]
        encoding: EncodingArgs,

        /// Output file
        #[arg(short, long)]
        out: PathBuf,
    },
}

impl HarmonyAction {
    fn loader_hash(&self) -> i64 {
        match self {
            HarmonyAction::Size { loader_hash, .. } | HarmonyAction::Fetch { loader_hash, .. } => {
                *loader_hash
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct SizeReport {
    image_id: i64,
    #[serde(flatten)]
    size: ImageSize,
}

pub async fn execute(
    action: HarmonyAction,
    config: &PrismConfig,
    format: OutputFormat,
) -> Result<String> {
    let client = ImageHarmonyClient::new(
        config.services.harmony.endpoint(),
        config.channel.options(),
    )?;
    run(client, action, format).await
}

/// Bind the loader, perform the action, and always release the loader.
pub async fn run<R: ImageHarmonyRpc>(
    mut client: ImageHarmonyClient<R>,
    action: HarmonyAction,
    format: OutputFormat,
) -> Result<String> {
    client.connect_image_loader(action.loader_hash()).await?;

    let outcome = perform(&client, action, format).await;

    if let Err(e) = client.disconnect_image_loader().await {
        warn!("Failed to release image loader: {}", e);
    }

    outcome
}

async fn perform<R: ImageHarmonyRpc>(
    client: &ImageHarmonyClient<R>,
    action: HarmonyAction,
    format: OutputFormat,
) -> Result<String> {
    match action {
        HarmonyAction::Size { image_id, .. } => {
            let size = client.get_image_size_by_image_id(image_id).await?;
            render(&SizeReport { image_id, size }, format, |r| {
                format!("Image {}: {}", r.image_id, r.size)
            })
        }
        HarmonyAction::Fetch {
            image_id,
            width,
            height,
            encoding,
            out,
            ..
        } => {
            let image = client
                .get_image_buffer_by_image_id(image_id, width, height, &encoding.encoding())
                .await?;
            let report = write_buffer(&out, image.image_id, &image.buffer).await?;
            render(&report, format, FetchReport::text)
        }
    }
}
