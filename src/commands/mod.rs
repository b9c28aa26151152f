/*!
 * Subcommand handlers
 *
 * Each handler builds its client from the configuration, performs one
 * action and returns the text to print. The `run` functions are generic over
 * the client transport.
 */

pub mod coordinator;
pub mod detect;
pub mod harmony;
pub mod render;
pub mod track;

use crate::config::ServiceConfig;
use crate::error::{PrismError, Result};
use clap::{Args, ValueEnum};
use prism_connect::ImageEncoding;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Render `value` as pretty JSON, or through `text`.
pub fn render<T: Serialize>(
    value: &T,
    format: OutputFormat,
    text: impl FnOnce(&T) -> String,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Text => Ok(text(value)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImageFormat {
    Jpg,
    Png,
    Webp,
}

/// Encoding flags shared by the fetch actions
#[derive(Debug, Clone, Args)]
pub struct EncodingArgs {
    /// Encoding requested from the service
    #[arg(long, value_enum, default_value = "jpg")]
    pub format: ImageFormat,

    /// JPEG/WebP quality or PNG compression level
    #[arg(long)]
    pub quality: Option<u8>,
}

impl EncodingArgs {
    pub fn encoding(&self) -> ImageEncoding {
        match (self.format, self.quality) {
            (ImageFormat::Jpg, None) => ImageEncoding::default(),
            (ImageFormat::Jpg, Some(quality)) => ImageEncoding::jpeg(quality),
            (ImageFormat::Png, level) => ImageEncoding::png(level.unwrap_or(3)),
            (ImageFormat::Webp, quality) => ImageEncoding::webp(quality.unwrap_or(80)),
        }
    }
}

/// Outcome of a fetch action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchReport {
    pub image_id: i64,
    pub bytes: usize,
    pub path: PathBuf,
}

impl FetchReport {
    fn text(&self) -> String {
        format!(
            "Wrote {} bytes for image ID {} to {}",
            self.bytes,
            self.image_id,
            self.path.display()
        )
    }
}

/// Write an encoded frame as-is.
pub async fn write_buffer(path: &Path, image_id: i64, buffer: &[u8]) -> Result<FetchReport> {
    if buffer.is_empty() {
        return Err(prism_connect::ClientError::EmptyImage(image_id).into());
    }

    tokio::fs::write(path, buffer).await?;
    info!(bytes = buffer.len(), "Saved image ID {} to {}", image_id, path.display());

    Ok(FetchReport {
        image_id,
        bytes: buffer.len(),
        path: path.to_path_buf(),
    })
}

/// Task id from the command line, else from the service's configuration.
pub fn resolve_task(
    explicit: Option<i64>,
    service: &ServiceConfig,
    name: &'static str,
) -> Result<i64> {
    explicit
        .or(service.task_id)
        .ok_or(PrismError::MissingTask(name))
}

/// Parse a `key=value` command line argument.
pub fn parse_key_value(arg: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", arg))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", arg));
    }
    Ok((key.to_string(), value.to_string()))
}
