//! Endpoint addressing and channel construction shared by every client

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

/// Decode limit for services that return encoded images (1 GiB).
pub const IMAGE_MESSAGE_LIMIT: usize = 1024 * 1024 * 1024;

/// Network address of one remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    pub host: String,
    pub port: u16,
}

impl ServiceEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// URI handed to tonic (plaintext HTTP/2).
    pub fn uri(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl fmt::Display for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for ServiceEndpoint {
    type Err = ClientError;

    /// Parses `host:port`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| ClientError::InvalidEndpoint {
            endpoint: s.to_string(),
            reason: reason.to_string(),
        };

        let (host, port) = s.rsplit_once(':').ok_or_else(|| invalid("expected host:port"))?;
        if host.is_empty() {
            return Err(invalid("missing host"));
        }
        let port = port
            .parse::<u16>()
            .map_err(|e| invalid(&format!("bad port: {}", e)))?;

        Ok(Self::new(host, port))
    }
}

/// Per-channel transport settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelOptions {
    /// Timeout for establishing the HTTP/2 connection
    pub connect_timeout: Option<Duration>,

    /// Deadline applied to every request on the channel
    pub request_timeout: Option<Duration>,

    /// Override for the largest response message accepted (tonic default: 4 MiB)
    pub max_decoding_message_size: Option<usize>,
}

impl ChannelOptions {
    /// Options for the image services: responses may carry full-size frames.
    pub fn for_images() -> Self {
        Self {
            max_decoding_message_size: Some(IMAGE_MESSAGE_LIMIT),
            ..Default::default()
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_max_decoding_message_size(mut self, limit: usize) -> Self {
        self.max_decoding_message_size = Some(limit);
        self
    }

    /// Keeps explicit settings and falls back to the image decode limit.
    pub fn or_image_limit(mut self) -> Self {
        if self.max_decoding_message_size.is_none() {
            self.max_decoding_message_size = Some(IMAGE_MESSAGE_LIMIT);
        }
        self
    }
}

/// Build a channel to `endpoint`.
///
/// The channel dials on first use, so constructing a client never blocks on
/// the network. Must be called from within a Tokio runtime.
pub fn open_channel(endpoint: &ServiceEndpoint, options: &ChannelOptions) -> Result<Channel> {
    let mut builder =
        Endpoint::from_shared(endpoint.uri()).map_err(|e| ClientError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

    if let Some(timeout) = options.connect_timeout {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = options.request_timeout {
        builder = builder.timeout(timeout);
    }

    debug!("Opening lazy channel to {}", endpoint);

    Ok(builder.connect_lazy())
}
