//! ImageHarmonyClient: image loading service
//!
//! The loader is bound per connection: callers first connect an image loader
//! (identified by the hash of its arguments), then fetch frames through the
//! returned connection id.

use crate::channel::{open_channel, ChannelOptions, ServiceEndpoint};
use crate::error::{Call, Result};
use crate::imaging::{DecodedImage, ImageBuffer, ImageEncoding, ImageSize};
use async_trait::async_trait;
use prism_proto::image_harmony::{
    communicate_client::CommunicateClient, ConnectImageLoaderRequest, ConnectImageLoaderResponse,
    CustomImageRequest, DisconnectImageLoaderRequest, DisconnectImageLoaderResponse,
    GetImageByImageIdRequest, GetImageByImageIdResponse,
};
use tonic::transport::Channel;
use tonic::Status;
use tracing::{debug, info};

const SERVICE: &str = "ImageHarmonyClient";

pub const DISCONNECTED: &str = "Disconnected from image loader";
pub const NOT_CONNECTED: &str = "Not connected to image loader";

/// Remote operations of `image_harmony.Communicate`.
#[async_trait]
pub trait ImageHarmonyRpc: Send + Sync {
    async fn connect_image_loader(
        &self,
        request: ConnectImageLoaderRequest,
    ) -> std::result::Result<ConnectImageLoaderResponse, Status>;

    async fn disconnect_image_loader(
        &self,
        request: DisconnectImageLoaderRequest,
    ) -> std::result::Result<DisconnectImageLoaderResponse, Status>;

    async fn get_image_by_image_id(
        &self,
        request: GetImageByImageIdRequest,
    ) -> std::result::Result<GetImageByImageIdResponse, Status>;
}

/// gRPC stub for the image loading service.
///
/// Cheap to clone (tonic's Channel is reference counted).
#[derive(Debug, Clone)]
pub struct ImageHarmonyStub {
    client: CommunicateClient<Channel>,
}

impl ImageHarmonyStub {
    pub fn new(channel: Channel, options: &ChannelOptions) -> Self {
        let mut client = CommunicateClient::new(channel);
        if let Some(limit) = options.max_decoding_message_size {
            client = client.max_decoding_message_size(limit);
        }
        Self { client }
    }
}

#[async_trait]
impl ImageHarmonyRpc for ImageHarmonyStub {
    async fn connect_image_loader(
        &self,
        request: ConnectImageLoaderRequest,
    ) -> std::result::Result<ConnectImageLoaderResponse, Status> {
        let mut client = self.client.clone();
        client
            .connect_image_loader(request)
            .await
            .map(tonic::Response::into_inner)
    }

    async fn disconnect_image_loader(
        &self,
        request: DisconnectImageLoaderRequest,
    ) -> std::result::Result<DisconnectImageLoaderResponse, Status> {
        let mut client = self.client.clone();
        client
            .disconnect_image_loader(request)
            .await
            .map(tonic::Response::into_inner)
    }

    async fn get_image_by_image_id(
        &self,
        request: GetImageByImageIdRequest,
    ) -> std::result::Result<GetImageByImageIdResponse, Status> {
        let mut client = self.client.clone();
        client
            .get_image_by_image_id(request)
            .await
            .map(tonic::Response::into_inner)
    }
}

/// Client for the image loading service.
///
/// # Example
///
/// ```rust,no_run
/// use prism_connect::{ImageEncoding, ImageHarmonyClient, ServiceEndpoint};
/// use prism_connect::ChannelOptions;
///
/// # async fn example() -> prism_connect::Result<()> {
/// let endpoint = ServiceEndpoint::new("10.0.0.5", 50051);
/// let mut client = ImageHarmonyClient::new(endpoint, ChannelOptions::default())?;
///
/// client.connect_image_loader(0x5eed).await?;
/// let frame = client
///     .get_image_by_image_id(42, 1280, 720, &ImageEncoding::default())
///     .await?;
/// println!("frame {} is {}x{}", frame.image_id, frame.width(), frame.height());
/// client.disconnect_image_loader().await?;
/// # Ok(())
/// # }
/// ```
pub struct ImageHarmonyClient<R = ImageHarmonyStub> {
    rpc: R,
    endpoint: ServiceEndpoint,
    /// Loader connection handed out by the service (0 = not connected)
    connection_id: i64,
}

impl ImageHarmonyClient {
    /// Open a channel to the service. The image decode limit applies unless
    /// `options` sets its own.
    pub fn new(endpoint: ServiceEndpoint, options: ChannelOptions) -> Result<Self> {
        let options = options.or_image_limit();
        let channel = open_channel(&endpoint, &options)?;
        let client = Self::with_rpc(ImageHarmonyStub::new(channel, &options), endpoint);
        info!("Image Harmony client initialized for {}", client.endpoint);
        Ok(client)
    }
}

impl<R: ImageHarmonyRpc> ImageHarmonyClient<R> {
    pub fn with_rpc(rpc: R, endpoint: ServiceEndpoint) -> Self {
        Self {
            rpc,
            endpoint,
            connection_id: 0,
        }
    }

    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    pub fn connection_id(&self) -> i64 {
        self.connection_id
    }

    pub fn is_connected(&self) -> bool {
        self.connection_id != 0
    }

    /// Bind an image loader and remember its connection id.
    ///
    /// Returns the service's message.
    #[tracing::instrument(
        skip(self),
        fields(otel.kind = "client", service = "image_harmony", endpoint = %self.endpoint),
        err
    )]
    pub async fn connect_image_loader(&mut self, loader_args_hash: i64) -> Result<String> {
        let call = Call::new(SERVICE, "connect image loader", &self.endpoint);

        let response = self
            .rpc
            .connect_image_loader(ConnectImageLoaderRequest { loader_args_hash })
            .await
            .map_err(|status| call.rpc_error(status))?;
        call.check(response.response.as_ref())?;

        self.connection_id = response.connection_id;
        let message = response.response.map(|r| r.message).unwrap_or_default();

        info!(
            connection_id = self.connection_id,
            "Connected to image loader: {}", message
        );

        Ok(message)
    }

    /// Release the current loader connection.
    ///
    /// Without a connection no remote call is made.
    #[tracing::instrument(
        skip(self),
        fields(
            otel.kind = "client",
            service = "image_harmony",
            endpoint = %self.endpoint,
            connection_id = self.connection_id
        ),
        err
    )]
    pub async fn disconnect_image_loader(&mut self) -> Result<String> {
        if self.connection_id == 0 {
            debug!("{}", NOT_CONNECTED);
            return Ok(NOT_CONNECTED.to_string());
        }

        let call = Call::new(SERVICE, "disconnect image loader", &self.endpoint);

        let response = self
            .rpc
            .disconnect_image_loader(DisconnectImageLoaderRequest {
                connection_id: self.connection_id,
            })
            .await
            .map_err(|status| call.rpc_error(status))?;
        call.check(response.response.as_ref())?;

        self.connection_id = 0;
        info!(
            "Disconnected from image loader: {}",
            response.response.map(|r| r.message).unwrap_or_default()
        );

        Ok(DISCONNECTED.to_string())
    }

    async fn fetch_buffer(
        &self,
        operation: &'static str,
        image_id: i64,
        width: i32,
        height: i32,
        encoding: &ImageEncoding,
    ) -> Result<ImageBuffer> {
        let call = Call::new(SERVICE, operation, &self.endpoint);

        let request = GetImageByImageIdRequest {
            connection_id: self.connection_id,
            image_request: Some(CustomImageRequest {
                image_id,
                format: encoding.format.clone(),
                params: encoding.params.clone(),
                expected_w: width,
                expected_h: height,
                no_image_buffer: false,
            }),
        };

        let response = self
            .rpc
            .get_image_by_image_id(request)
            .await
            .map_err(|status| call.rpc_error(status))?;
        call.check(response.response.as_ref())?;

        let image = response.image_response.unwrap_or_default();
        debug!("Received {} bytes for image ID: {}", image.buffer.len(), image.image_id);

        Ok(ImageBuffer {
            image_id: image.image_id,
            buffer: image.buffer,
        })
    }

    /// Fetch the encoded image, resized by the service to `width` x `height`.
    #[tracing::instrument(
        skip(self, encoding),
        fields(
            otel.kind = "client",
            service = "image_harmony",
            endpoint = %self.endpoint,
            connection_id = self.connection_id,
            format = %encoding.format
        ),
        err
    )]
    pub async fn get_image_buffer_by_image_id(
        &self,
        image_id: i64,
        width: i32,
        height: i32,
        encoding: &ImageEncoding,
    ) -> Result<ImageBuffer> {
        self.fetch_buffer("get image buffer", image_id, width, height, encoding)
            .await
    }

    /// Fetch and decode the image as a color frame.
    #[tracing::instrument(
        skip(self, encoding),
        fields(
            otel.kind = "client",
            service = "image_harmony",
            endpoint = %self.endpoint,
            connection_id = self.connection_id,
            format = %encoding.format
        ),
        err
    )]
    pub async fn get_image_by_image_id(
        &self,
        image_id: i64,
        width: i32,
        height: i32,
        encoding: &ImageEncoding,
    ) -> Result<DecodedImage> {
        let decoded = self
            .fetch_buffer("get image", image_id, width, height, encoding)
            .await?
            .decode()?;

        info!("Successfully decoded image for image ID: {}", decoded.image_id);

        Ok(decoded)
    }

    /// Query the stored image's dimensions without transferring pixels.
    #[tracing::instrument(
        skip(self),
        fields(
            otel.kind = "client",
            service = "image_harmony",
            endpoint = %self.endpoint,
            connection_id = self.connection_id
        ),
        err
    )]
    pub async fn get_image_size_by_image_id(&self, image_id: i64) -> Result<ImageSize> {
        let call = Call::new(SERVICE, "get image size", &self.endpoint);

        let request = GetImageByImageIdRequest {
            connection_id: self.connection_id,
            image_request: Some(CustomImageRequest {
                image_id,
                no_image_buffer: true,
                ..Default::default()
            }),
        };

        let response = self
            .rpc
            .get_image_by_image_id(request)
            .await
            .map_err(|status| call.rpc_error(status))?;
        call.check(response.response.as_ref())?;

        let image = response.image_response.unwrap_or_default();
        let size = ImageSize {
            width: image.width,
            height: image.height,
        };

        info!("Retrieved image size {} for image ID: {}", size, image_id);

        Ok(size)
    }
}
