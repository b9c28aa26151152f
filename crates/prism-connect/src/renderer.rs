//! ImageRendererClient: rendered (annotated) frames keyed by task

use crate::channel::{open_channel, ChannelOptions, ServiceEndpoint};
use crate::error::{Call, Result};
use crate::imaging::{DecodedImage, ImageBuffer, ImageEncoding, ImageSize};
use async_trait::async_trait;
use prism_proto::image_renderer::{
    communicate_client::CommunicateClient, CustomImageRequest, GetImageByImageIdRequest,
    GetImageByImageIdResponse,
};
use tonic::transport::Channel;
use tonic::Status;
use tracing::{debug, info};

const SERVICE: &str = "ImageRendererClient";

/// Remote operations of `image_renderer.Communicate`.
#[async_trait]
pub trait ImageRendererRpc: Send + Sync {
    async fn get_image_by_image_id(
        &self,
        request: GetImageByImageIdRequest,
    ) -> std::result::Result<GetImageByImageIdResponse, Status>;
}

/// gRPC stub for the image rendering service.
#[derive(Debug, Clone)]
pub struct ImageRendererStub {
    client: CommunicateClient<Channel>,
}

impl ImageRendererStub {
    pub fn new(channel: Channel, options: &ChannelOptions) -> Self {
        let mut client = CommunicateClient::new(channel);
        if let Some(limit) = options.max_decoding_message_size {
            client = client.max_decoding_message_size(limit);
        }
        Self { client }
    }
}

#[async_trait]
impl ImageRendererRpc for ImageRendererStub {
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

/// Client for the image rendering service.
pub struct ImageRendererClient<R = ImageRendererStub> {
    rpc: R,
    endpoint: ServiceEndpoint,
}

impl ImageRendererClient {
    pub fn new(endpoint: ServiceEndpoint, options: ChannelOptions) -> Result<Self> {
        let options = options.or_image_limit();
        let channel = open_channel(&endpoint, &options)?;
        let client = Self::with_rpc(ImageRendererStub::new(channel, &options), endpoint);
        info!("Image Renderer client initialized for {}", client.endpoint);
        Ok(client)
    }
}

impl<R: ImageRendererRpc> ImageRendererClient<R> {
    pub fn with_rpc(rpc: R, endpoint: ServiceEndpoint) -> Self {
        Self { rpc, endpoint }
    }

    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    async fn fetch(
        &self,
        operation: &'static str,
        task_id: i64,
        image_request: CustomImageRequest,
    ) -> Result<GetImageByImageIdResponse> {
        let call = Call::new(SERVICE, operation, &self.endpoint);

        let response = self
            .rpc
            .get_image_by_image_id(GetImageByImageIdRequest {
                task_id,
                image_request: Some(image_request),
            })
            .await
            .map_err(|status| call.rpc_error(status))?;
        call.check(response.response.as_ref())?;

        Ok(response)
    }

    async fn fetch_buffer(
        &self,
        operation: &'static str,
        task_id: i64,
        image_id: i64,
        width: i32,
        height: i32,
        encoding: &ImageEncoding,
    ) -> Result<ImageBuffer> {
        let image_request = CustomImageRequest {
            image_id,
            format: encoding.format.clone(),
            params: encoding.params.clone(),
            expected_w: width,
            expected_h: height,
            no_image_buffer: false,
        };

        let image = self
            .fetch(operation, task_id, image_request)
            .await?
            .image_response
            .unwrap_or_default();

        debug!(
            "Received {} bytes for image ID: {}, task ID: {}",
            image.buffer.len(),
            image.image_id,
            task_id
        );

        Ok(ImageBuffer {
            image_id: image.image_id,
            buffer: image.buffer,
        })
    }

    /// Fetch the rendered frame for `image_id` of `task_id`, encoded as requested.
    #[tracing::instrument(
        skip(self, encoding),
        fields(
            otel.kind = "client",
            service = "image_renderer",
            endpoint = %self.endpoint,
            format = %encoding.format
        ),
        err
    )]
    pub async fn get_image_buffer_by_image_id(
        &self,
        task_id: i64,
        image_id: i64,
        width: i32,
        height: i32,
        encoding: &ImageEncoding,
    ) -> Result<ImageBuffer> {
        self.fetch_buffer("get image buffer", task_id, image_id, width, height, encoding)
            .await
    }

    /// Fetch and decode the rendered frame.
    #[tracing::instrument(
        skip(self, encoding),
        fields(
            otel.kind = "client",
            service = "image_renderer",
            endpoint = %self.endpoint,
            format = %encoding.format
        ),
        err
    )]
    pub async fn get_image_by_image_id(
        &self,
        task_id: i64,
        image_id: i64,
        width: i32,
        height: i32,
        encoding: &ImageEncoding,
    ) -> Result<DecodedImage> {
        let decoded = self
            .fetch_buffer("get image", task_id, image_id, width, height, encoding)
            .await?
            .decode()?;

        info!(
            "Successfully decoded image for image ID: {}, task ID: {}",
            decoded.image_id, task_id
        );

        Ok(decoded)
    }

    /// Query a rendered frame's dimensions without transferring pixels.
    #[tracing::instrument(
        skip(self),
        fields(otel.kind = "client", service = "image_renderer", endpoint = %self.endpoint),
        err
    )]
    pub async fn get_image_size_by_image_id(&self, task_id: i64, image_id: i64) -> Result<ImageSize> {
        let image_request = CustomImageRequest {
            image_id,
            no_image_buffer: true,
            ..Default::default()
        };

        let image = self
            .fetch("get image size", task_id, image_request)
            .await?
            .image_response
            .unwrap_or_default();

        let size = ImageSize {
            width: image.width,
            height: image.height,
        };

        info!(
            "Retrieved image size {} for image ID: {}, task ID: {}",
            size, image_id, task_id
        );

        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::imaging::tests::sample_png;
    use crate::imaging::IMWRITE_WEBP_QUALITY;
    use crate::test_support::CapturedLogs;
    use prism_proto::image_renderer::{CustomImageResponse, Response};
    use std::sync::Mutex;

    /// Renderer that only knows task 1.
    struct MockRenderer {
        frame: Vec<u8>,
        requests: Mutex<Vec<GetImageByImageIdRequest>>,
    }

    impl MockRenderer {
        fn new(frame: Vec<u8>) -> Self {
            Self {
                frame,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ImageRendererRpc for MockRenderer {
        async fn get_image_by_image_id(
            &self,
            request: GetImageByImageIdRequest,
        ) -> std::result::Result<GetImageByImageIdResponse, Status> {
            self.requests.lock().unwrap().push(request.clone());

            if request.task_id != 1 {
                return Ok(GetImageByImageIdResponse {
                    response: Some(Response {
                        code: 404,
                        message: format!("task {} not found", request.task_id),
                    }),
                    image_response: None,
                });
            }

            let image_request = request.image_request.unwrap_or_default();
            Ok(GetImageByImageIdResponse {
                response: Some(Response {
                    code: 200,
                    message: "OK".to_string(),
                }),
                image_response: Some(CustomImageResponse {
                    image_id: image_request.image_id,
                    buffer: if image_request.no_image_buffer {
                        Vec::new()
                    } else {
                        self.frame.clone()
                    },
                    width: 1920,
                    height: 1080,
                }),
            })
        }
    }

    fn client(frame: Vec<u8>) -> ImageRendererClient<MockRenderer> {
        ImageRendererClient::with_rpc(MockRenderer::new(frame), ServiceEndpoint::new("127.0.0.1", 50052))
    }

    #[tokio::test]
    async fn test_buffer_is_keyed_by_task() {
        let client = client(vec![9, 9, 9]);

        let buffer = client
            .get_image_buffer_by_image_id(1, 77, 640, 360, &ImageEncoding::webp(75))
            .await
            .unwrap();
        assert_eq!(buffer.image_id, 77);
        assert_eq!(buffer.buffer, vec![9, 9, 9]);

        let requests = client.rpc.requests.lock().unwrap();
        assert_eq!(requests[0].task_id, 1);
        let image_request = requests[0].image_request.as_ref().unwrap();
        assert_eq!(image_request.params, vec![IMWRITE_WEBP_QUALITY, 75]);
        assert_eq!(image_request.format, ".webp");
    }

    #[tokio::test]
    async fn test_unknown_task_reports_remote_message() {
        let client = client(Vec::new());

        let err = client
            .get_image_buffer_by_image_id(8, 77, 640, 360, &ImageEncoding::default())
            .await
            .unwrap_err();

        match err {
            ClientError::Remote { code, message, .. } => {
                assert_eq!(code, 404);
                assert_eq!(message, "task 8 not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_decode_rendered_frame() {
        let client = client(sample_png(5, 5));

        let frame = client
            .get_image_by_image_id(1, 4, 5, 5, &ImageEncoding::default())
            .await
            .unwrap();
        assert_eq!(frame.image_id, 4);
        assert_eq!(frame.width(), 5);
    }

    #[tokio::test]
    async fn test_undecodable_frame_logged_once() {
        let (logs, _guard) = CapturedLogs::install();
        let client = client(vec![1, 2, 3]);

        let err = client
            .get_image_by_image_id(1, 4, 5, 5, &ImageEncoding::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Decode { image_id: 4, .. }));
        assert_eq!(logs.count("ERROR"), 1);
        assert!(logs.contents().contains("get_image_by_image_id{"));
        assert!(logs.contents().contains("Failed to decode image for image ID: 4"));
    }

    #[tokio::test]
    async fn test_size_by_task() {
        let client = client(sample_png(5, 5));

        let size = client.get_image_size_by_image_id(1, 4).await.unwrap();
        assert_eq!(size.to_string(), "1920x1080");

        let requests = client.rpc.requests.lock().unwrap();
        let image_request = requests[0].image_request.as_ref().unwrap();
        assert!(image_request.no_image_buffer);
        assert!(image_request.format.is_empty());
    }
}
