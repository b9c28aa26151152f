// @generated from proto/image_harmony.proto
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Response {
    #[prost(int32, tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CustomImageRequest {
    #[prost(int64, tag = "1")]
    pub image_id: i64,
    #[prost(string, tag = "2")]
    pub format: ::prost::alloc::string::String,
    #[prost(int32, repeated, tag = "3")]
    pub params: ::prost::alloc::vec::Vec<i32>,
    #[prost(int32, tag = "4")]
    pub expected_w: i32,
    #[prost(int32, tag = "5")]
    pub expected_h: i32,
    #[prost(bool, tag = "6")]
    pub no_image_buffer: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CustomImageResponse {
    #[prost(int64, tag = "1")]
    pub image_id: i64,
    #[prost(bytes = "vec", tag = "2")]
    pub buffer: ::prost::alloc::vec::Vec<u8>,
    #[prost(int32, tag = "3")]
    pub width: i32,
    #[prost(int32, tag = "4")]
    pub height: i32,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ConnectImageLoaderRequest {
    #[prost(int64, tag = "1")]
    pub loader_args_hash: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConnectImageLoaderResponse {
    #[prost(message, optional, tag = "1")]
    pub response: ::core::option::Option<Response>,
    #[prost(int64, tag = "2")]
    pub connection_id: i64,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct DisconnectImageLoaderRequest {
    #[prost(int64, tag = "1")]
    pub connection_id: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DisconnectImageLoaderResponse {
    #[prost(message, optional, tag = "1")]
    pub response: ::core::option::Option<Response>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetImageByImageIdRequest {
    #[prost(int64, tag = "1")]
    pub connection_id: i64,
    #[prost(message, optional, tag = "2")]
    pub image_request: ::core::option::Option<CustomImageRequest>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetImageByImageIdResponse {
    #[prost(message, optional, tag = "1")]
    pub response: ::core::option::Option<Response>,
    #[prost(message, optional, tag = "2")]
    pub image_response: ::core::option::Option<CustomImageResponse>,
}
/// Generated client implementations.
pub mod communicate_client {
    #![allow(
        unused_variables,
        dead_code,
        missing_docs,
        clippy::wildcard_imports,
        clippy::let_unit_value
    )]
    use tonic::codegen::http::Uri;
    use tonic::codegen::*;
    #[derive(Debug, Clone)]
    pub struct CommunicateClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl CommunicateClient<tonic::transport::Channel> {
        /// Attempt to create a new client by connecting to a given endpoint.
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> CommunicateClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::Body>,
        T::Error: Into<StdError>,
        T::ResponseBody: Body<Data = Bytes> + std::marker::Send + 'static,
        <T::ResponseBody as Body>::Error: Into<StdError> + std::marker::Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_origin(inner: T, origin: Uri) -> Self {
            let inner = tonic::client::Grpc::with_origin(inner, origin);
            Self { inner }
        }
        /// Limits the maximum size of a decoded message.
        ///
        /// Default: `4MB`
        #[must_use]
        pub fn max_decoding_message_size(mut self, limit: usize) -> Self {
            self.inner = self.inner.max_decoding_message_size(limit);
            self
        }
        /// Limits the maximum size of an encoded message.
        ///
        /// Default: `usize::MAX`
        #[must_use]
        pub fn max_encoding_message_size(mut self, limit: usize) -> Self {
            self.inner = self.inner.max_encoding_message_size(limit);
            self
        }
        pub async fn connect_image_loader(
            &mut self,
            request: impl tonic::IntoRequest<super::ConnectImageLoaderRequest>,
        ) -> std::result::Result<
            tonic::Response<super::ConnectImageLoaderResponse>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::unknown(
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic_prost::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/image_harmony.Communicate/connectImageLoader",
            );
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(
                    GrpcMethod::new("image_harmony.Communicate", "connectImageLoader"),
                );
            self.inner.unary(req, path, codec).await
        }
        pub async fn disconnect_image_loader(
            &mut self,
            request: impl tonic::IntoRequest<super::DisconnectImageLoaderRequest>,
        ) -> std::result::Result<
            tonic::Response<super::DisconnectImageLoaderResponse>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::unknown(
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic_prost::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/image_harmony.Communicate/disconnectImageLoader",
            );
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(
                    GrpcMethod::new("image_harmony.Communicate", "disconnectImageLoader"),
                );
            self.inner.unary(req, path, codec).await
        }
        pub async fn get_image_by_image_id(
            &mut self,
            request: impl tonic::IntoRequest<super::GetImageByImageIdRequest>,
        ) -> std::result::Result<
            tonic::Response<super::GetImageByImageIdResponse>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::unknown(
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic_prost::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/image_harmony.Communicate/getImageByImageId",
            );
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("image_harmony.Communicate", "getImageByImageId"));
            self.inner.unary(req, path, codec).await
        }
    }
}
