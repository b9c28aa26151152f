// @generated from proto/target_detection.proto
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Response {
    #[prost(int32, tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct GetResultMappingTableRequest {
    #[prost(int64, tag = "1")]
    pub task_id: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetResultMappingTableResponse {
    #[prost(message, optional, tag = "1")]
    pub response: ::core::option::Option<Response>,
    #[prost(string, repeated, tag = "2")]
    pub labels: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct GetResultIndexByImageIdRequest {
    #[prost(int64, tag = "1")]
    pub task_id: i64,
    #[prost(int64, tag = "2")]
    pub image_id: i64,
    #[prost(bool, tag = "3")]
    pub wait: bool,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Result {
    #[prost(int32, tag = "1")]
    pub label_id: i32,
    #[prost(float, tag = "2")]
    pub x1: f32,
    #[prost(float, tag = "3")]
    pub y1: f32,
    #[prost(float, tag = "4")]
    pub x2: f32,
    #[prost(float, tag = "5")]
    pub y2: f32,
    #[prost(float, tag = "6")]
    pub confidence: f32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetResultIndexByImageIdResponse {
    #[prost(message, optional, tag = "1")]
    pub response: ::core::option::Option<Response>,
    #[prost(message, repeated, tag = "2")]
    pub results: ::prost::alloc::vec::Vec<Result>,
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
        pub async fn get_result_mapping_table(
            &mut self,
            request: impl tonic::IntoRequest<super::GetResultMappingTableRequest>,
        ) -> std::result::Result<
            tonic::Response<super::GetResultMappingTableResponse>,
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
                "/target_detection.Communicate/getResultMappingTable",
            );
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("target_detection.Communicate", "getResultMappingTable"));
            self.inner.unary(req, path, codec).await
        }
        pub async fn get_result_index_by_image_id(
            &mut self,
            request: impl tonic::IntoRequest<super::GetResultIndexByImageIdRequest>,
        ) -> std::result::Result<
            tonic::Response<super::GetResultIndexByImageIdResponse>,
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
                "/target_detection.Communicate/getResultIndexByImageId",
            );
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("target_detection.Communicate", "getResultIndexByImageId"));
            self.inner.unary(req, path, codec).await
        }
    }
}
