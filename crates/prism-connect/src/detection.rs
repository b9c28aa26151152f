//! TargetDetectionClient: per-image detection results for one task
//!
//! The client caches the service's label mapping table at construction and
//! filters results locally by label id.

use crate::channel::{open_channel, ChannelOptions, ServiceEndpoint};
use crate::error::{Call, ClientError, Result};
use crate::filter::LabelFilter;
use crate::labels::LabelMap;
use async_trait::async_trait;
use prism_proto::target_detection::{
    communicate_client::CommunicateClient, GetResultIndexByImageIdRequest,
    GetResultIndexByImageIdResponse, GetResultMappingTableRequest, GetResultMappingTableResponse,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tonic::transport::Channel;
use tonic::Status;
use tracing::{debug, info, warn};

const SERVICE: &str = "TargetDetectionClient";

/// Remote operations of `target_detection.Communicate`.
#[async_trait]
pub trait TargetDetectionRpc: Send + Sync {
    async fn get_result_mapping_table(
        &self,
        request: GetResultMappingTableRequest,
    ) -> std::result::Result<GetResultMappingTableResponse, Status>;

    async fn get_result_index_by_image_id(
        &self,
        request: GetResultIndexByImageIdRequest,
    ) -> std::result::Result<GetResultIndexByImageIdResponse, Status>;
}

/// gRPC stub for the detection service.
#[derive(Debug, Clone)]
pub struct TargetDetectionStub {
    client: CommunicateClient<Channel>,
}

impl TargetDetectionStub {
    pub fn new(channel: Channel, options: &ChannelOptions) -> Self {
        let mut client = CommunicateClient::new(channel);
        if let Some(limit) = options.max_decoding_message_size {
            client = client.max_decoding_message_size(limit);
        }
        Self { client }
    }
}

#[async_trait]
impl TargetDetectionRpc for TargetDetectionStub {
    async fn get_result_mapping_table(
        &self,
        request: GetResultMappingTableRequest,
    ) -> std::result::Result<GetResultMappingTableResponse, Status> {
        let mut client = self.client.clone();
        client
            .get_result_mapping_table(request)
            .await
            .map(tonic::Response::into_inner)
    }

    async fn get_result_index_by_image_id(
        &self,
        request: GetResultIndexByImageIdRequest,
    ) -> std::result::Result<GetResultIndexByImageIdResponse, Status> {
        let mut client = self.client.clone();
        client
            .get_result_index_by_image_id(request)
            .await
            .map(tonic::Response::into_inner)
    }
}

/// A single detection: label id, corner coordinates and confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub label_id: i32,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub confidence: f32,
}

impl Detection {
    /// A detection with full confidence.
    pub fn new(label_id: i32, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            label_id,
            x1,
            y1,
            x2,
            y2,
            confidence: 1.0,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }
}

impl From<prism_proto::target_detection::Result> for Detection {
    fn from(result: prism_proto::target_detection::Result) -> Self {
        Self {
            label_id: result.label_id,
            x1: result.x1,
            y1: result.y1,
            x2: result.x2,
            y2: result.y2,
            confidence: result.confidence,
        }
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Label ID: {}, Coordinates: ({}, {}), ({}, {}), Confidence: {}",
            self.label_id, self.x1, self.y1, self.x2, self.y2, self.confidence
        )
    }
}

/// Client for the detection service, bound to one task.
///
/// # Example
///
/// ```rust,no_run
/// use prism_connect::{ChannelOptions, ServiceEndpoint, TargetDetectionClient};
///
/// # async fn example() -> prism_connect::Result<()> {
/// let endpoint = ServiceEndpoint::new("10.0.0.5", 50053);
/// let mut client = TargetDetectionClient::connect(endpoint, 1, ChannelOptions::default()).await?;
///
/// // Only keep people
/// let person = client.query_label_id("person")?;
/// client.filter_mut().clear();
/// client.filter_mut().add(person);
///
/// for detection in client.get_result_by_image_id(42).await? {
///     println!("{}", detection);
/// }
/// # Ok(())
/// # }
/// ```
pub struct TargetDetectionClient<R = TargetDetectionStub> {
    rpc: R,
    endpoint: ServiceEndpoint,
    task_id: i64,
    labels: LabelMap,
    filter: LabelFilter<i32>,
}

impl TargetDetectionClient {
    /// Open a channel and fetch the label mapping table for `task_id`.
    pub async fn connect(
        endpoint: ServiceEndpoint,
        task_id: i64,
        options: ChannelOptions,
    ) -> Result<Self> {
        let channel = open_channel(&endpoint, &options)?;
        Self::with_rpc(TargetDetectionStub::new(channel, &options), endpoint, task_id).await
    }
}

impl<R: TargetDetectionRpc> TargetDetectionClient<R> {
    /// Build a client over `rpc`, fetching the mapping table once.
    ///
    /// The filter starts out accepting every label in the table.
    pub async fn with_rpc(rpc: R, endpoint: ServiceEndpoint, task_id: i64) -> Result<Self> {
        let mut client = Self {
            rpc,
            endpoint,
            task_id,
            labels: LabelMap::default(),
            filter: LabelFilter::new(),
        };

        client.get_result_mapping_table().await?;
        client.filter = LabelFilter::with_label_count(client.labels.len());

        info!(
            labels = client.labels.len(),
            "Initialized TargetDetectionClient with Task ID: {}", task_id
        );

        Ok(client)
    }

    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    pub fn task_id(&self) -> i64 {
        self.task_id
    }

    /// The cached mapping table
    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    pub fn filter(&self) -> &LabelFilter<i32> {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut LabelFilter<i32> {
        &mut self.filter
    }

    pub fn convert_id_to_label(&self, label_id: i32) -> Result<&str> {
        let Some(label) = self.labels.label(label_id) else {
            warn!("No label for ID {} in {} entries", label_id, self.labels.len());
            return Err(ClientError::UnknownLabelId(label_id));
        };

        debug!("Converted label ID {} to label '{}'", label_id, label);

        Ok(label)
    }

    pub fn query_label_id(&self, label: &str) -> Result<i32> {
        let Some(id) = self.labels.id_of(label) else {
            warn!("No ID for label '{}' in {} entries", label, self.labels.len());
            return Err(ClientError::UnknownLabel(label.to_string()));
        };

        debug!("Found ID {} for label '{}'", id, label);

        Ok(id)
    }

    /// Refetch the mapping table and replace the cache.
    ///
    /// The filter is left untouched.
    #[tracing::instrument(
        skip(self),
        fields(
            otel.kind = "client",
            service = "target_detection",
            endpoint = %self.endpoint,
            task_id = self.task_id
        ),
        err
    )]
    pub async fn get_result_mapping_table(&mut self) -> Result<&LabelMap> {
        let call = Call::new(SERVICE, "get result mapping table", &self.endpoint);

        let response = self
            .rpc
            .get_result_mapping_table(GetResultMappingTableRequest {
                task_id: self.task_id,
            })
            .await
            .map_err(|status| call.rpc_error(status))?;
        call.check(response.response.as_ref())?;

        self.labels = LabelMap::from_labels(response.labels);
        info!(labels = self.labels.len(), "Fetched result mapping table");

        Ok(&self.labels)
    }

    /// Detections for `image_id` that pass the filter.
    ///
    /// The service holds the call until results for the image exist.
    #[tracing::instrument(
        skip(self),
        fields(
            otel.kind = "client",
            service = "target_detection",
            endpoint = %self.endpoint,
            task_id = self.task_id
        ),
        err
    )]
    pub async fn get_result_by_image_id(&self, image_id: i64) -> Result<Vec<Detection>> {
        let call = Call::new(SERVICE, "get result", &self.endpoint);

        let response = self
            .rpc
            .get_result_index_by_image_id(GetResultIndexByImageIdRequest {
                task_id: self.task_id,
                image_id,
                wait: true,
            })
            .await
            .map_err(|status| call.rpc_error(status))?;
        call.check(response.response.as_ref())?;

        let received = response.results.len();
        let results: Vec<Detection> = response
            .results
            .into_iter()
            .filter(|result| self.filter.check(&result.label_id))
            .map(Detection::from)
            .collect();

        info!(
            received,
            "Retrieved {} filtered results for image ID: {}",
            results.len(),
            image_id
        );

        Ok(results)
    }
}
