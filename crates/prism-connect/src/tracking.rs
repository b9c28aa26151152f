//! TargetTrackingClient: per-image track histories for one task

use crate::channel::{open_channel, ChannelOptions, ServiceEndpoint};
use crate::error::{Call, Result};
use crate::filter::LabelFilter;
use async_trait::async_trait;
use prism_proto::target_tracking::{
    communicate_client::CommunicateClient, GetResultByImageIdRequest, GetResultByImageIdResponse,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tonic::transport::Channel;
use tonic::Status;
use tracing::info;

const SERVICE: &str = "TargetTrackingClient";

/// Remote operations of `target_tracking.Communicate`.
#[async_trait]
pub trait TargetTrackingRpc: Send + Sync {
    async fn get_result_by_image_id(
        &self,
        request: GetResultByImageIdRequest,
    ) -> std::result::Result<GetResultByImageIdResponse, Status>;
}

/// gRPC stub for the tracking service.
#[derive(Debug, Clone)]
pub struct TargetTrackingStub {
    client: CommunicateClient<Channel>,
}

impl TargetTrackingStub {
    pub fn new(channel: Channel, options: &ChannelOptions) -> Self {
        let mut client = CommunicateClient::new(channel);
        if let Some(limit) = options.max_decoding_message_size {
            client = client.max_decoding_message_size(limit);
        }
        Self { client }
    }
}

#[async_trait]
impl TargetTrackingRpc for TargetTrackingStub {
    async fn get_result_by_image_id(
        &self,
        request: GetResultByImageIdRequest,
    ) -> std::result::Result<GetResultByImageIdResponse, Status> {
        let mut client = self.client.clone();
        client
            .get_result_by_image_id(request)
            .await
            .map(tonic::Response::into_inner)
    }
}

/// Axis-aligned bounding box in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<prism_proto::target_tracking::BBox> for BBox {
    fn from(bbox: prism_proto::target_tracking::BBox) -> Self {
        Self::new(bbox.x1, bbox.y1, bbox.x2, bbox.y2)
    }
}

/// Box history per track id, ordered by track id.
pub type TrackingResults = BTreeMap<i32, Vec<BBox>>;

/// Client for the tracking service, bound to one task.
///
/// Unlike detection, tracks are filtered by label name and the filter starts
/// empty: nothing is returned until at least one label is added.
pub struct TargetTrackingClient<R = TargetTrackingStub> {
    rpc: R,
    endpoint: ServiceEndpoint,
    task_id: i64,
    filter: LabelFilter<String>,
}

impl TargetTrackingClient {
    pub fn new(endpoint: ServiceEndpoint, task_id: i64, options: ChannelOptions) -> Result<Self> {
        let channel = open_channel(&endpoint, &options)?;
        Ok(Self::with_rpc(
            TargetTrackingStub::new(channel, &options),
            endpoint,
            task_id,
        ))
    }
}

impl<R: TargetTrackingRpc> TargetTrackingClient<R> {
    pub fn with_rpc(rpc: R, endpoint: ServiceEndpoint, task_id: i64) -> Self {
        info!("Initialized TargetTrackingClient with Task ID: {}", task_id);
        Self {
            rpc,
            endpoint,
            task_id,
            filter: LabelFilter::new(),
        }
    }

    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    pub fn task_id(&self) -> i64 {
        self.task_id
    }

    pub fn filter(&self) -> &LabelFilter<String> {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut LabelFilter<String> {
        &mut self.filter
    }

    /// Tracks visible at `image_id` whose label passes the filter.
    ///
    /// With `only_the_latest` the service returns just the newest box of each
    /// track. A track id repeated in one response keeps its last entry.
    #[tracing::instrument(
        skip(self),
        fields(
            otel.kind = "client",
            service = "target_tracking",
            endpoint = %self.endpoint,
            task_id = self.task_id
        ),
        err
    )]
    pub async fn get_result_by_image_id(
        &self,
        image_id: i64,
        only_the_latest: bool,
    ) -> Result<TrackingResults> {
        let call = Call::new(SERVICE, "get result", &self.endpoint);

        let response = self
            .rpc
            .get_result_by_image_id(GetResultByImageIdRequest {
                task_id: self.task_id,
                image_id,
                wait: true,
                only_the_latest,
            })
            .await
            .map_err(|status| call.rpc_error(status))?;
        call.check(response.response.as_ref())?;

        let results: TrackingResults = response
            .results
            .into_iter()
            .filter(|track| self.filter.check(track.label.as_str()))
            .map(|track| (track.id, track.bboxs.into_iter().map(BBox::from).collect()))
            .collect();

        info!(
            "Retrieved {} filtered results for image ID: {}",
            results.len(),
            image_id
        );

        Ok(results)
    }
}
