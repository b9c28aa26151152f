//! ServiceCoordinatorClient: task wiring and lifecycle
//!
//! A pipeline stage tells the coordinator which service feeds it
//! (`inform_previous_service_info`), publishes its own settings
//! (`inform_current_service_info`), and starts or stops the task.

use crate::channel::{open_channel, ChannelOptions, ServiceEndpoint};
use crate::error::{Call, Result};
use async_trait::async_trait;
use prism_proto::service_coordinator::{
    communicate_client::CommunicateClient, Argument, InformCurrentServiceInfoRequest,
    InformCurrentServiceInfoResponse, InformPreviousServiceInfoRequest,
    InformPreviousServiceInfoResponse, StartRequest, StartResponse, StopRequest, StopResponse,
};
use std::collections::BTreeMap;
use tonic::transport::Channel;
use tonic::Status;
use tracing::info;

const SERVICE: &str = "ServiceCoordinatorClient";

/// String arguments exchanged with the coordinator.
pub type ServiceArgs = BTreeMap<String, String>;

/// Remote operations of `service_coordinator.Communicate`.
#[async_trait]
pub trait ServiceCoordinatorRpc: Send + Sync {
    async fn inform_previous_service_info(
        &self,
        request: InformPreviousServiceInfoRequest,
    ) -> std::result::Result<InformPreviousServiceInfoResponse, Status>;

    async fn inform_current_service_info(
        &self,
        request: InformCurrentServiceInfoRequest,
    ) -> std::result::Result<InformCurrentServiceInfoResponse, Status>;

    async fn start(&self, request: StartRequest) -> std::result::Result<StartResponse, Status>;

    async fn stop(&self, request: StopRequest) -> std::result::Result<StopResponse, Status>;
}

/// gRPC stub for the coordination service.
#[derive(Debug, Clone)]
pub struct ServiceCoordinatorStub {
    client: CommunicateClient<Channel>,
}

impl ServiceCoordinatorStub {
    pub fn new(channel: Channel, options: &ChannelOptions) -> Self {
        let mut client = CommunicateClient::new(channel);
        if let Some(limit) = options.max_decoding_message_size {
            client = client.max_decoding_message_size(limit);
        }
        Self { client }
    }
}

#[async_trait]
impl ServiceCoordinatorRpc for ServiceCoordinatorStub {
    async fn inform_previous_service_info(
        &self,
        request: InformPreviousServiceInfoRequest,
    ) -> std::result::Result<InformPreviousServiceInfoResponse, Status> {
        let mut client = self.client.clone();
        client
            .inform_previous_service_info(request)
            .await
            .map(tonic::Response::into_inner)
    }

    async fn inform_current_service_info(
        &self,
        request: InformCurrentServiceInfoRequest,
    ) -> std::result::Result<InformCurrentServiceInfoResponse, Status> {
        let mut client = self.client.clone();
        client
            .inform_current_service_info(request)
            .await
            .map(tonic::Response::into_inner)
    }

    async fn start(&self, request: StartRequest) -> std::result::Result<StartResponse, Status> {
        let mut client = self.client.clone();
        client.start(request).await.map(tonic::Response::into_inner)
    }

    async fn stop(&self, request: StopRequest) -> std::result::Result<StopResponse, Status> {
        let mut client = self.client.clone();
        client.stop(request).await.map(tonic::Response::into_inner)
    }
}

/// The upstream service feeding the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviousService {
    pub name: String,
    pub ip: String,
    pub port: String,
}

impl PreviousService {
    pub fn new(name: impl Into<String>, ip: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip: ip.into(),
            port: port.into(),
        }
    }

    /// Describe a service reachable at `endpoint`.
    pub fn at(name: impl Into<String>, endpoint: &ServiceEndpoint) -> Self {
        Self::new(name, endpoint.host.clone(), endpoint.port.to_string())
    }
}

fn to_arguments(args: &ServiceArgs) -> Vec<Argument> {
    args.iter()
        .map(|(key, value)| Argument {
            key: key.clone(),
            value: value.clone(),
        })
        .collect()
}

fn from_arguments(args: Vec<Argument>) -> ServiceArgs {
    args.into_iter().map(|arg| (arg.key, arg.value)).collect()
}

/// Client for the coordination service.
pub struct ServiceCoordinatorClient<R = ServiceCoordinatorStub> {
    rpc: R,
    endpoint: ServiceEndpoint,
}

impl ServiceCoordinatorClient {
    pub fn new(endpoint: ServiceEndpoint, options: ChannelOptions) -> Result<Self> {
        let channel = open_channel(&endpoint, &options)?;
        let client = Self::with_rpc(ServiceCoordinatorStub::new(channel, &options), endpoint);
        info!("Service Coordinator client initialized for {}", client.endpoint);
        Ok(client)
    }
}

impl<R: ServiceCoordinatorRpc> ServiceCoordinatorClient<R> {
    pub fn with_rpc(rpc: R, endpoint: ServiceEndpoint) -> Self {
        Self { rpc, endpoint }
    }

    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    /// Register the service that feeds `task_id`.
    #[tracing::instrument(
        skip(self, previous, args),
        fields(
            otel.kind = "client",
            service = "service_coordinator",
            endpoint = %self.endpoint,
            previous = %previous.name
        ),
        err
    )]
    pub async fn inform_previous_service_info(
        &self,
        task_id: &str,
        previous: &PreviousService,
        args: &ServiceArgs,
    ) -> Result<()> {
        let call = Call::new(SERVICE, "inform previous service info", &self.endpoint);

        let request = InformPreviousServiceInfoRequest {
            task_id: task_id.to_string(),
            pre_service_name: previous.name.clone(),
            pre_service_ip: previous.ip.clone(),
            pre_service_port: previous.port.clone(),
            args: to_arguments(args),
        };

        let response = self
            .rpc
            .inform_previous_service_info(request)
            .await
            .map_err(|status| call.rpc_error(status))?;
        call.check(response.response.as_ref())?;

        info!("Successfully informed previous service info, Task ID: {}", task_id);

        Ok(())
    }

    /// Publish this service's settings; returns the arguments the coordinator hands back.
    #[tracing::instrument(
        skip(self, args),
        fields(otel.kind = "client", service = "service_coordinator", endpoint = %self.endpoint),
        err
    )]
    pub async fn inform_current_service_info(
        &self,
        task_id: &str,
        args: &ServiceArgs,
    ) -> Result<ServiceArgs> {
        let call = Call::new(SERVICE, "inform current service info", &self.endpoint);

        let request = InformCurrentServiceInfoRequest {
            task_id: task_id.to_string(),
            args: to_arguments(args),
        };

        let response = self
            .rpc
            .inform_current_service_info(request)
            .await
            .map_err(|status| call.rpc_error(status))?;
        call.check(response.response.as_ref())?;

        let output = from_arguments(response.args);
        info!(
            returned_args = output.len(),
            "Successfully informed current service info, Task ID: {}", task_id
        );

        Ok(output)
    }

    #[tracing::instrument(
        skip(self),
        fields(otel.kind = "client", service = "service_coordinator", endpoint = %self.endpoint),
        err
    )]
    pub async fn start(&self, task_id: &str) -> Result<()> {
        let call = Call::new(SERVICE, "start task", &self.endpoint);

        let response = self
            .rpc
            .start(StartRequest {
                task_id: task_id.to_string(),
            })
            .await
            .map_err(|status| call.rpc_error(status))?;
        call.check(response.response.as_ref())?;

        info!("Successfully started task, Task ID: {}", task_id);

        Ok(())
    }

    #[tracing::instrument(
        skip(self),
        fields(otel.kind = "client", service = "service_coordinator", endpoint = %self.endpoint),
        err
    )]
    pub async fn stop(&self, task_id: &str) -> Result<()> {
        let call = Call::new(SERVICE, "stop task", &self.endpoint);

        let response = self
            .rpc
            .stop(StopRequest {
                task_id: task_id.to_string(),
            })
            .await
            .map_err(|status| call.rpc_error(status))?;
        call.check(response.response.as_ref())?;

        info!("Successfully stopped task, Task ID: {}", task_id);

        Ok(())
    }
}
