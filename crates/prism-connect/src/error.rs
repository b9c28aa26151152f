//! Error types for the prism-connect crate

use crate::channel::ServiceEndpoint;
use prism_proto::ResponseStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("{service} Error: {operation} call to {endpoint} failed: {status}")]
    Rpc {
        service: &'static str,
        operation: &'static str,
        endpoint: ServiceEndpoint,
        #[source]
        status: tonic::Status,
    },

    #[error(
        "{service} Error: Failed to {operation}\n   ip:   {}\n   port: {}\nError:\n{message}",
        .endpoint.host,
        .endpoint.port
    )]
    Remote {
        service: &'static str,
        operation: &'static str,
        endpoint: ServiceEndpoint,
        code: i32,
        message: String,
    },

    #[error("Failed to find label for ID {0}")]
    UnknownLabelId(i32),

    #[error("Failed to find ID for label '{0}'")]
    UnknownLabel(String),

    #[error("No buffer received for image ID: {0}")]
    EmptyImage(i64),

    #[error("Failed to decode image for image ID: {image_id}: {source}")]
    Decode {
        image_id: i64,
        #[source]
        source: image::ImageError,
    },
}

impl ClientError {
    /// Status code reported by the service, if the failure came from the envelope.
    pub fn remote_code(&self) -> Option<i32> {
        match self {
            ClientError::Remote { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// gRPC status, if the call never produced an envelope.
    pub fn status(&self) -> Option<&tonic::Status> {
        match self {
            ClientError::Rpc { status, .. } => Some(status),
            _ => None,
        }
    }
}

/// Identifies one remote operation for error reporting.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Call<'a> {
    pub service: &'static str,
    pub operation: &'static str,
    pub endpoint: &'a ServiceEndpoint,
}

impl<'a> Call<'a> {
    pub fn new(service: &'static str, operation: &'static str, endpoint: &'a ServiceEndpoint) -> Self {
        Self {
            service,
            operation,
            endpoint,
        }
    }

    pub fn rpc_error(&self, status: tonic::Status) -> ClientError {
        ClientError::Rpc {
            service: self.service,
            operation: self.operation,
            endpoint: self.endpoint.clone(),
            status,
        }
    }

    /// Accepts only envelopes carrying the success code.
    ///
    /// A response without an envelope is treated as a failure: proto3 would
    /// decode it as code 0.
    pub fn check<S: ResponseStatus>(&self, envelope: Option<&S>) -> Result<()> {
        match envelope {
            Some(status) if status.is_ok() => Ok(()),
            Some(status) => Err(ClientError::Remote {
                service: self.service,
                operation: self.operation,
                endpoint: self.endpoint.clone(),
                code: status.code(),
                message: status.message().to_string(),
            }),
            None => Err(ClientError::Remote {
                service: self.service,
                operation: self.operation,
                endpoint: self.endpoint.clone(),
                code: 0,
                message: "response carried no status envelope".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_proto::target_detection::Response;

    fn endpoint() -> ServiceEndpoint {
        ServiceEndpoint::new("10.0.0.5", 50051)
    }

    #[test]
    fn test_remote_error_report() {
        let endpoint = endpoint();
        let call = Call::new("TargetDetectionClient", "get result", &endpoint);
        let envelope = Response {
            code: 500,
            message: "model not loaded".to_string(),
        };

        let err = call.check(Some(&envelope)).unwrap_err();
        assert_eq!(err.remote_code(), Some(500));
        assert_eq!(
            err.to_string(),
            "TargetDetectionClient Error: Failed to get result\n   ip:   10.0.0.5\n   port: 50051\nError:\nmodel not loaded"
        );
    }

    #[test]
    fn test_success_envelope_passes() {
        let endpoint = endpoint();
        let call = Call::new("TargetDetectionClient", "get result", &endpoint);
        let envelope = Response {
            code: 200,
            message: String::new(),
        };

        assert!(call.check(Some(&envelope)).is_ok());
    }

    #[test]
    fn test_missing_envelope_is_failure() {
        let endpoint = endpoint();
        let call = Call::new("ServiceCoordinatorClient", "start task", &endpoint);

        let err = call.check::<Response>(None).unwrap_err();
        assert_eq!(err.remote_code(), Some(0));
    }

    #[test]
    fn test_rpc_error_keeps_status() {
        let endpoint = endpoint();
        let call = Call::new("ImageRendererClient", "get image", &endpoint);

        let err = call.rpc_error(tonic::Status::unavailable("connection refused"));
        assert_eq!(err.status().map(|s| s.code()), Some(tonic::Code::Unavailable));
        assert!(err.remote_code().is_none());
        assert!(err.to_string().contains("10.0.0.5:50051"));
    }
}
