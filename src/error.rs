/*!
 * Error types for the Prism CLI
 */

use prism_connect::ClientError;
use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, PrismError>;

/// Exit code constants for structured process exit
pub const EXIT_SUCCESS: i32 = 0;
/// A service was reached and rejected the request
pub const EXIT_REMOTE: i32 = 1;
/// Anything else: bad input, local failures, unreachable services
pub const EXIT_FATAL: i32 = 2;

#[derive(Debug)]
pub enum PrismError {
    /// Configuration error
    Config(String),

    /// No task id on the command line or in the configuration
    MissingTask(&'static str),

    /// I/O error
    Io(io::Error),

    /// Failure reported by a service client
    Client(ClientError),

    /// Result could not be rendered
    Output(String),
}

impl PrismError {
    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PrismError::Client(ClientError::Remote { .. }) => EXIT_REMOTE,
            _ => EXIT_FATAL,
        }
    }
}

impl fmt::Display for PrismError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrismError::Config(msg) => write!(f, "Configuration error: {}", msg),
            PrismError::MissingTask(service) => write!(
                f,
                "No task id for {}: pass --task or set services.{}.task_id",
                service, service
            ),
            PrismError::Io(err) => write!(f, "I/O error: {}", err),
            PrismError::Client(err) => write!(f, "{}", err),
            PrismError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

// Display already carries the wrapped error, so no source chain is exposed.
impl std::error::Error for PrismError {}

impl From<io::Error> for PrismError {
    fn from(err: io::Error) -> Self {
        PrismError::Io(err)
    }
}

impl From<ClientError> for PrismError {
    fn from(err: ClientError) -> Self {
        PrismError::Client(err)
    }
}

impl From<serde_json::Error> for PrismError {
    fn from(err: serde_json::Error) -> Self {
        PrismError::Output(format!("JSON encode error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote_error() -> ClientError {
        ClientError::Remote {
            service: "TargetDetectionClient",
            operation: "get result",
            endpoint: prism_connect::ServiceEndpoint::new("10.0.0.5", 50053),
            code: 500,
            message: "model not loaded".to_string(),
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(PrismError::Config("bad".to_string()).exit_code(), EXIT_FATAL);
        assert_eq!(PrismError::MissingTask("detection").exit_code(), EXIT_FATAL);
        assert_eq!(PrismError::from(remote_error()).exit_code(), EXIT_REMOTE);
    }

    #[test]
    fn test_local_client_failures_are_fatal() {
        let local = [
            ClientError::UnknownLabel("truck".to_string()),
            ClientError::UnknownLabelId(9),
            ClientError::EmptyImage(3),
        ];
        for err in local {
            assert_eq!(PrismError::from(err).exit_code(), EXIT_FATAL);
        }
    }

    #[test]
    fn test_invalid_endpoint_is_fatal() {
        let err = prism_connect::ImageHarmonyClient::new(
            prism_connect::ServiceEndpoint::new("bad host", 1),
            prism_connect::ChannelOptions::default(),
        )
        .err()
        .unwrap();

        assert!(matches!(err, ClientError::InvalidEndpoint { .. }));
        assert_eq!(PrismError::from(err).exit_code(), EXIT_FATAL);
    }

    #[test]
    fn test_report_prints_client_error_once() {
        let report = format!("{:#}", anyhow::Error::from(PrismError::from(remote_error())));
        assert_eq!(report.matches("model not loaded").count(), 1);
        assert!(report.starts_with("TargetDetectionClient Error: Failed to get result"));

        let rpc = ClientError::Rpc {
            service: "ImageHarmonyClient",
            operation: "connect image loader",
            endpoint: prism_connect::ServiceEndpoint::new("10.0.0.5", 50051),
            status: prism_connect::Status::unavailable("connection refused"),
        };
        let report = format!("{:#}", anyhow::Error::from(PrismError::from(rpc)));
        assert_eq!(report.matches("connection refused").count(), 1);
    }

    #[test]
    fn test_io_error_printed_once() {
        let err = io::Error::new(io::ErrorKind::NotFound, "frame.png missing");
        let report = format!("{:#}", anyhow::Error::from(PrismError::from(err)));
        assert_eq!(report, "I/O error: frame.png missing");
    }

    #[test]
    fn test_unreachable_service_is_fatal() {
        let err = "10.0.0.5:50051"
            .parse::<prism_connect::ServiceEndpoint>()
            .map(|endpoint| ClientError::Rpc {
                service: "ImageHarmonyClient",
                operation: "connect image loader",
                endpoint,
                status: prism_connect::Status::unavailable("connection refused"),
            })
            .unwrap();

        assert_eq!(PrismError::from(err).exit_code(), EXIT_FATAL);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            PrismError::MissingTask("tracking").to_string(),
            "No task id for tracking: pass --task or set services.tracking.task_id"
        );
        assert_eq!(
            PrismError::Client(ClientError::UnknownLabelId(9)).to_string(),
            "Failed to find label for ID 9"
        );
    }
}
