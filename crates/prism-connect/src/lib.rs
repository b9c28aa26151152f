//! Prism Connect: client-side gRPC bindings for the Prism vision services
//!
//! Each service of the grid gets one client that wraps its `Communicate`
//! stub, checks the status envelope of every response and converts results
//! into plain Rust types.
//!
//! # Architecture
//!
//! - **ImageHarmonyClient**: binds an image loader and fetches raw frames
//! - **ImageRendererClient**: fetches rendered frames per task
//! - **ServiceCoordinatorClient**: wires services into a task and drives its lifecycle
//! - **TargetDetectionClient**: detection results, label mapping table and label filter
//! - **TargetTrackingClient**: per-track box histories filtered by label
//!
//! Every client is generic over an `*Rpc` trait so the transport can be
//! replaced by an in-process implementation.
//!
//! # Example
//!
//! ```rust,no_run
//! use prism_connect::{ChannelOptions, ServiceCoordinatorClient, ServiceEndpoint};
//!
//! async fn example() -> prism_connect::Result<()> {
//!     let endpoint = ServiceEndpoint::new("10.0.0.5", 50060);
//!     let coordinator = ServiceCoordinatorClient::new(endpoint, ChannelOptions::default())?;
//!
//!     coordinator.start("task-7").await?;
//!     coordinator.stop("task-7").await?;
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod coordinator;
pub mod detection;
pub mod error;
pub mod filter;
pub mod harmony;
pub mod imaging;
pub mod labels;
pub mod renderer;
pub mod tracking;

pub use channel::{open_channel, ChannelOptions, ServiceEndpoint, IMAGE_MESSAGE_LIMIT};
pub use coordinator::{
    PreviousService, ServiceArgs, ServiceCoordinatorClient, ServiceCoordinatorRpc,
    ServiceCoordinatorStub,
};
pub use detection::{Detection, TargetDetectionClient, TargetDetectionRpc, TargetDetectionStub};
pub use error::{ClientError, Result};
pub use filter::LabelFilter;
pub use harmony::{ImageHarmonyClient, ImageHarmonyRpc, ImageHarmonyStub};
pub use imaging::{DecodedImage, ImageBuffer, ImageEncoding, ImageSize};
pub use labels::LabelMap;
pub use renderer::{ImageRendererClient, ImageRendererRpc, ImageRendererStub};
// Status types carried by `ClientError::Rpc`
pub use tonic::{Code, Status};
pub use tracking::{BBox, TargetTrackingClient, TargetTrackingRpc, TargetTrackingStub, TrackingResults};
