//! Protocol definitions for the Prism vision service grid.
//!
//! Each remote service lives in its own package and exposes a `Communicate`
//! gRPC service. The message types and client stubs are checked in (see the
//! `.proto` files under `proto/`) so building the grid clients does not need
//! `protoc` on the host.

pub mod image_harmony;
pub mod image_renderer;
pub mod service_coordinator;
pub mod target_detection;
pub mod target_tracking;

/// Status code a service puts in the response envelope on success.
pub const STATUS_OK: i32 = 200;

/// Access to the `Response { code, message }` envelope every package defines.
pub trait ResponseStatus {
    fn code(&self) -> i32;
    fn message(&self) -> &str;

    fn is_ok(&self) -> bool {
        self.code() == STATUS_OK
    }
}

macro_rules! impl_response_status {
    ($($ty:path),+ $(,)?) => {
        $(
            impl ResponseStatus for $ty {
                fn code(&self) -> i32 {
                    self.code
                }

                fn message(&self) -> &str {
                    &self.message
                }
            }
        )+
    };
}

impl_response_status!(
    image_harmony::Response,
    image_renderer::Response,
    service_coordinator::Response,
    target_detection::Response,
    target_tracking::Response,
);
