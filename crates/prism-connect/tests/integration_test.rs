//! Integration tests for prism-connect
//!
//! The in-process services below stand in for a small pipeline:
//! harmony -> detection -> tracking, wired through the coordinator.
//! Tests against live services are `#[ignore]`d.

use async_trait::async_trait;
use prism_connect::{
    ChannelOptions, ClientError, ImageEncoding, ImageHarmonyClient, ImageHarmonyRpc,
    PreviousService, ServiceArgs, ServiceCoordinatorClient, ServiceCoordinatorRpc,
    ServiceEndpoint, TargetDetectionClient, TargetDetectionRpc, TargetTrackingClient,
    TargetTrackingRpc,
};
use prism_proto::{image_harmony, service_coordinator, target_detection, target_tracking};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tonic::Status;

const TASK: &str = "task-1";
const TASK_ID: i64 = 1;

/// Coordinator that records the wiring of each task. Clones share state.
#[derive(Default, Clone)]
struct Coordinator {
    upstream: Arc<Mutex<HashMap<String, (String, String, String)>>>,
    running: Arc<Mutex<Vec<String>>>,
}

fn coordinator_ok() -> Option<service_coordinator::Response> {
    Some(service_coordinator::Response {
        code: 200,
        message: "OK".to_string(),
    })
}

#[async_trait]
impl ServiceCoordinatorRpc for Coordinator {
    async fn inform_previous_service_info(
        &self,
        request: service_coordinator::InformPreviousServiceInfoRequest,
    ) -> Result<service_coordinator::InformPreviousServiceInfoResponse, Status> {
        self.upstream.lock().unwrap().insert(
            request.task_id,
            (
                request.pre_service_name,
                request.pre_service_ip,
                request.pre_service_port,
            ),
        );
        Ok(service_coordinator::InformPreviousServiceInfoResponse {
            response: coordinator_ok(),
        })
    }

    async fn inform_current_service_info(
        &self,
        request: service_coordinator::InformCurrentServiceInfoRequest,
    ) -> Result<service_coordinator::InformCurrentServiceInfoResponse, Status> {
        let mut args = request.args;
        args.push(service_coordinator::Argument {
            key: "taskId".to_string(),
            value: request.task_id,
        });
        Ok(service_coordinator::InformCurrentServiceInfoResponse {
            response: coordinator_ok(),
            args,
        })
    }

    async fn start(
        &self,
        request: service_coordinator::StartRequest,
    ) -> Result<service_coordinator::StartResponse, Status> {
        if !self.upstream.lock().unwrap().contains_key(&request.task_id) {
            return Ok(service_coordinator::StartResponse {
                response: Some(service_coordinator::Response {
                    code: 412,
                    message: "previous service unknown".to_string(),
                }),
            });
        }
        self.running.lock().unwrap().push(request.task_id);
        Ok(service_coordinator::StartResponse {
            response: coordinator_ok(),
        })
    }

    async fn stop(
        &self,
        request: service_coordinator::StopRequest,
    ) -> Result<service_coordinator::StopResponse, Status> {
        self.running.lock().unwrap().retain(|task| task != &request.task_id);
        Ok(service_coordinator::StopResponse {
            response: coordinator_ok(),
        })
    }
}

/// Harmony that serves a fixed frame and reports its size.
struct Harmony;

fn harmony_ok() -> Option<image_harmony::Response> {
    Some(image_harmony::Response {
        code: 200,
        message: "connected".to_string(),
    })
}

#[async_trait]
impl ImageHarmonyRpc for Harmony {
    async fn connect_image_loader(
        &self,
        request: image_harmony::ConnectImageLoaderRequest,
    ) -> Result<image_harmony::ConnectImageLoaderResponse, Status> {
        Ok(image_harmony::ConnectImageLoaderResponse {
            response: harmony_ok(),
            connection_id: request.loader_args_hash ^ 0x55,
        })
    }

    async fn disconnect_image_loader(
        &self,
        _request: image_harmony::DisconnectImageLoaderRequest,
    ) -> Result<image_harmony::DisconnectImageLoaderResponse, Status> {
        Ok(image_harmony::DisconnectImageLoaderResponse {
            response: harmony_ok(),
        })
    }

    async fn get_image_by_image_id(
        &self,
        request: image_harmony::GetImageByImageIdRequest,
    ) -> Result<image_harmony::GetImageByImageIdResponse, Status> {
        if request.connection_id == 0 {
            return Err(Status::failed_precondition("no loader bound"));
        }
        let image_request = request.image_request.unwrap_or_default();
        Ok(image_harmony::GetImageByImageIdResponse {
            response: harmony_ok(),
            image_response: Some(image_harmony::CustomImageResponse {
                image_id: image_request.image_id,
                buffer: if image_request.no_image_buffer {
                    Vec::new()
                } else {
                    vec![0xff, 0xd8, 0xff]
                },
                width: 1280,
                height: 720,
            }),
        })
    }
}

/// Detection that reports one person and one car per frame.
struct Detector;

#[async_trait]
impl TargetDetectionRpc for Detector {
    async fn get_result_mapping_table(
        &self,
        _request: target_detection::GetResultMappingTableRequest,
    ) -> Result<target_detection::GetResultMappingTableResponse, Status> {
        Ok(target_detection::GetResultMappingTableResponse {
            response: Some(target_detection::Response {
                code: 200,
                message: String::new(),
            }),
            labels: vec!["person".to_string(), "car".to_string()],
        })
    }

    async fn get_result_index_by_image_id(
        &self,
        request: target_detection::GetResultIndexByImageIdRequest,
    ) -> Result<target_detection::GetResultIndexByImageIdResponse, Status> {
        let offset = request.image_id as f32;
        Ok(target_detection::GetResultIndexByImageIdResponse {
            response: Some(target_detection::Response {
                code: 200,
                message: String::new(),
            }),
            results: vec![
                target_detection::Result {
                    label_id: 0,
                    x1: offset,
                    y1: offset,
                    x2: offset + 50.0,
                    y2: offset + 120.0,
                    confidence: 0.92,
                },
                target_detection::Result {
                    label_id: 1,
                    x1: 300.0,
                    y1: 200.0,
                    x2: 420.0,
                    y2: 280.0,
                    confidence: 0.71,
                },
            ],
        })
    }
}

/// Tracker following the person across frames.
struct Tracker;

#[async_trait]
impl TargetTrackingRpc for Tracker {
    async fn get_result_by_image_id(
        &self,
        request: target_tracking::GetResultByImageIdRequest,
    ) -> Result<target_tracking::GetResultByImageIdResponse, Status> {
        let history: Vec<target_tracking::BBox> = (0..=request.image_id)
            .map(|frame| {
                let offset = frame as f32;
                target_tracking::BBox {
                    x1: offset,
                    y1: offset,
                    x2: offset + 50.0,
                    y2: offset + 120.0,
                }
            })
            .collect();
        let bboxs = if request.only_the_latest {
            history.last().copied().into_iter().collect()
        } else {
            history
        };

        Ok(target_tracking::GetResultByImageIdResponse {
            response: Some(target_tracking::Response {
                code: 200,
                message: String::new(),
            }),
            results: vec![
                target_tracking::Result {
                    id: 11,
                    label: "person".to_string(),
                    bboxs,
                },
                target_tracking::Result {
                    id: 12,
                    label: "car".to_string(),
                    bboxs: vec![target_tracking::BBox {
                        x1: 300.0,
                        y1: 200.0,
                        x2: 420.0,
                        y2: 280.0,
                    }],
                },
            ],
        })
    }
}

fn endpoint(port: u16) -> ServiceEndpoint {
    ServiceEndpoint::new("127.0.0.1", port)
}

#[tokio::test]
async fn test_pipeline_wiring_and_lifecycle() {
    let state = Coordinator::default();
    let coordinator = ServiceCoordinatorClient::with_rpc(state.clone(), endpoint(50060));

    // Starting before the upstream is known is rejected by the service
    let err = coordinator.start(TASK).await.unwrap_err();
    assert_eq!(err.remote_code(), Some(412));

    let harmony = PreviousService::at("image_harmony", &endpoint(50051));
    coordinator
        .inform_previous_service_info(TASK, &harmony, &ServiceArgs::new())
        .await
        .unwrap();

    let mut args = ServiceArgs::new();
    args.insert("model".to_string(), "yolov8n".to_string());
    let current = coordinator
        .inform_current_service_info(TASK, &args)
        .await
        .unwrap();
    assert_eq!(current.get("model").map(String::as_str), Some("yolov8n"));
    assert_eq!(current.get("taskId").map(String::as_str), Some(TASK));

    coordinator.start(TASK).await.unwrap();
    assert_eq!(*state.running.lock().unwrap(), vec![TASK.to_string()]);

    coordinator.stop(TASK).await.unwrap();
    assert!(state.running.lock().unwrap().is_empty());

    let upstream = state.upstream.lock().unwrap();
    assert_eq!(
        upstream.get(TASK),
        Some(&(
            "image_harmony".to_string(),
            "127.0.0.1".to_string(),
            "50051".to_string()
        ))
    );
}

#[tokio::test]
async fn test_frames_through_bound_loader() {
    let mut harmony = ImageHarmonyClient::with_rpc(Harmony, endpoint(50051));

    // Without a loader the service rejects the call at the transport level
    let err = harmony
        .get_image_buffer_by_image_id(3, 1280, 720, &ImageEncoding::default())
        .await
        .unwrap_err();
    assert_eq!(
        err.status().map(|s| s.code()),
        Some(tonic::Code::FailedPrecondition)
    );

    let message = harmony.connect_image_loader(0x1234).await.unwrap();
    assert_eq!(message, "connected");
    assert!(harmony.is_connected());

    let buffer = harmony
        .get_image_buffer_by_image_id(3, 1280, 720, &ImageEncoding::jpeg(95))
        .await
        .unwrap();
    assert_eq!(buffer.image_id, 3);
    assert_eq!(buffer.buffer.len(), 3);

    let size = harmony.get_image_size_by_image_id(3).await.unwrap();
    assert_eq!(size.to_string(), "1280x720");

    harmony.disconnect_image_loader().await.unwrap();
    assert!(!harmony.is_connected());
}

#[tokio::test]
async fn test_detection_and_tracking_agree_on_labels() {
    let mut detection = TargetDetectionClient::with_rpc(Detector, endpoint(50053), TASK_ID)
        .await
        .unwrap();
    let mut tracking = TargetTrackingClient::with_rpc(Tracker, endpoint(50054), TASK_ID);

    // Follow people only, in both services
    let person = detection.query_label_id("person").unwrap();
    detection.filter_mut().clear();
    detection.filter_mut().add(person);
    tracking
        .filter_mut()
        .add(detection.convert_id_to_label(person).unwrap().to_string());

    let detections = detection.get_result_by_image_id(4).await.unwrap();
    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].label_id, person);

    let tracks = tracking.get_result_by_image_id(4, false).await.unwrap();
    assert_eq!(tracks.keys().copied().collect::<Vec<_>>(), vec![11]);
    assert_eq!(tracks[&11].len(), 5);

    // The latest tracked box is the box detected in this frame
    let latest = tracking.get_result_by_image_id(4, true).await.unwrap();
    let bbox = latest[&11][0];
    assert_eq!(
        (bbox.x1, bbox.y1, bbox.x2, bbox.y2),
        (detections[0].x1, detections[0].y1, detections[0].x2, detections[0].y2)
    );
}

#[tokio::test]
async fn test_results_serialize_for_reporting() {
    let detection = TargetDetectionClient::with_rpc(Detector, endpoint(50053), TASK_ID)
        .await
        .unwrap();

    let detections = detection.get_result_by_image_id(0).await.unwrap();
    let json = serde_json::to_value(&detections).unwrap();
    assert_eq!(json[1]["label_id"], 1);
    assert!(detections[1]
        .to_string()
        .starts_with("Label ID: 1, Coordinates: (300, 200), (420, 280)"));
}

#[tokio::test]
async fn test_clients_open_lazy_channels() {
    // Nothing listens on these ports; construction must not dial
    let options = ChannelOptions::default();
    assert!(ImageHarmonyClient::new(endpoint(1), options.clone()).is_ok());
    assert!(ServiceCoordinatorClient::new(endpoint(1), options.clone()).is_ok());
    assert!(TargetTrackingClient::new(endpoint(1), TASK_ID, options).is_ok());
}

#[tokio::test]
async fn test_unreachable_service_reports_rpc_error() {
    let options = ChannelOptions::default().with_connect_timeout(std::time::Duration::from_millis(200));
    let coordinator = ServiceCoordinatorClient::new(endpoint(1), options).unwrap();

    let err = coordinator.start(TASK).await.unwrap_err();
    assert!(matches!(err, ClientError::Rpc { operation: "start task", .. }));
}

// NOTE: The following tests need the Prism services running locally and are
// disabled by default. Endpoints can be overridden with PRISM_<SERVICE>_ADDR.

fn live_endpoint(var: &str, default: &str) -> ServiceEndpoint {
    std::env::var(var)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap()
}

#[tokio::test]
#[ignore]
async fn test_live_image_harmony() {
    let endpoint = live_endpoint("PRISM_HARMONY_ADDR", "127.0.0.1:50051");
    let mut client = ImageHarmonyClient::new(endpoint, ChannelOptions::default()).unwrap();

    client.connect_image_loader(0).await.unwrap();
    let size = client.get_image_size_by_image_id(0).await.unwrap();
    println!("Frame 0 is {}", size);
    client.disconnect_image_loader().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_live_target_detection() {
    let endpoint = live_endpoint("PRISM_DETECTION_ADDR", "127.0.0.1:50053");
    let client = TargetDetectionClient::connect(endpoint, TASK_ID, ChannelOptions::default())
        .await
        .unwrap();

    for (id, label) in client.labels().iter() {
        println!("{}: {}", id, label);
    }
}
