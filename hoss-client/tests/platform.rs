//! End-to-end tests against an in-process mock of the Demon platform

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use hoss_client::{ClientConfig, ClientError, DemonClient, EnvelopeStatus, RunStatus};
use hoss_core::dto::ritual::RitualInput;
use serde_json::{Value, json};

/// Canned reply for one endpoint
#[derive(Clone)]
enum Reply {
    Json(StatusCode, Value),
    Text(StatusCode, &'static str),
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Json(code, body) => (code, Json(body)).into_response(),
            Reply::Text(code, body) => (code, body).into_response(),
        }
    }
}

struct MockPlatform {
    start: Reply,
    /// Statuses served in order; the last one repeats
    statuses: Mutex<Vec<&'static str>>,
    envelope: Reply,
    status_calls: AtomicUsize,
    seen_auth: Mutex<Vec<Option<String>>>,
    seen_start: Mutex<Option<(String, Value)>>,
}

impl MockPlatform {
    fn new(statuses: &[&'static str], envelope: Reply) -> Self {
        Self {
            start: Reply::Json(
                StatusCode::CREATED,
                json!({ "runId": "run-test-123", "status": "running", "ritual": "hoss-validate" }),
            ),
            statuses: Mutex::new(statuses.to_vec()),
            envelope,
            status_calls: AtomicUsize::new(0),
            seen_auth: Mutex::new(Vec::new()),
            seen_start: Mutex::new(None),
        }
    }

    fn with_start(mut self, start: Reply) -> Self {
        self.start = start;
        self
    }

    fn record_auth(&self, headers: &HeaderMap) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.seen_auth.lock().unwrap().push(auth);
    }

    fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

async fn start_run(
    State(platform): State<Arc<MockPlatform>>,
    Path(ritual): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    platform.record_auth(&headers);
    *platform.seen_start.lock().unwrap() = Some((ritual, body));
    platform.start.clone()
}

async fn run_status(
    State(platform): State<Arc<MockPlatform>>,
    Path(run_id): Path<String>,
    headers: HeaderMap,
) -> Reply {
    platform.record_auth(&headers);
    platform.status_calls.fetch_add(1, Ordering::SeqCst);

    let status = {
        let mut statuses = platform.statuses.lock().unwrap();
        if statuses.len() > 1 {
            statuses.remove(0)
        } else {
            statuses[0]
        }
    };

    Reply::Json(
        StatusCode::OK,
        json!({
            "runId": run_id,
            "status": status,
            "ritual": "hoss-validate",
            "createdAt": "2025-10-05T12:00:00Z",
            "updatedAt": "2025-10-05T12:01:00Z"
        }),
    )
}

async fn run_envelope(State(platform): State<Arc<MockPlatform>>, headers: HeaderMap) -> Reply {
    platform.record_auth(&headers);
    platform.envelope.clone()
}

/// Serves `platform` on an ephemeral port and returns its base URL
async fn serve(platform: Arc<MockPlatform>) -> String {
    let app = Router::new()
        .route("/api/v1/rituals/{ritual}/runs", post(start_run))
        .route("/api/v1/runs/{run_id}", get(run_status))
        .route("/api/v1/runs/{run_id}/envelope", get(run_envelope))
        .with_state(platform);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn client(base_url: &str, token: Option<&str>) -> DemonClient {
    let config = ClientConfig::new(base_url)
        .with_token(token.map(str::to_string))
        .with_poll_interval(Duration::from_millis(50));
    DemonClient::new(config).unwrap()
}

fn diagram_input() -> RitualInput {
    let mut input = RitualInput::new();
    input.insert("diagramPath".to_string(), json!("samples/topology-min.yaml"));
    input
}

fn ok_envelope() -> Reply {
    Reply::Json(
        StatusCode::OK,
        json!({
            "status": "ok",
            "counts": { "validated": 1, "warnings": 0, "failures": 0 },
            "tool": { "name": "hhfab", "version": "v0.41.3" }
        }),
    )
}

#[tokio::test]
async fn test_start_ritual_returns_assigned_run_id() {
    let platform = Arc::new(MockPlatform::new(&["running"], ok_envelope()));
    let url = serve(platform.clone()).await;

    let run_id = client(&url, None)
        .start_ritual("hoss-validate", diagram_input())
        .await
        .unwrap();

    assert_eq!(run_id, "run-test-123");
    let (ritual, body) = platform.seen_start.lock().unwrap().clone().unwrap();
    assert_eq!(ritual, "hoss-validate");
    assert_eq!(
        body,
        json!({ "input": { "diagramPath": "samples/topology-min.yaml" } })
    );
}

#[tokio::test]
async fn test_start_ritual_accepts_200() {
    let platform = Arc::new(
        MockPlatform::new(&["running"], ok_envelope())
            .with_start(Reply::Json(StatusCode::OK, json!({ "runId": "run-ok" }))),
    );
    let url = serve(platform).await;

    let run_id = client(&url, None)
        .start_ritual("hoss-validate", diagram_input())
        .await
        .unwrap();

    assert_eq!(run_id, "run-ok");
}

#[tokio::test]
async fn test_start_ritual_non_success_status_keeps_body() {
    let platform = Arc::new(
        MockPlatform::new(&["running"], ok_envelope())
            .with_start(Reply::Text(StatusCode::BAD_REQUEST, "Invalid request")),
    );
    let url = serve(platform).await;

    let err = client(&url, None)
        .start_ritual("hoss-validate", diagram_input())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "API error (status 400): Invalid request");
    assert!(err.is_protocol());
}

#[tokio::test]
async fn test_start_ritual_invalid_json_is_protocol_error() {
    let platform = Arc::new(
        MockPlatform::new(&["running"], ok_envelope())
            .with_start(Reply::Text(StatusCode::OK, "invalid json")),
    );
    let url = serve(platform).await;

    let err = client(&url, None)
        .start_ritual("hoss-validate", diagram_input())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Parse(_)));
}

#[tokio::test]
async fn test_start_ritual_empty_run_id_is_rejected() {
    let platform = Arc::new(
        MockPlatform::new(&["running"], ok_envelope())
            .with_start(Reply::Json(StatusCode::CREATED, json!({ "runId": "" }))),
    );
    let url = serve(platform).await;

    let err = client(&url, None)
        .start_ritual("hoss-validate", diagram_input())
        .await
        .unwrap_err();

    assert!(err.is_protocol());
}

#[tokio::test]
async fn test_empty_ritual_name_sends_nothing() {
    let platform = Arc::new(MockPlatform::new(&["running"], ok_envelope()));
    let url = serve(platform.clone()).await;

    let err = client(&url, None)
        .start_ritual("", diagram_input())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidRequest(_)));
    assert!(platform.seen_start.lock().unwrap().is_none());
}

#[tokio::test]
async fn test_bearer_token_sent_only_when_configured() {
    let platform = Arc::new(MockPlatform::new(&["completed"], ok_envelope()));
    let url = serve(platform.clone()).await;

    let authed = client(&url, Some("test-token"));
    authed.start_ritual("hoss-validate", diagram_input()).await.unwrap();
    authed.get_run_status("run-test-123").await.unwrap();
    authed.get_envelope("run-test-123").await.unwrap();

    let anonymous = client(&url, None);
    anonymous.get_run_status("run-test-123").await.unwrap();

    let seen = platform.seen_auth.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            Some("Bearer test-token".to_string()),
            Some("Bearer test-token".to_string()),
            Some("Bearer test-token".to_string()),
            None,
        ]
    );
}

#[tokio::test]
async fn test_get_run_status() {
    let platform = Arc::new(MockPlatform::new(&["completed"], ok_envelope()));
    let url = serve(platform).await;

    let run = client(&url, None)
        .get_run_status("run-test-123")
        .await
        .unwrap();

    assert_eq!(run.run_id, "run-test-123");
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.ritual, "hoss-validate");
    assert_eq!(run.created_at.as_deref(), Some("2025-10-05T12:00:00Z"));
}

#[tokio::test]
async fn test_get_envelope_forwards_payload() {
    let platform = Arc::new(MockPlatform::new(&["completed"], ok_envelope()));
    let url = serve(platform).await;

    let envelope = client(&url, None)
        .get_envelope("run-test-123")
        .await
        .unwrap();

    assert_eq!(envelope.status(), Some(EnvelopeStatus::Ok));
    assert_eq!(envelope.get("counts").unwrap()["validated"], json!(1));
    assert_eq!(envelope.get("tool").unwrap()["name"], json!("hhfab"));
}

#[tokio::test]
async fn test_get_envelope_not_found() {
    let platform = Arc::new(MockPlatform::new(
        &["completed"],
        Reply::Text(StatusCode::NOT_FOUND, "Not found"),
    ));
    let url = serve(platform).await;

    let err = client(&url, None)
        .get_envelope("run-nonexistent")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_wait_for_ritual_success() {
    let platform = Arc::new(MockPlatform::new(&["running", "completed"], ok_envelope()));
    let url = serve(platform.clone()).await;

    let envelope = client(&url, None)
        .wait_for_ritual("run-test-123", Duration::from_secs(10))
        .await
        .unwrap();

    assert_eq!(envelope.raw_status(), Some("ok"));
    assert!(platform.status_calls() >= 2);
}

#[tokio::test]
async fn test_wait_for_ritual_timeout() {
    let platform = Arc::new(MockPlatform::new(&["running"], ok_envelope()));
    let url = serve(platform.clone()).await;
    let timeout = Duration::from_millis(300);

    let started = Instant::now();
    let err = client(&url, None)
        .wait_for_ritual("run-test-123", timeout)
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert!(platform.status_calls() >= 1);
    // one poll interval plus slack for the local round trips
    assert!(started.elapsed() < timeout + Duration::from_millis(50) + Duration::from_secs(1));
}

#[tokio::test]
async fn test_wait_for_failed_ritual_with_envelope() {
    let platform = Arc::new(MockPlatform::new(
        &["failed"],
        Reply::Json(
            StatusCode::OK,
            json!({ "status": "error", "errors": ["duplicate server name"] }),
        ),
    ));
    let url = serve(platform).await;

    let envelope = client(&url, None)
        .wait_for_ritual("run-test-123", Duration::from_secs(10))
        .await
        .unwrap();

    assert_eq!(envelope.status(), Some(EnvelopeStatus::Error));
}

#[tokio::test]
async fn test_wait_for_failed_ritual_without_envelope() {
    let platform = Arc::new(MockPlatform::new(
        &["failed"],
        Reply::Text(StatusCode::NOT_FOUND, "Not found"),
    ));
    let url = serve(platform).await;

    let err = client(&url, None)
        .wait_for_ritual("run-test-123", Duration::from_secs(10))
        .await
        .unwrap_err();

    assert!(err.is_terminal_failure());
    assert!(!err.is_transport());
    assert_eq!(err.to_string(), "ritual failed: failed");
}

#[tokio::test]
async fn test_unreachable_platform_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}", addr), None)
        .get_run_status("run-test-123")
        .await
        .unwrap_err();

    assert!(err.is_transport());
}
