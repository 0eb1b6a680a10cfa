#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use data_encoding::BASE64;
use tokio::sync::Mutex;

use wsgw_harness::conntrack::ConnectionTracker;
use wsgw_harness::gateway_client::GatewayClient;
use wsgw_harness::metrics::Metrics;
use wsgw_harness::models::message::Message;
use wsgw_harness::models::user::PasswordCredentials;
use wsgw_harness::relay::RelayDispatcher;
use wsgw_harness::routes;
use wsgw_harness::state::AppState;
use wsgw_harness::users::UserDirectory;

pub const ALICE: (&str, &str) = ("alice", "wonderland");
pub const BOB: (&str, &str) = ("bob", "builder");

/// Test harness instance wired against the given gateway base URL.
/// Each instance is isolated — safe for parallel tests.
pub struct TestServer {
    pub state: AppState,
}

impl TestServer {
    pub fn new(gateway_base_url: &str) -> Self {
        Self::with_timeout(gateway_base_url, Duration::from_secs(5))
    }

    pub fn with_timeout(gateway_base_url: &str, timeout: Duration) -> Self {
        let conntrack = Arc::new(ConnectionTracker::new());
        let metrics = Arc::new(Metrics::new());
        let gateway = GatewayClient::new(gateway_base_url.to_string(), timeout);
        let relay = Arc::new(RelayDispatcher::new(
            Arc::clone(&conntrack),
            gateway,
            Arc::clone(&metrics),
        ));
        let users = Arc::new(UserDirectory::new(vec![
            PasswordCredentials {
                username: ALICE.0.to_string(),
                password: ALICE.1.to_string(),
            },
            PasswordCredentials {
                username: BOB.0.to_string(),
                password: BOB.1.to_string(),
            },
        ]));

        let state = AppState {
            conntrack,
            relay,
            users,
            metrics,
        };
        Self { state }
    }

    /// Returns an axum Router wired to this server's state for `oneshot()`.
    pub fn router(&self) -> Router {
        routes::router(self.state.clone())
    }

    /// Binds a TCP listener on port 0, spawns the server, returns its base URL.
    pub async fn spawn(&self) -> String {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://127.0.0.1:{}", addr.port())
    }
}

/// `Authorization` header value for HTTP Basic auth.
pub fn basic_auth(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        BASE64.encode(format!("{username}:{password}").as_bytes())
    )
}

/// Minimal stand-in for the websocket gateway's message endpoint.
///
/// Answers 204 unless the conn id is mapped to another status. Tracks
/// total and concurrently in-flight calls so tests can assert the
/// dispatch concurrency bound.
#[derive(Clone)]
pub struct MockGatewayState {
    statuses: Arc<HashMap<String, u16>>,
    delay: Duration,
    pub calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    pub max_in_flight: Arc<AtomicUsize>,
    /// (conn_id, body) per call, in arrival order.
    pub received: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
}

pub struct MockGateway {
    pub base_url: String,
    pub state: MockGatewayState,
}

impl MockGateway {
    pub async fn spawn() -> Self {
        Self::spawn_with(HashMap::new(), Duration::ZERO).await
    }

    pub async fn spawn_with(statuses: HashMap<String, u16>, delay: Duration) -> Self {
        let state = MockGatewayState {
            statuses: Arc::new(statuses),
            delay,
            calls: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
            received: Arc::new(Mutex::new(Vec::new())),
        };

        let app = Router::new()
            .route("/message/{conn_id}", post(mock_message_handler))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", addr.port()),
            state,
        }
    }

    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }
}

async fn mock_message_handler(
    State(gw): State<MockGatewayState>,
    Path(conn_id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> StatusCode {
    gw.calls.fetch_add(1, Ordering::SeqCst);
    let now_in_flight = gw.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    gw.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

    if !gw.delay.is_zero() {
        tokio::time::sleep(gw.delay).await;
    }
    gw.received.lock().await.push((conn_id.clone(), body));

    gw.in_flight.fetch_sub(1, Ordering::SeqCst);

    match gw.statuses.get(&conn_id) {
        Some(status) => StatusCode::from_u16(*status).unwrap(),
        None => StatusCode::NO_CONTENT,
    }
}

/// A message addressed to the given recipients, sender "alice".
pub fn test_message(recipients: &[&str]) -> Message {
    Message {
        test_run_id: "run-1".to_string(),
        id: uuid::Uuid::new_v4().to_string(),
        sender: "alice".to_string(),
        recipients: recipients.iter().map(|r| r.to_string()).collect(),
        data: "payload".to_string(),
        destination: "ws".to_string(),
        sent_at: None,
        trace_data: HashMap::new(),
    }
}
