// Fake player services for integration tests.
use arena_server::interface_adapters::protocol::ArenaUpdateDto;
use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use std::{
    // `Arc` shares the request log between the fake service and the test.
    sync::{Arc, Mutex},
    // Replies can be delayed to simulate slow player services.
    time::Duration,
};

// Every request body a fake service received, in arrival order.
pub type RequestLog = Arc<Mutex<Vec<ArenaUpdateDto>>>;

// How a fake player service answers each poll.
#[derive(Clone)]
pub struct FakeReply {
    pub status: StatusCode,
    pub body: &'static str,
    pub delay: Duration,
}

impl FakeReply {
    // A healthy service replying with `body` right away.
    pub fn body(body: &'static str) -> Self {
        Self {
            status: StatusCode::OK,
            body,
            delay: Duration::ZERO,
        }
    }

    // Same reply, held back for `delay` before answering.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    // A service that fails with `status`.
    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: "",
            delay: Duration::ZERO,
        }
    }
}

#[derive(Clone)]
struct FakeState {
    reply: FakeReply,
    log: RequestLog,
}

async fn answer(
    State(state): State<FakeState>,
    Json(update): Json<ArenaUpdateDto>,
) -> (StatusCode, &'static str) {
    // Record before sleeping so slow services still show up as polled.
    state.log.lock().expect("request log poisoned").push(update);
    tokio::time::sleep(state.reply.delay).await;
    (state.reply.status, state.reply.body)
}

// Start a fake player service on an ephemeral port and return its URL plus
// the log of requests it received.
pub async fn spawn_player_service(reply: FakeReply) -> (String, RequestLog) {
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().route("/", post(answer)).with_state(FakeState {
        reply,
        log: Arc::clone(&log),
    });

    // Bind to an ephemeral port to avoid collisions with local services.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");

    // Serve until the test runtime shuts down.
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{addr}/"), log)
}

// An address nothing is listening on.
pub async fn closed_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    drop(listener);
    format!("http://{addr}/")
}
