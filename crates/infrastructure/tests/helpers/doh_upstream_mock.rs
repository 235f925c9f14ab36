#![allow(dead_code)]
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::any,
    Router,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub accept: Option<String>,
    pub user_agent: Option<String>,
    pub body: Vec<u8>,
}

type Recorded = Arc<Mutex<Vec<RecordedRequest>>>;

/// Local DoH upstream on 127.0.0.1 with fixed behaviour per path:
///
/// - `/dns-query` answers 200 with the request body reversed
/// - `/status/502` answers 502
/// - `/slow` sleeps 2s before answering
/// - `/redirect` answers 307 to `/dns-query`
pub struct MockDohUpstream {
    addr: SocketAddr,
    requests: Recorded,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDohUpstream {
    pub async fn start() -> Self {
        let requests: Recorded = Arc::new(Mutex::new(Vec::new()));

        let app = Router::new()
            .route("/dns-query", any(answer))
            .route("/status/502", any(bad_gateway))
            .route("/slow", any(slow))
            .route("/redirect", any(redirect))
            .with_state(Arc::clone(&requests));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Self {
            addr,
            requests,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockDohUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn record(state: &Recorded, method: Method, path: &str, headers: &HeaderMap, body: &Bytes) {
    let header = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    state.lock().unwrap().push(RecordedRequest {
        method,
        path: path.to_string(),
        content_type: header(header::CONTENT_TYPE),
        accept: header(header::ACCEPT),
        user_agent: header(header::USER_AGENT),
        body: body.to_vec(),
    });
}

async fn answer(
    State(state): State<Recorded>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    record(&state, method, "/dns-query", &headers, &body);
    let mut reply = body.to_vec();
    reply.reverse();
    (
        [(header::CONTENT_TYPE, "application/dns-message")],
        reply,
    )
        .into_response()
}

async fn bad_gateway(
    State(state): State<Recorded>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    record(&state, method, "/status/502", &headers, &body);
    StatusCode::BAD_GATEWAY.into_response()
}

async fn slow(
    State(state): State<Recorded>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    record(&state, method, "/slow", &headers, &body);
    tokio::time::sleep(Duration::from_secs(2)).await;
    (StatusCode::OK, body).into_response()
}

async fn redirect(
    State(state): State<Recorded>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    record(&state, method, "/redirect", &headers, &body);
    Redirect::temporary("/dns-query").into_response()
}
