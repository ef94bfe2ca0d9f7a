//! Stand-in backend for exercising crossbench over real sockets.
use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Requests served by one mock instance.
#[derive(Clone, Default)]
pub struct Hits(Arc<AtomicU64>);

impl Hits {
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    fn record(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Clone)]
struct AppState {
    name: Arc<str>,
    hits: Hits,
}

pub fn router(name: &str, hits: Hits) -> Router {
    let state = AppState {
        name: name.into(),
        hits,
    };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/delay/ms/:delay_ms", get(delay))
        .route("/status/:code", get(status))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(name: &str, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    serve(name, listener, Hits::default()).await
}

pub async fn serve(name: &str, listener: TcpListener, hits: Hits) -> anyhow::Result<()> {
    debug!("{name} listening on {}", listener.local_addr()?);
    axum::serve(listener, router(name, hits)).await?;
    Ok(())
}

/// Binds an ephemeral local port and serves on it in the background.
pub async fn spawn(name: &str) -> anyhow::Result<(SocketAddr, Hits)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let hits = Hits::default();

    let name = name.to_string();
    let served = hits.clone();
    tokio::spawn(async move {
        if let Err(err) = serve(&name, listener, served).await {
            tracing::error!("{name} stopped: {err}");
        }
    });

    Ok((addr, hits))
}

#[debug_handler]
async fn root(State(state): State<AppState>) -> Json<Value> {
    state.hits.record();
    Json(json!({
        "service": &*state.name,
        "endpoints": ["/health", "/delay/ms/:delay_ms", "/status/:code"],
    }))
}

#[debug_handler]
async fn health(State(state): State<AppState>) -> Json<Value> {
    state.hits.record();
    Json(json!({ "status": "healthy", "service": &*state.name }))
}

#[debug_handler]
async fn delay(State(state): State<AppState>, Path(delay_ms): Path<u64>) -> Json<Value> {
    state.hits.record();
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    Json(json!({ "delay_ms": delay_ms }))
}

#[debug_handler]
async fn status(
    State(state): State<AppState>,
    Path(code): Path<u16>,
) -> (StatusCode, Json<Value>) {
    state.hits.record();
    let code = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (code, Json(json!({ "status": code.as_u16() })))
}
