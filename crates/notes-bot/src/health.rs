//! Health, readiness and metrics endpoints

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use tracing::info;

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub uptime_seconds: u64,
    pub transport_connected: bool,
    pub bot_username: Option<String>,
}

/// Point-in-time copy of the counters, served by `GET /metrics`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub messages_received: u64,
    pub commands_processed: u64,
    pub replies_sent: u64,
    pub errors: u64,
}

#[derive(Default)]
struct Counters {
    received: AtomicU64,
    commands: AtomicU64,
    sent: AtomicU64,
    errors: AtomicU64,
}

/// Shared between the command loop and the health server
#[derive(Clone)]
pub struct AppState {
    counters: Arc<Counters>,
    connected: Arc<AtomicBool>,
    started: Instant,
    bot_username: Option<String>,
}

impl AppState {
    pub fn new(bot_username: Option<String>) -> Self {
        Self {
            counters: Arc::default(),
            connected: Arc::new(AtomicBool::new(false)),
            started: Instant::now(),
            bot_username,
        }
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Relaxed);
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    pub fn record_received(&self) {
        self.counters.received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_command(&self) {
        self.counters.commands.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sent(&self) {
        self.counters.sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.counters.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            messages_received: self.counters.received.load(Ordering::Relaxed),
            commands_processed: self.counters.commands.load(Ordering::Relaxed),
            replies_sent: self.counters.sent.load(Ordering::Relaxed),
            errors: self.counters.errors.load(Ordering::Relaxed),
        }
    }

    fn report(&self) -> HealthReport {
        let connected = self.is_connected();
        HealthReport {
            status: if connected { "healthy" } else { "unhealthy" },
            uptime_seconds: self.started.elapsed().as_secs(),
            transport_connected: connected,
            bot_username: self.bot_username.clone(),
        }
    }
}

fn readiness(state: &AppState) -> StatusCode {
    if state.is_connected() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    (readiness(&state), Json(state.report()))
}

async fn metrics(State(state): State<AppState>) -> Json<Metrics> {
    Json(state.metrics())
}

async fn ready(State(state): State<AppState>) -> StatusCode {
    readiness(&state)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/ready", get(ready))
        .route("/live", get(|| async { StatusCode::OK }))
        .with_state(state)
}

/// Serve the health router on `0.0.0.0:{port}` until the process exits.
pub async fn serve(state: AppState, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Health server listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
