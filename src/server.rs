//! HTTP and WebSocket front door.
//!
//! Feeds `(message, sourceLang, targetLang)` into the shared
//! [`ResolutionEngine`] and relays the result. Each WebSocket connection is
//! served by its own task, so a slow translation never blocks other clients.

use crate::engine::{ResolutionEngine, ResolveError, TranslationRequest, TranslationResult};
use crate::metrics::MetricsReport;
use anyhow::{Context, Result};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

const SERVICE_NAME: &str = "LinguaBridge Translation API";

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<ResolutionEngine>,
    started: Instant,
    next_connection_id: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(engine: Arc<ResolutionEngine>) -> Self {
        Self {
            engine,
            started: Instant::now(),
            next_connection_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    uptime_seconds: f64,
    metrics: MetricsReport,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
}

impl From<&ResolveError> for ErrorBody {
    fn from(err: &ResolveError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind(),
        }
    }
}

/// Events pushed to WebSocket clients.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
enum ServerEvent {
    Connected {
        message: &'static str,
        timestamp: DateTime<Utc>,
    },
    ReceiveMessage(TranslationResult),
    TranslationError {
        error: String,
        kind: &'static str,
    },
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/translate", post(translate))
        .route("/ws", get(ws_upgrade))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `0.0.0.0:port` and serve until the process exits.
pub async fn serve(port: u16, engine: Arc<ResolutionEngine>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Server running on port {}", port);

    axum::serve(listener, router(AppState::new(engine)))
        .await
        .context("Server error")
}

async fn root() -> &'static str {
    "LinguaBridge Translation API is running successfully"
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        uptime_seconds: state.started.elapsed().as_secs_f64(),
        metrics: state.engine.metrics().report(),
    })
}

async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslationRequest>,
) -> Response {
    match state.engine.resolve_request(&request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => {
            info!("Rejected translation request: {}", err);
            (StatusCode::BAD_REQUEST, Json(ErrorBody::from(&err))).into_response()
        }
    }
}

async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let connection_id = state.next_connection_id.fetch_add(1, Ordering::Relaxed);
    info!("New WebSocket connection #{}", connection_id);

    let greeting = ServerEvent::Connected {
        message: "Connected to LinguaBridge translation server",
        timestamp: Utc::now(),
    };
    if !send_event(&mut socket, &greeting).await {
        return;
    }

    while let Some(frame) = socket.recv().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                debug!("WebSocket #{} receive error: {}", connection_id, e);
                break;
            }
        };

        debug!("Translation request from #{}", connection_id);
        let event = handle_frame(&state.engine, &text).await;
        if !send_event(&mut socket, &event).await {
            break;
        }
    }

    info!("WebSocket connection #{} closed", connection_id);
}

/// Resolve one inbound text frame into the event to send back.
async fn handle_frame(engine: &ResolutionEngine, text: &str) -> ServerEvent {
    let request: TranslationRequest = match serde_json::from_str(text) {
        Ok(request) => request,
        Err(e) => {
            return ServerEvent::TranslationError {
                error: format!("invalid request: {}", e),
                kind: "invalid_request",
            }
        }
    };

    match engine.resolve_request(&request).await {
        Ok(result) => ServerEvent::ReceiveMessage(result),
        Err(err) => {
            let body = ErrorBody::from(&err);
            ServerEvent::TranslationError {
                error: body.error,
                kind: body.kind,
            }
        }
    }
}

/// Send an event; `false` once the peer is gone.
async fn send_event(socket: &mut WebSocket, event: &ServerEvent) -> bool {
    let payload = match serde_json::to_string(event) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Failed to serialize event: {}", e);
            return true;
        }
    };
    socket.send(Message::Text(payload)).await.is_ok()
}
