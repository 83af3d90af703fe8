//! HTTP Endpoints
//!
//! REST API for driving a call. Sequencing mistakes (submitting with no
//! active call, closing twice) are not errors: the operation is a no-op and
//! the response carries the unchanged session.

use axum::{
    extract::{Json, State},
    http::{HeaderValue, Method},
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use tokio_stream::{Stream, StreamExt};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use call_agent_agent::SessionSnapshot;
use call_agent_config::{ContextForm, ContextUpdate};
use call_agent_core::{CallContext, ConversationTurn};

use crate::state::AppState;
use crate::ServerError;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.config.server.cors_origins,
        state.config.server.cors_enabled,
    );

    Router::new()
        // Call lifecycle
        .route("/api/call", get(get_call))
        .route("/api/call/start", post(start_call))
        .route("/api/call/utterance", post(submit_utterance))
        .route("/api/call/silence", post(trigger_silence))
        .route("/api/call/close", post(close_call))
        .route("/api/call/reset", post(reset_session))
        .route("/api/call/summary", get(get_summary))
        .route("/api/call/events", get(call_events))
        // Context editing
        .route("/api/context", get(get_context).put(update_context))
        // Health check
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - cors_enabled = false: permissive (development only)
/// - no origins configured: localhost:3000
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any);

    if parsed_origins.is_empty() {
        tracing::info!("No usable CORS origins configured, defaulting to localhost:3000");
        return layer.allow_origin(HeaderValue::from_static("http://localhost:3000"));
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    layer.allow_origin(parsed_origins)
}

/// Turns produced by an operation plus the resulting session
#[derive(Debug, Serialize, Deserialize)]
pub struct CallResponse {
    pub turns: Vec<ConversationTurn>,
    pub call: SessionSnapshot,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UtteranceRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

async fn get_call(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.assistant.lock().snapshot())
}

async fn start_call(State(state): State<AppState>) -> Json<CallResponse> {
    let mut assistant = state.assistant.lock();
    let turns = assistant.start_call().into_iter().collect();
    Json(CallResponse {
        turns,
        call: assistant.snapshot(),
    })
}

async fn submit_utterance(
    State(state): State<AppState>,
    Json(request): Json<UtteranceRequest>,
) -> Json<CallResponse> {
    let mut assistant = state.assistant.lock();
    let turns = assistant.submit_caller_utterance(&request.text);
    Json(CallResponse {
        turns,
        call: assistant.snapshot(),
    })
}

async fn trigger_silence(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let mut assistant = state.assistant.lock();
    assistant.trigger_silence_escalation();
    Json(assistant.snapshot())
}

async fn close_call(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let mut assistant = state.assistant.lock();
    assistant.close_call();
    Json(assistant.snapshot())
}

async fn reset_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let mut assistant = state.assistant.lock();
    assistant.reset_session();
    Json(assistant.snapshot())
}

async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    Json(SummaryResponse {
        summary: state.assistant.lock().generate_summary(),
    })
}

/// Stream call events to a renderer as server-sent events
async fn call_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let receiver = state.assistant.lock().subscribe();
    tracing::debug!("Event stream subscriber attached");

    let stream = BroadcastStream::new(receiver).filter_map(|event| match event {
        Ok(event) => Some(Event::default().event(event.name()).json_data(&event)),
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "Event stream subscriber lagged");
            None
        },
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

async fn get_context(State(state): State<AppState>) -> Json<CallContext> {
    Json(state.assistant.lock().context().clone())
}

async fn update_context(
    State(state): State<AppState>,
    Json(form): Json<ContextForm>,
) -> Result<Json<CallContext>, ServerError> {
    let mut assistant = state.assistant.lock();
    assistant.update_context(ContextUpdate::from_form(form))?;
    Ok(Json(assistant.context().clone()))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
