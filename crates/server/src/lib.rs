//! Call Assistant Server
//!
//! Exposes the call assistant's boundary operations as JSON endpoints.

pub mod http;
pub mod state;

pub use http::create_router;
pub use state::AppState;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use call_agent_agent::AgentError;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<ServerError> for StatusCode {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<AgentError> for ServerError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::Context(inner) => ServerError::InvalidRequest(inner.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let status = StatusCode::from(self);
        tracing::warn!(error = %message, status = status.as_u16(), "Request rejected");
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
