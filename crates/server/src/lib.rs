//! Hotel Concierge Server
//!
//! HTTP endpoints for chatting with the concierge, one isolated conversation
//! per session, plus health and Prometheus metrics.

pub mod http;
pub mod logging;
pub mod metrics;
pub mod session;
pub mod state;

pub use http::create_router;
pub use logging::init_tracing;
pub use metrics::{init_metrics, record_turn};
pub use session::{Session, SessionManager};
pub use state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Session limit of {0} reached")]
    Capacity(usize),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<&ServerError> for StatusCode {
    fn from(err: &ServerError) -> Self {
        match err {
            ServerError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Capacity(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = StatusCode::from(&self);
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
