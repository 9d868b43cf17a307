//! HTTP Endpoints
//!
//! REST API for the hotel concierge.

use axum::{
    extract::{Json, Path, State},
    http::{HeaderValue, Method, StatusCode},
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use hotel_concierge_agent::Analysis;
use hotel_concierge_core::TurnResult;

use crate::metrics::{metrics_handler, record_turn};
use crate::state::AppState;
use crate::ServerError;

/// Default number of predictions returned by `/api/analyze`
const DEFAULT_TOP_K: usize = 3;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.config.server.cors_origins,
        state.config.server.cors_enabled,
    );

    Router::new()
        // Session endpoints
        .route("/api/sessions", post(create_session).get(list_sessions))
        .route("/api/sessions/:id", delete(delete_session))
        .route("/api/sessions/:id/context", get(get_context))
        .route("/api/sessions/:id/reset", post(reset_session))
        // Chat
        .route("/api/chat/:session_id", post(chat))
        .route("/api/analyze", post(analyze))
        // Health check
        .route("/health", get(health_check))
        // Prometheus metrics
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns a permissive layer
/// - If cors_origins is empty, any origin is allowed
/// - Otherwise, uses the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins");
        return CorsLayer::permissive();
    }

    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!(origin = %origin, "Invalid CORS origin");
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::error!("All configured CORS origins are invalid, allowing any origin");
        return base.allow_origin(Any);
    }

    tracing::info!(origins = parsed_origins.len(), "CORS configured");
    base.allow_origin(parsed_origins)
}

#[derive(Debug, Serialize)]
struct SessionCreated {
    session_id: String,
    hotel_name: String,
}

/// Create a session
async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionCreated>), ServerError> {
    let session = state.sessions.create()?;
    let hotel_name = session.with_chatbot(|bot| bot.context().hotel_name().to_string());
    Ok((
        StatusCode::CREATED,
        Json(SessionCreated {
            session_id: session.id.clone(),
            hotel_name,
        }),
    ))
}

/// List sessions
async fn list_sessions(State(state): State<AppState>) -> Json<serde_json::Value> {
    let sessions = state.sessions.list();
    Json(serde_json::json!({
        "sessions": sessions,
        "count": sessions.len(),
    }))
}

/// Delete session
async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    if state.sessions.remove(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::SessionNotFound(id))
    }
}

#[derive(Debug, Serialize)]
struct ContextResponse {
    session_id: String,
    summary: String,
    history_length: usize,
    last_intent: Option<String>,
    has_partial_booking: bool,
    age_secs: u64,
}

/// Conversation summary for a session
async fn get_context(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContextResponse>, ServerError> {
    let session = state.sessions.get(&id)?;
    let response = session.with_chatbot(|bot| {
        let ctx = bot.context();
        ContextResponse {
            session_id: id.clone(),
            summary: ctx.context_summary(),
            history_length: ctx.history().len(),
            last_intent: ctx.last_intent().map(str::to_string),
            has_partial_booking: ctx.has_partial_booking(),
            age_secs: session.age().as_secs(),
        }
    });
    Ok(Json(response))
}

/// Reset a session's conversation; the hotel identity stays
async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let session = state.sessions.get(&id)?;
    let summary = session.with_chatbot(|bot| {
        bot.reset_context();
        bot.context_summary()
    });
    Ok(Json(serde_json::json!({
        "session_id": id,
        "summary": summary,
    })))
}

/// Chat request
#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
}

/// Chat endpoint
async fn chat(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<TurnResult>, ServerError> {
    let session = state.sessions.get(&session_id)?;

    let started = Instant::now();
    let turn = tokio::task::spawn_blocking(move || {
        session.with_chatbot(|bot| bot.respond(&request.message))
    })
    .await
    .map_err(|e| ServerError::Internal(e.to_string()))?;
    record_turn(&turn, started.elapsed());

    tracing::info!(
        session_id = %session_id,
        intent = %turn.intent,
        confidence = turn.confidence,
        rejected = turn.is_rejected(),
        "Chat turn"
    );

    Ok(Json(turn))
}

/// Analyze request
#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    message: String,
    #[serde(default)]
    top_k: Option<usize>,
}

/// Ranked intents and entities, without any session
async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<Analysis>, ServerError> {
    let k = request.top_k.unwrap_or(DEFAULT_TOP_K);
    if k == 0 {
        return Err(ServerError::InvalidRequest("top_k must be at least 1".to_string()));
    }

    let resources = state.resources();
    Ok(Json(Analysis {
        predictions: resources.predictor().top_k(&request.message, k),
        entities: resources.extractor().extract(&request.message),
    }))
}

/// Health check
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let resources = state.resources();
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "hotel": resources.hotel().hotel_name(),
        "predictor": resources.predictor().name(),
        "sessions": state.sessions.count(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::resources;
    use axum::body::Body;
    use axum::http::Request;
    use hotel_concierge_config::Settings;
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState::new(Settings::default(), resources())
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn test_router_creation() {
        let _ = create_router(state());
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_router(state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["hotel"], "Sunset Bay Hotel");
    }

    #[tokio::test]
    async fn test_session_chat_flow() {
        let state = state();
        let app = create_router(state.clone());

        let response = app
            .clone()
            .oneshot(
                Request::post("/api/sessions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let session_id = body_json(response).await["session_id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/api/chat/{}", session_id),
                serde_json::json!({ "message": "hello there" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let turn = body_json(response).await;
        assert_eq!(turn["intent"], "greet");
        assert_eq!(turn["response"], "Welcome to Sunset Bay Hotel!");
        assert!(turn.get("validation").is_none());

        let response = app
            .clone()
            .oneshot(
                Request::get(format!("/api/sessions/{}/context", session_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let context = body_json(response).await;
        assert_eq!(context["history_length"], 2);
        assert_eq!(context["last_intent"], "greet");

        let response = app
            .clone()
            .oneshot(
                Request::post(format!("/api/sessions/{}/reset", session_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_json(response).await["summary"], "Hotel: Sunset Bay Hotel");

        let response = app
            .oneshot(
                Request::delete(format!("/api/sessions/{}", session_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(state.sessions.count(), 0);
    }

    #[tokio::test]
    async fn test_rejected_message_reports_reason() {
        let state = state();
        let session = state.sessions.create().unwrap();
        let app = create_router(state);

        let response = app
            .oneshot(post_json(
                &format!("/api/chat/{}", session.id),
                serde_json::json!({ "message": "asdfghjkl" }),
            ))
            .await
            .unwrap();
        let turn = body_json(response).await;
        assert_eq!(turn["intent"], "invalid_input");
        assert_eq!(turn["validation"]["reason"], "gibberish_pattern");
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let app = create_router(state());
        let response = app
            .oneshot(post_json(
                "/api/chat/does-not-exist",
                serde_json::json!({ "message": "hello" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_analyze() {
        let app = create_router(state());
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/analyze",
                serde_json::json!({ "message": "hello there", "top_k": 2 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["predictions"][0]["intent"], "greet");
        assert_eq!(body["entities"]["raw_text"], "hello there");

        let response = app
            .oneshot(post_json(
                "/api/analyze",
                serde_json::json!({ "message": "hello", "top_k": 0 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
