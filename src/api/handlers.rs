//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::types::{ChatRequest, ChatResponse, ClearRequest, HistoryResponse, StatusResponse};
use super::AppState;
use crate::chat::DEFAULT_SESSION;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

/// Canned reply for an empty or whitespace-only message
const EMPTY_MESSAGE_REPLY: &str = "Please enter a message.";

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the chat page
        .route("/", get(serve_chat_page))
        // Static assets (embedded or filesystem fallback)
        .route("/assets/*path", get(serve_static))
        // Chat round trip
        .route("/chat", post(chat))
        // Conversation reset
        .route("/clear", post(clear_chat))
        // Transcript read
        .route("/history", get(get_history))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Chat Page
// ============================================================

async fn serve_chat_page() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - UI not found</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// Chat
// ============================================================

async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Json<ChatResponse> {
    // Boundary validation: an empty message never mutates history and
    // never reaches the gateway
    if req.message.trim().is_empty() {
        return Json(ChatResponse::plain(EMPTY_MESSAGE_REPLY));
    }

    let session = req.session.as_deref().unwrap_or(DEFAULT_SESSION);

    match state
        .gateway
        .complete(&state.sessions, session, &req.message)
        .await
    {
        Ok(reply) => Json(ChatResponse::success(reply)),
        // In-band failure: HTTP 200 with status "error"
        Err(e) => Json(ChatResponse::error(format!(
            "I'm sorry, I encountered an error: {e}"
        ))),
    }
}

// ============================================================
// Clear
// ============================================================

async fn clear_chat(
    State(state): State<AppState>,
    body: Option<Json<ClearRequest>>,
) -> Json<StatusResponse> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let session = req.session.as_deref().unwrap_or(DEFAULT_SESSION);

    state.sessions.clear(session);

    Json(StatusResponse { status: "success" })
}

// ============================================================
// History
// ============================================================

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    session: Option<String>,
}

async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let session = query.session.as_deref().unwrap_or(DEFAULT_SESSION);

    Json(HistoryResponse {
        turns: state.sessions.snapshot(session),
    })
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("fitbot ", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatGateway;
    use crate::llm::testing::ScriptedService;
    use crate::llm::CompletionError;
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> (Router, Arc<ScriptedService>, AppState) {
        let service = Arc::new(ScriptedService::new());
        let state = AppState::new(ChatGateway::new(service.clone()));
        (create_router(state.clone()), service, state)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn chat_success_round_trip() {
        let (app, service, state) = test_app();
        service.push_reply("Try three sets of push-ups.");

        let response = app
            .oneshot(post_json("/chat", json!({"message": "Upper body ideas?"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["response"], "Try three sets of push-ups.");
        assert_eq!(body["status"], "success");

        assert_eq!(state.sessions.snapshot(DEFAULT_SESSION).len(), 2);
    }

    #[tokio::test]
    async fn empty_message_short_circuits() {
        let (app, service, state) = test_app();

        let response = app
            .oneshot(post_json("/chat", json!({"message": "   "})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["response"], "Please enter a message.");
        // No status field on the canned reply
        assert!(body.get("status").is_none());

        // No gateway call, no history mutation
        assert_eq!(service.call_count(), 0);
        assert!(state.sessions.snapshot(DEFAULT_SESSION).is_empty());
    }

    #[tokio::test]
    async fn gateway_failure_reports_in_band() {
        let (app, service, state) = test_app();
        service.push_error(CompletionError::rate_limit("rate limit exceeded"));

        let response = app
            .oneshot(post_json("/chat", json!({"message": "hello"})))
            .await
            .unwrap();
        // The failure travels in the body, not the HTTP status
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(
            body["response"],
            "I'm sorry, I encountered an error: rate limit exceeded"
        );
        assert_eq!(body["status"], "error");

        // User turn recorded, no assistant turn
        assert_eq!(state.sessions.snapshot(DEFAULT_SESSION).len(), 1);
    }

    #[tokio::test]
    async fn clear_resets_mid_conversation() {
        let (app, service, state) = test_app();
        service.push_reply("first");
        service.push_reply("second");

        let app_clone = app.clone();
        app_clone
            .oneshot(post_json("/chat", json!({"message": "one"})))
            .await
            .unwrap();
        assert_eq!(state.sessions.snapshot(DEFAULT_SESSION).len(), 2);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/clear")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = response_json(response).await;
        assert_eq!(body["status"], "success");
        assert!(state.sessions.snapshot(DEFAULT_SESSION).is_empty());

        // Next exchange starts a fresh window
        app.oneshot(post_json("/chat", json!({"message": "two"})))
            .await
            .unwrap();
        let requests = service.requests();
        assert_eq!(requests[1].messages.len(), 1);
    }

    #[tokio::test]
    async fn chat_addresses_the_named_session() {
        let (app, service, state) = test_app();
        service.push_reply("ok");

        app.oneshot(post_json(
            "/chat",
            json!({"message": "hi", "session": "alice"}),
        ))
        .await
        .unwrap();

        assert_eq!(state.sessions.snapshot("alice").len(), 2);
        assert!(state.sessions.snapshot(DEFAULT_SESSION).is_empty());
    }

    #[tokio::test]
    async fn history_returns_the_transcript() {
        let (app, service, _state) = test_app();
        service.push_reply("Eat more protein.");

        let app_clone = app.clone();
        app_clone
            .oneshot(post_json("/chat", json!({"message": "diet tips?"})))
            .await
            .unwrap();

        let response = app
            .oneshot(Request::builder().uri("/history").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = response_json(response).await;

        let turns = body["turns"].as_array().unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0]["role"], "user");
        assert_eq!(turns[0]["content"], "diet tips?");
        assert_eq!(turns[1]["role"], "assistant");
        assert_eq!(turns[1]["content"], "Eat more protein.");
    }

    #[tokio::test]
    async fn version_reports_package_version() {
        let (app, _service, _state) = test_app();

        let response = app
            .oneshot(Request::builder().uri("/version").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("fitbot "));
    }
}
