//! Conversation HTTP routes.
//!
//! - `GET  /`                        — liveness banner
//! - `POST /api/start`               — open a session, returns the first question
//! - `POST /api/chat`                — one user turn
//! - `POST /api/confirm-results`     — older results-confirmation path
//! - `GET  /api/sessions`            — ids of stored sessions (debug)
//! - `GET  /api/sessions/{id}`       — full session state (debug)

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use haru_core::dialogue::{DialogueReply, StartReply};
use haru_core::domain::session::{Session, SessionId};
use haru_core::errors::{ApplicationError, InterfaceError};

use crate::service::ConversationService;

const CORRELATION_HEADER: &str = "x-correlation-id";

#[derive(Clone)]
pub struct ConversationState {
    service: Arc<ConversationService>,
}

impl ConversationState {
    pub fn new(service: Arc<ConversationService>) -> Self {
        Self { service }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRequest {
    pub people_count: i64,
    pub selected_categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub reply: StartReply,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub reply: DialogueReply,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub total: usize,
    pub sessions: Vec<SessionId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub error: String,
    pub detail: String,
    pub correlation_id: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

pub fn router(service: Arc<ConversationService>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/start", post(start))
        .route("/api/chat", post(chat))
        .route("/api/confirm-results", post(confirm_results))
        .route("/api/sessions", get(list_sessions))
        .route("/api/sessions/{id}", get(get_session))
        .with_state(ConversationState::new(service))
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        status: "ok",
        message: "Haru GPT API is running!",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn start(
    headers: HeaderMap,
    State(state): State<ConversationState>,
    body: Result<Json<StartRequest>, JsonRejection>,
) -> ApiResult<StartResponse> {
    let correlation_id = correlation_id(&headers);
    let request = parse_body(body, &correlation_id)?;

    let reply = state
        .service
        .start(request.people_count, &request.selected_categories, &correlation_id)
        .await
        .map_err(|error| reject(error, &correlation_id))?;

    info!(
        event_name = "ingress.session_started",
        correlation_id = %correlation_id,
        session_id = %reply.session_id,
        categories = request.selected_categories.len(),
        "conversation session started"
    );
    Ok(Json(StartResponse { status: "success", reply }))
}

pub async fn chat(
    headers: HeaderMap,
    State(state): State<ConversationState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<ChatResponse> {
    let correlation_id = correlation_id(&headers);
    let request = parse_body(body, &correlation_id)?;
    let session_id = SessionId(request.session_id);

    let reply = state
        .service
        .chat(&session_id, &request.message, &correlation_id)
        .await
        .map_err(|error| reject(error, &correlation_id))?;

    info!(
        event_name = "ingress.chat_handled",
        correlation_id = %correlation_id,
        session_id = %session_id,
        stage = reply.stage.as_str(),
        "chat turn handled"
    );
    Ok(Json(ChatResponse { status: "success", reply }))
}

pub async fn confirm_results(
    headers: HeaderMap,
    State(state): State<ConversationState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<ChatResponse> {
    let correlation_id = correlation_id(&headers);
    let request = parse_body(body, &correlation_id)?;
    let session_id = SessionId(request.session_id);

    let reply = state
        .service
        .confirm_results(&session_id, &request.message, &correlation_id)
        .await
        .map_err(|error| reject(error, &correlation_id))?;

    Ok(Json(ChatResponse { status: "success", reply }))
}

pub async fn list_sessions(State(state): State<ConversationState>) -> ApiResult<SessionListResponse> {
    let correlation_id = Uuid::new_v4().to_string();
    let sessions =
        state.service.session_ids().await.map_err(|error| reject(error, &correlation_id))?;

    Ok(Json(SessionListResponse { total: sessions.len(), sessions }))
}

pub async fn get_session(
    Path(id): Path<String>,
    State(state): State<ConversationState>,
) -> ApiResult<Session> {
    let correlation_id = Uuid::new_v4().to_string();
    let session = state
        .service
        .session(&SessionId(id))
        .await
        .map_err(|error| reject(error, &correlation_id))?;

    Ok(Json(session))
}

fn correlation_id(headers: &HeaderMap) -> String {
    headers
        .get(CORRELATION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Body rejections answer with the same error shape as every other 400.
fn parse_body<T>(
    body: Result<Json<T>, JsonRejection>,
    correlation_id: &str,
) -> Result<T, (StatusCode, Json<ApiError>)> {
    body.map(|Json(request)| request).map_err(|rejection| {
        reject(ApplicationError::InvalidRequest(rejection.body_text()), correlation_id)
    })
}

fn reject(error: ApplicationError, correlation_id: &str) -> (StatusCode, Json<ApiError>) {
    let interface = error.into_interface(correlation_id);
    let status = match &interface {
        InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        InterfaceError::NotFound { .. } => StatusCode::NOT_FOUND,
        InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
    };

    warn!(
        event_name = "ingress.request_rejected",
        correlation_id = %interface.correlation_id(),
        status = status.as_u16(),
        detail = %interface.detail(),
        "request rejected"
    );

    (
        status,
        Json(ApiError {
            error: interface.user_message().to_string(),
            detail: interface.detail().to_string(),
            correlation_id: interface.correlation_id().to_string(),
        }),
    )
}
