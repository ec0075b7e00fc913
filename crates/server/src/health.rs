use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::service::ConversationService;

#[derive(Clone)]
pub struct HealthState {
    service: Arc<ConversationService>,
    llm_label: String,
}

impl HealthState {
    pub fn new(service: Arc<ConversationService>, llm_label: impl Into<String>) -> Self {
        Self { service, llm_label: llm_label.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub sessions: HealthCheck,
    pub llm: HealthCheck,
    pub checked_at: String,
}

pub fn router(state: HealthState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let sessions = match state.service.session_ids().await {
        Ok(ids) => HealthCheck { status: "ready", detail: format!("{} active sessions", ids.len()) },
        Err(error) => {
            HealthCheck { status: "degraded", detail: format!("session store unavailable: {error}") }
        }
    };
    let ready = sessions.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "haru-server runtime initialized".to_string(),
        },
        sessions,
        llm: HealthCheck { status: "configured", detail: state.llm_label.clone() },
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}
