use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use haru_agent::{client_from_config, TagExtractor};
use haru_core::audit::TracingAuditSink;
use haru_core::config::{AppConfig, ConfigError, LoadOptions};
use haru_core::dialogue::DialogueEngine;
use haru_store::InMemorySessionRepository;

use crate::conversation;
use crate::health::{self, HealthState};
use crate::service::ConversationService;

pub struct Application {
    pub config: AppConfig,
    pub service: Arc<ConversationService>,
    pub llm_label: String,
}

impl Application {
    pub fn router(&self) -> Router {
        conversation::router(Arc::clone(&self.service))
            .merge(health::router(HealthState::new(
                Arc::clone(&self.service),
                self.llm_label.clone(),
            )))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("llm client setup failed: {0}")]
    LlmClient(String),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    let client = client_from_config(&config.llm)
        .map_err(|error| BootstrapError::LlmClient(format!("{error:#}")))?;
    let llm_label = client.describe();
    info!(
        event_name = "system.bootstrap.llm_ready",
        correlation_id = "bootstrap",
        provider = config.llm.provider.as_str(),
        model = %config.llm.model,
        timeout_secs = config.llm.timeout_secs,
        "llm client configured"
    );

    let extractor = TagExtractor::from_config(client, &config.llm, &config.dialogue);
    let service = ConversationService::new(
        Arc::new(InMemorySessionRepository::default()),
        DialogueEngine::from_config(&config.dialogue),
        Arc::new(extractor),
        Arc::new(TracingAuditSink),
    );

    Ok(Application { config, service: Arc::new(service), llm_label })
}
