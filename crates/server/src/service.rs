use std::sync::Arc;

use tokio::sync::OwnedMutexGuard;

use haru_core::audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
use haru_core::dialogue::{DialogueEngine, DialogueReply, StartReply, TagExtraction};
use haru_core::domain::category::Category;
use haru_core::domain::session::{Session, SessionId};
use haru_core::errors::{ApplicationError, DomainError};
use haru_store::{SessionLocks, SessionRepository};

const ACTOR: &str = "haru-server";

/// Load → transition → save for each turn, one session at a time.
pub struct ConversationService {
    repository: Arc<dyn SessionRepository>,
    locks: SessionLocks,
    engine: DialogueEngine,
    extractor: Arc<dyn TagExtraction>,
    audit: Arc<dyn AuditSink>,
}

impl ConversationService {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        engine: DialogueEngine,
        extractor: Arc<dyn TagExtraction>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self { repository, locks: SessionLocks::default(), engine, extractor, audit }
    }

    pub async fn start(
        &self,
        people_count: i64,
        categories: &[String],
        correlation_id: &str,
    ) -> Result<StartReply, ApplicationError> {
        let (session, reply) = match self.open(people_count, categories) {
            Ok(opened) => opened,
            Err(error) => {
                self.audit.emit(
                    AuditEvent::new(
                        &AuditContext::new(None, correlation_id, ACTOR),
                        "session.start_rejected",
                        AuditCategory::Ingress,
                        AuditOutcome::Rejected,
                    )
                    .with_metadata("reason", error.to_string()),
                );
                return Err(error);
            }
        };
        self.persist(session.clone(), correlation_id).await?;

        self.audit.emit(
            AuditEvent::new(
                &AuditContext::new(Some(session.id.clone()), correlation_id, ACTOR),
                "session.started",
                AuditCategory::Session,
                AuditOutcome::Success,
            )
            .with_metadata("people_count", session.people_count.to_string())
            .with_metadata("categories", session.selected_categories.len().to_string()),
        );

        Ok(reply)
    }

    pub async fn chat(
        &self,
        session_id: &SessionId,
        message: &str,
        correlation_id: &str,
    ) -> Result<DialogueReply, ApplicationError> {
        let (_guard, mut session) = self.lock_existing(session_id).await?;
        let audit = AuditContext::new(Some(session_id.clone()), correlation_id, ACTOR);

        let turn = self
            .engine
            .handle_with_audit(
                &mut session,
                message,
                self.extractor.as_ref(),
                self.audit.as_ref(),
                &audit,
            )
            .await;
        self.persist(session, correlation_id).await?;

        Ok(turn.reply)
    }

    pub async fn confirm_results(
        &self,
        session_id: &SessionId,
        message: &str,
        correlation_id: &str,
    ) -> Result<DialogueReply, ApplicationError> {
        let (_guard, mut session) = self.lock_existing(session_id).await?;
        let audit = AuditContext::new(Some(session_id.clone()), correlation_id, ACTOR);

        let turn = self.engine.confirm_results_with_audit(
            &mut session,
            message,
            self.audit.as_ref(),
            &audit,
        );
        self.persist(session, correlation_id).await?;

        Ok(turn.reply)
    }

    pub async fn session(&self, session_id: &SessionId) -> Result<Session, ApplicationError> {
        self.load(session_id).await
    }

    pub async fn session_ids(&self) -> Result<Vec<SessionId>, ApplicationError> {
        Ok(self.repository.list_ids().await?)
    }

    fn open(
        &self,
        people_count: i64,
        categories: &[String],
    ) -> Result<(Session, StartReply), ApplicationError> {
        let people_count = u32::try_from(people_count).map_err(|_| {
            DomainError::InvalidSession("peopleCount must be greater than zero".to_string())
        })?;
        let categories = categories
            .iter()
            .map(|raw| raw.parse::<Category>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.engine.start(people_count, categories)?)
    }

    /// Unknown ids are rejected before a lock entry is created for them.
    async fn lock_existing(
        &self,
        session_id: &SessionId,
    ) -> Result<(OwnedMutexGuard<()>, Session), ApplicationError> {
        self.load(session_id).await?;
        let guard = self.locks.acquire(session_id).await;
        let session = self.load(session_id).await?;
        Ok((guard, session))
    }

    async fn persist(&self, session: Session, correlation_id: &str) -> Result<(), ApplicationError> {
        let session_id = session.id.clone();
        if let Err(error) = self.repository.save(session).await {
            self.audit.emit(
                AuditEvent::new(
                    &AuditContext::new(Some(session_id), correlation_id, ACTOR),
                    "session.save_failed",
                    AuditCategory::System,
                    AuditOutcome::Failed,
                )
                .with_metadata("error", error.to_string()),
            );
            return Err(error.into());
        }
        Ok(())
    }

    async fn load(&self, session_id: &SessionId) -> Result<Session, ApplicationError> {
        self.repository
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| ApplicationError::SessionNotFound(session_id.clone()))
    }
}
