use async_trait::async_trait;
use thiserror::Error;

use haru_core::domain::session::{Session, SessionId};
use haru_core::errors::ApplicationError;

pub mod memory;

pub use memory::InMemorySessionRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

impl From<RepositoryError> for ApplicationError {
    fn from(error: RepositoryError) -> Self {
        ApplicationError::Persistence(error.to_string())
    }
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError>;
    async fn save(&self, session: Session) -> Result<(), RepositoryError>;
    /// Returns whether a session was removed.
    async fn delete(&self, id: &SessionId) -> Result<bool, RepositoryError>;
    async fn list_ids(&self) -> Result<Vec<SessionId>, RepositoryError>;
}
