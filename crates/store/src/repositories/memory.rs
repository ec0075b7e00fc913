use std::collections::HashMap;

use tokio::sync::RwLock;

use haru_core::domain::session::{Session, SessionId};

use super::{RepositoryError, SessionRepository};

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionRepository {
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn save(&self, session: Session) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id.clone(), session);
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, RepositoryError> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.remove(id).is_some())
    }

    async fn list_ids(&self) -> Result<Vec<SessionId>, RepositoryError> {
        let sessions = self.sessions.read().await;
        let mut ids = sessions.keys().cloned().collect::<Vec<_>>();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use haru_core::domain::category::Category;
    use haru_core::domain::session::{Session, SessionId, Stage};

    use crate::repositories::{InMemorySessionRepository, SessionRepository};

    fn session() -> Session {
        Session::start(2, vec![Category::Cafe, Category::Content]).expect("session")
    }

    #[tokio::test]
    async fn in_memory_session_repo_round_trip() {
        let repo = InMemorySessionRepository::default();
        let session = session();

        repo.save(session.clone()).await.expect("save session");
        let found = repo.find_by_id(&session.id).await.expect("find session");

        assert_eq!(found, Some(session));
    }

    #[tokio::test]
    async fn save_replaces_existing_state() {
        let repo = InMemorySessionRepository::default();
        let mut session = session();
        repo.save(session.clone()).await.expect("save session");

        session.stage = Stage::ConfirmingResults;
        repo.save(session.clone()).await.expect("save session");

        let found = repo.find_by_id(&session.id).await.expect("find session");
        assert_eq!(found.map(|s| s.stage), Some(Stage::ConfirmingResults));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn unknown_id_is_absent() {
        let repo = InMemorySessionRepository::default();

        let found = repo.find_by_id(&SessionId("missing".into())).await.expect("find session");

        assert!(found.is_none());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn delete_and_list_ids() {
        let repo = InMemorySessionRepository::default();
        let first = session();
        let second = session();
        repo.save(first.clone()).await.expect("save first");
        repo.save(second.clone()).await.expect("save second");

        let mut expected = vec![first.id.clone(), second.id.clone()];
        expected.sort();
        assert_eq!(repo.list_ids().await.expect("list"), expected);

        assert!(repo.delete(&first.id).await.expect("delete"));
        assert!(!repo.delete(&first.id).await.expect("delete again"));
        assert_eq!(repo.list_ids().await.expect("list"), vec![second.id]);
    }
}
