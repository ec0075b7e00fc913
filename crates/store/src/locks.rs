use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use haru_core::domain::session::SessionId;

/// One async mutex per session id. Holding the guard serializes the
/// load → transition → save cycle for that session only.
#[derive(Clone, Default)]
pub struct SessionLocks {
    locks: Arc<Mutex<HashMap<SessionId, Arc<Mutex<()>>>>>,
}

impl SessionLocks {
    pub async fn acquire(&self, id: &SessionId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(id.clone()).or_default())
        };
        lock.lock_owned().await
    }

    /// Drops the entry for `id`. Holders of an existing guard keep it.
    pub async fn forget(&self, id: &SessionId) {
        self.locks.lock().await.remove(id);
    }

    pub async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}
