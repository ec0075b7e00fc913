pub mod locks;
pub mod repositories;

pub use locks::SessionLocks;
pub use repositories::{InMemorySessionRepository, RepositoryError, SessionRepository};
