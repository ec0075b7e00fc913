pub mod audit;
pub mod config;
pub mod dialogue;
pub mod domain;
pub mod errors;
pub mod recommendation;

pub use audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
pub use dialogue::{DialogueEngine, DialogueReply, DialogueTurn, StartReply, TagExtraction};
pub use domain::category::Category;
pub use domain::session::{HistoryEntry, Progress, Role, Session, SessionId, Stage};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use recommendation::Recommendations;
