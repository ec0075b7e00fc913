pub mod engine;
pub mod extraction;
pub mod intent;
pub mod messages;
pub mod states;

pub use engine::DialogueEngine;
pub use extraction::TagExtraction;
pub use intent::{Intent, TriggerWords};
pub use states::{
    DialogueEvent, DialogueReply, DialogueTurn, StartReply, TransitionOutcome,
};
