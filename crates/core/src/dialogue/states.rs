use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::session::{Progress, SessionId, Stage};
use crate::recommendation::Recommendations;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueEvent {
    FreeTextReceived,
    ContinueChosen,
    MoreChosen,
    UnclearAction,
    ResultsRequested,
    ResultsDeclined,
    CategoryPicked,
    CategoryNotNamed,
    ModificationRequested,
    AlreadyCompleted,
}

impl DialogueEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FreeTextReceived => "free_text_received",
            Self::ContinueChosen => "continue_chosen",
            Self::MoreChosen => "more_chosen",
            Self::UnclearAction => "unclear_action",
            Self::ResultsRequested => "results_requested",
            Self::ResultsDeclined => "results_declined",
            Self::CategoryPicked => "category_picked",
            Self::CategoryNotNamed => "category_not_named",
            Self::ModificationRequested => "modification_requested",
            Self::AlreadyCompleted => "already_completed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransitionOutcome {
    pub from: Stage,
    pub to: Stage,
    pub event: DialogueEvent,
}

/// What the assistant says back after one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueReply {
    pub message: String,
    pub stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Recommendations>,
    pub show_buttons: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_categories: Option<Vec<Category>>,
}

impl DialogueReply {
    pub fn new(message: impl Into<String>, stage: Stage) -> Self {
        Self {
            message: message.into(),
            stage,
            tags: None,
            progress: None,
            recommendations: None,
            show_buttons: false,
            button_prompt: None,
            current_category: None,
            available_categories: None,
        }
    }

    pub fn with_buttons(mut self, prompt: impl Into<String>) -> Self {
        self.show_buttons = true;
        self.button_prompt = Some(prompt.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_recommendations(mut self, recommendations: Recommendations) -> Self {
        self.recommendations = Some(recommendations);
        self
    }

    pub fn with_current_category(mut self, category: Category) -> Self {
        self.current_category = Some(category);
        self
    }

    pub fn with_available_categories(mut self, categories: Vec<Category>) -> Self {
        self.available_categories = Some(categories);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartReply {
    pub session_id: SessionId,
    pub message: String,
    pub stage: Stage,
    pub progress: Progress,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogueTurn {
    pub reply: DialogueReply,
    pub transition: TransitionOutcome,
}
