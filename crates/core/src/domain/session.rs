use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::category::Category;
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    CollectingDetails,
    ConfirmingResults,
    Completed,
    ModificationMode,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CollectingDetails => "collecting_details",
            Self::ConfirmingResults => "confirming_results",
            Self::Completed => "completed",
            Self::ModificationMode => "modification_mode",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

/// One user's in-progress conversation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    pub people_count: u32,
    pub selected_categories: Vec<Category>,
    pub current_category_index: usize,
    pub collected_tags: BTreeMap<Category, Vec<String>>,
    pub pending_tags: Vec<String>,
    pub stage: Stage,
    pub waiting_for_user_action: bool,
    pub conversation_history: Vec<HistoryEntry>,
    pub last_user_message: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn start(people_count: u32, selected_categories: Vec<Category>) -> Result<Self, DomainError> {
        if people_count == 0 {
            return Err(DomainError::InvalidSession(
                "peopleCount must be greater than zero".to_string(),
            ));
        }
        if selected_categories.is_empty() {
            return Err(DomainError::InvalidSession(
                "selectedCategories must contain at least one category".to_string(),
            ));
        }

        Ok(Self {
            id: SessionId::generate(),
            people_count,
            selected_categories,
            current_category_index: 0,
            collected_tags: BTreeMap::new(),
            pending_tags: Vec::new(),
            stage: Stage::CollectingDetails,
            waiting_for_user_action: false,
            conversation_history: Vec::new(),
            last_user_message: String::new(),
            created_at: Utc::now(),
        })
    }

    pub fn current_category(&self) -> Option<Category> {
        self.selected_categories.get(self.current_category_index).copied()
    }

    pub fn categories_exhausted(&self) -> bool {
        self.current_category_index >= self.selected_categories.len()
    }

    pub fn progress(&self) -> Progress {
        Progress { current: self.current_category_index, total: self.selected_categories.len() }
    }

    /// Appends `new_tags` to the category's list, dropping repeats while keeping
    /// first-seen order, and returns the merged list.
    pub fn merge_tags(&mut self, category: Category, new_tags: Vec<String>) -> Vec<String> {
        let collected = self.collected_tags.entry(category).or_default();
        for tag in new_tags {
            if !collected.contains(&tag) {
                collected.push(tag);
            }
        }
        collected.clone()
    }

    pub fn record(&mut self, role: Role, message: impl Into<String>) {
        self.conversation_history.push(HistoryEntry { role, message: message.into() });
    }
}
