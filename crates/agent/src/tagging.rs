use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use haru_core::config::{DialogueConfig, LlmConfig};
use haru_core::dialogue::TagExtraction;
use haru_core::domain::category::Category;

use crate::llm::{ChatPrompt, LlmClient};
use crate::prompts;

const BLANK_INPUT_TAG: &str = "일반적인";

fn fragments(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|tag| !tag.is_empty())
}

/// Splits a comma-separated model answer into trimmed, distinct tags.
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in fragments(raw) {
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

pub struct TagExtractor {
    client: Arc<dyn LlmClient>,
    timeout: Duration,
    min_tags: usize,
    fallback_chars: usize,
}

impl TagExtractor {
    pub fn new(
        client: Arc<dyn LlmClient>,
        timeout: Duration,
        min_tags: usize,
        fallback_chars: usize,
    ) -> Self {
        Self { client, timeout, min_tags, fallback_chars }
    }

    pub fn from_config(client: Arc<dyn LlmClient>, llm: &LlmConfig, dialogue: &DialogueConfig) -> Self {
        Self::new(
            client,
            Duration::from_secs(llm.timeout_secs),
            dialogue.min_tags,
            dialogue.fallback_tag_chars,
        )
    }

    pub fn client(&self) -> &Arc<dyn LlmClient> {
        &self.client
    }

    /// One request, plus a single retry when the answer has fewer than
    /// `min_tags` non-empty fragments (repeats counted). The retry's answer
    /// replaces the first one.
    pub async fn try_extract(
        &self,
        text: &str,
        category: Category,
        people_count: u32,
    ) -> Result<Vec<String>> {
        let prompt = prompts::tagging_prompt(category, text, people_count);

        let raw = self.request(&prompt).await?;
        let fragment_count = fragments(&raw).count();
        if fragment_count >= self.min_tags {
            return Ok(parse_tags(&raw));
        }

        tracing::debug!(
            event_name = "agent.tag_extraction_retry",
            category = %category,
            tag_count = fragment_count,
            "too few tags, retrying once"
        );
        let retried = self.request(&prompt).await?;
        Ok(parse_tags(&retried))
    }

    /// Leading characters of the message, or a generic tag for blank input.
    pub fn fallback(&self, text: &str) -> Vec<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return vec![BLANK_INPUT_TAG.to_string()];
        }
        vec![trimmed.chars().take(self.fallback_chars).collect()]
    }

    async fn request(&self, prompt: &ChatPrompt) -> Result<String> {
        tokio::time::timeout(self.timeout, self.client.complete(prompt))
            .await
            .map_err(|_| anyhow!("tag extraction timed out after {:?}", self.timeout))?
    }
}

#[async_trait]
impl TagExtraction for TagExtractor {
    async fn extract(&self, text: &str, category: Category, people_count: u32) -> Vec<String> {
        match self.try_extract(text, category, people_count).await {
            Ok(tags) if !tags.is_empty() => tags,
            Ok(_) => self.fallback(text),
            Err(error) => {
                tracing::warn!(
                    event_name = "agent.tag_extraction_failed",
                    category = %category,
                    client = %self.client.describe(),
                    error = %error,
                    "tag extraction failed, using fallback tag"
                );
                self.fallback(text)
            }
        }
    }
}
