//! Agent - LLM-backed keyword tagging for the dialogue
//!
//! This crate turns what a user says about an activity into short keyword
//! tags the recommendation table understands:
//! - Builds category-specific instructions (`prompts`)
//! - Talks to an OpenAI-compatible or Ollama endpoint (`llm`)
//! - Retries thin answers and falls back locally on any failure (`tagging`)
//!
//! # Safety Principle
//!
//! The LLM only proposes tags. Stage changes and recommendations are decided
//! by the deterministic dialogue engine in `haru-core`.

pub mod llm;
pub mod prompts;
pub mod tagging;

pub use llm::{client_from_config, ChatPrompt, LlmClient, OllamaClient, OpenAiClient};
pub use tagging::{parse_tags, TagExtractor};
