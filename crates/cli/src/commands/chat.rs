use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use haru_agent::{client_from_config, parse_tags, TagExtractor};
use haru_core::config::{AppConfig, LoadOptions};
use haru_core::dialogue::{DialogueEngine, DialogueReply, TagExtraction};
use haru_core::domain::category::Category;
use haru_core::domain::session::{Session, Stage};

use crate::commands::CommandResult;

/// Tags each word of the message locally instead of asking the LLM.
pub struct OfflineExtractor;

#[async_trait]
impl TagExtraction for OfflineExtractor {
    async fn extract(&self, text: &str, _category: Category, _people_count: u32) -> Vec<String> {
        let tags = parse_tags(&text.replace(char::is_whitespace, ","));
        if tags.is_empty() {
            return vec!["일반적인".to_string()];
        }
        tags
    }
}

pub fn run(people: u32, categories: &[String], offline: bool) -> CommandResult {
    let categories = match categories
        .iter()
        .map(|raw| raw.parse::<Category>())
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(categories) => categories,
        Err(error) => return CommandResult::failure("chat", "invalid_input", error.to_string(), 2),
    };

    let config = if offline {
        AppConfig::default()
    } else {
        match AppConfig::load(LoadOptions::default()) {
            Ok(config) => config,
            Err(error) => {
                return CommandResult::failure("chat", "config_validation", error.to_string(), 2)
            }
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(error) => return CommandResult::failure("chat", "runtime", error.to_string(), 1),
    };

    let outcome = runtime.block_on(async {
        let extractor = build_extractor(&config, offline)?;
        let engine = DialogueEngine::from_config(&config.dialogue);
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        converse(&engine, extractor.as_ref(), people, categories, stdin, &mut stdout).await
    });

    match outcome {
        Ok(session) if session.stage == Stage::Completed => CommandResult::success(
            "chat",
            format!("conversation {} completed", session.id),
        ),
        Ok(session) => CommandResult::failure(
            "chat",
            "incomplete",
            format!("input ended in stage {}", session.stage.as_str()),
            1,
        ),
        Err(error) => CommandResult::failure("chat", "chat_failed", format!("{error:#}"), 1),
    }
}

fn build_extractor(config: &AppConfig, offline: bool) -> Result<Arc<dyn TagExtraction>> {
    if offline {
        return Ok(Arc::new(OfflineExtractor));
    }
    let client = client_from_config(&config.llm)?;
    Ok(Arc::new(TagExtractor::from_config(client, &config.llm, &config.dialogue)))
}

/// Runs one conversation over line-oriented input until it completes or the
/// input ends.
pub async fn converse<R, W>(
    engine: &DialogueEngine,
    extractor: &dyn TagExtraction,
    people: u32,
    categories: Vec<Category>,
    input: R,
    output: &mut W,
) -> Result<Session>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (mut session, start) = engine.start(people, categories)?;
    write_line(output, &format!("하루> {}", start.message)).await?;

    let mut lines = input.lines();
    while session.stage != Stage::Completed {
        let Some(line) = lines.next_line().await.context("failed to read input")? else {
            break;
        };
        let message = line.trim();
        if message.is_empty() {
            continue;
        }

        let turn = engine.handle(&mut session, message, extractor).await;
        write_reply(output, &turn.reply).await?;
    }

    output.flush().await?;
    Ok(session)
}

async fn write_reply<W>(output: &mut W, reply: &DialogueReply) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    write_line(output, &format!("하루> {}", reply.message)).await?;
    if let Some(prompt) = &reply.button_prompt {
        write_line(output, &format!("      [{prompt}]")).await?;
    }
    if let Some(recommendations) = &reply.recommendations {
        for line in recommendations.to_text().lines() {
            write_line(output, &format!("      {line}")).await?;
        }
    }
    Ok(())
}

async fn write_line<W>(output: &mut W, line: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await?;
    Ok(())
}
