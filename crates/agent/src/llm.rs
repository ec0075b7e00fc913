use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};

use haru_core::config::{LlmConfig, LlmProvider};

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// A single system + user exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String>;

    /// Short label for logs and health output.
    fn describe(&self) -> String {
        "llm".to_string()
    }
}

pub fn client_from_config(config: &LlmConfig) -> Result<Arc<dyn LlmClient>> {
    match config.provider {
        LlmProvider::OpenAi => Ok(Arc::new(OpenAiClient::from_config(config)?)),
        LlmProvider::Ollama => Ok(Arc::new(OllamaClient::from_config(config)?)),
    }
}

fn http_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("failed to build http client")
}

fn messages(prompt: &ChatPrompt) -> Value {
    json!([
        { "role": "system", "content": prompt.system },
        { "role": "user", "content": prompt.user },
    ])
}

pub struct OpenAiClient {
    http: Client,
    endpoint: String,
    api_key: SecretString,
    model: String,
    temperature: f32,
}

impl OpenAiClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let api_key =
            config.api_key.clone().ok_or_else(|| anyhow!("llm.api_key is required for openai"))?;
        let base_url = config.base_url.as_deref().unwrap_or("https://api.openai.com");

        Ok(Self {
            http: http_client(config.timeout_secs)?,
            endpoint: openai_endpoint(base_url),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    fn request_body(&self, prompt: &ChatPrompt) -> Value {
        json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": messages(prompt),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    content: Option<String>,
}

fn openai_endpoint(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with("/v1") {
        format!("{base}/chat/completions")
    } else {
        format!("{base}/v1/chat/completions")
    }
}

fn openai_content(response: ChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| anyhow!("completion response contained no message content"))
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&self.request_body(prompt))
            .send()
            .await
            .context("chat completion request failed")?
            .error_for_status()
            .context("chat completion returned an error status")?
            .json::<ChatCompletionResponse>()
            .await
            .context("chat completion response could not be decoded")?;

        openai_content(response)
    }

    fn describe(&self) -> String {
        format!("openai:{}", self.model)
    }
}

pub struct OllamaClient {
    http: Client,
    endpoint: String,
    model: String,
    temperature: f32,
}

impl OllamaClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_OLLAMA_URL);

        Ok(Self {
            http: http_client(config.timeout_secs)?,
            endpoint: format!("{}/api/chat", base_url.trim_end_matches('/')),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    fn request_body(&self, prompt: &ChatPrompt) -> Value {
        json!({
            "model": self.model,
            "stream": false,
            "messages": messages(prompt),
            "options": { "temperature": self.temperature },
        })
    }
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&self.request_body(prompt))
            .send()
            .await
            .context("ollama chat request failed")?
            .error_for_status()
            .context("ollama chat returned an error status")?
            .json::<OllamaChatResponse>()
            .await
            .context("ollama chat response could not be decoded")?;

        Ok(response.message.content)
    }

    fn describe(&self) -> String {
        format!("ollama:{}", self.model)
    }
}

#[cfg(test)]
mod tests {
    use haru_core::config::{AppConfig, LlmProvider};

    use super::{
        client_from_config, openai_content, openai_endpoint, ChatCompletionResponse, ChatPrompt,
        OllamaClient, OpenAiClient,
    };

    fn prompt() -> ChatPrompt {
        ChatPrompt { system: "rules".into(), user: "조용한 카페".into() }
    }

    #[test]
    fn openai_endpoint_accepts_base_with_or_without_version() {
        assert_eq!(
            openai_endpoint("https://api.openai.com/"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            openai_endpoint("http://localhost:8080/v1"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn openai_request_carries_model_temperature_and_both_messages() {
        let mut config = AppConfig::default().llm;
        config.api_key = Some("sk-test".to_string().into());
        let client = OpenAiClient::from_config(&config).expect("client");

        let body = client.request_body(&prompt());

        assert_eq!(body["model"], "gpt-4o-mini");
        assert!((body["temperature"].as_f64().unwrap_or_default() - 0.1).abs() < 1e-6);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "조용한 카페");
    }

    #[test]
    fn openai_requires_api_key() {
        let config = AppConfig::default().llm;
        assert!(OpenAiClient::from_config(&config).is_err());
    }

    #[test]
    fn openai_content_reads_first_choice() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"뷰, 라떼"}}]}"#,
        )
        .expect("decode");
        assert_eq!(openai_content(response).expect("content"), "뷰, 라떼");

        let empty: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[]}"#).expect("decode");
        assert!(openai_content(empty).is_err());
    }

    #[test]
    fn ollama_request_disables_streaming() {
        let mut config = AppConfig::default().llm;
        config.provider = LlmProvider::Ollama;
        config.base_url = Some("http://localhost:11434/".into());
        config.model = "llama3.1".into();
        let client = OllamaClient::from_config(&config).expect("client");

        let body = client.request_body(&prompt());

        assert_eq!(client.endpoint, "http://localhost:11434/api/chat");
        assert_eq!(body["stream"], false);
        assert_eq!(body["model"], "llama3.1");
    }

    #[test]
    fn factory_picks_provider() {
        let mut config = AppConfig::default().llm;
        config.provider = LlmProvider::Ollama;
        let client = client_from_config(&config).expect("client");
        assert_eq!(client.describe(), "ollama:gpt-4o-mini");
    }
}
