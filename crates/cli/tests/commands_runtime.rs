use std::env;
use std::sync::{Mutex, OnceLock};

use haru_cli::commands::chat::{converse, OfflineExtractor};
use haru_cli::commands::{chat, config};
use haru_core::dialogue::DialogueEngine;
use haru_core::domain::category::Category;
use haru_core::domain::session::Stage;
use serde_json::Value;

#[test]
fn config_reports_env_sources_and_redacts_api_key() {
    with_env(
        &[
            ("HARU_LLM_PROVIDER", "ollama"),
            ("HARU_LLM_BASE_URL", "http://127.0.0.1:11434"),
            ("HARU_LLM_API_KEY", "sk-secret-value"),
        ],
        || {
            let output = config::run();

            assert!(output.starts_with("effective config"), "unexpected output: {output}");
            assert!(output.contains("- llm.provider = ollama (source: env (HARU_LLM_PROVIDER))"));
            assert!(output.contains("- llm.api_key = sk-*** (source: env (HARU_LLM_API_KEY))"));
            assert!(output.contains("- server.port = 8000 (source: default)"));
            assert!(!output.contains("secret-value"));
        },
    );
}

#[test]
fn config_reports_validation_failure_without_api_key() {
    with_env(&[], || {
        let output = config::run();
        assert!(output.starts_with("config validation failed"), "unexpected output: {output}");
        assert!(output.contains("llm.api_key"));
    });
}

#[test]
fn chat_rejects_unknown_category_before_reading_input() {
    with_env(&[], || {
        let result = chat::run(2, &["볼링장".to_string()], true);
        assert_eq!(result.exit_code, 2, "expected invalid input code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "chat");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "invalid_input");
    });
}

#[tokio::test]
async fn scripted_conversation_completes_with_recommendations() {
    let engine = DialogueEngine::default();
    let input: &[u8] = "조용한 공부\n\n네\n네\n".as_bytes();
    let mut output = Vec::new();

    let session =
        converse(&engine, &OfflineExtractor, 1, vec![Category::Cafe], input, &mut output)
            .await
            .expect("conversation");

    assert_eq!(session.stage, Stage::Completed);
    assert_eq!(
        session.collected_tags.get(&Category::Cafe).cloned().unwrap_or_default(),
        vec!["조용한".to_string(), "공부".to_string()]
    );

    let transcript = String::from_utf8(output).expect("utf8 transcript");
    assert!(transcript.starts_with("하루> "));
    assert!(transcript.contains("[이 정보로 다음 질문으로 넘어가시겠습니까?]"));
    assert!(transcript.contains("[후보지를 출력하시겠습니까?]"));
    assert!(transcript.contains("카페: 1. "));
}

#[tokio::test]
async fn conversation_stops_when_input_ends_early() {
    let engine = DialogueEngine::default();
    let input: &[u8] = "분위기 좋은 곳\n".as_bytes();
    let mut output = Vec::new();

    let session = converse(
        &engine,
        &OfflineExtractor,
        3,
        vec![Category::Restaurant, Category::Content],
        input,
        &mut output,
    )
    .await
    .expect("conversation");

    assert_eq!(session.stage, Stage::CollectingDetails);
    assert!(session.waiting_for_user_action);
    assert_eq!(session.current_category_index, 0);
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "HARU_LLM_PROVIDER",
        "HARU_LLM_API_KEY",
        "OPENAI_API_KEY",
        "HARU_LLM_BASE_URL",
        "HARU_LLM_MODEL",
        "HARU_LLM_TEMPERATURE",
        "HARU_LLM_TIMEOUT_SECS",
        "HARU_SERVER_BIND_ADDRESS",
        "HARU_SERVER_PORT",
        "HARU_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "HARU_DIALOGUE_MIN_TAGS",
        "HARU_LOGGING_LEVEL",
        "HARU_LOGGING_FORMAT",
        "HARU_LOG_LEVEL",
        "HARU_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
