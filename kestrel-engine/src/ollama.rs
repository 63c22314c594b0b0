//! Ollama chat backend
//!
//! Speaks the upstream Ollama API: `/api/pull` to fetch the model at
//! startup and `/api/chat` with `format: "json"` for structured review
//! output.

use async_trait::async_trait;
use kestrel_core::config::EngineConfig;
use kestrel_core::diff::Hunk;
use kestrel_core::review::{EngineError, EngineResult, ReviewComment, ReviewEngine};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::prompt::review_prompt;
use crate::{Error, Result};

/// Temperature for JSON-mode calls, kept low for output stability
const JSON_TEMPERATURE: f32 = 0.1;

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    format: &'a str,
    options: ChatOptions,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Expected shape of the model's structured output
#[derive(Debug, Deserialize)]
struct ReviewPayload {
    comments: Vec<RawComment>,
}

#[derive(Debug, Deserialize)]
struct RawComment {
    content: String,
    line: u64,
}

/// Review engine backed by an Ollama endpoint
pub struct OllamaEngine {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl OllamaEngine {
    /// Create an engine against the configured endpoint
    ///
    /// The per-call timeout from the config applies to every request this
    /// engine makes, including the startup model pull.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Pull the configured model so the first review call does not hit a
    /// cold registry download
    ///
    /// Failing here is fatal: without a model there is nothing to review
    /// with, and the caller should stop before touching any pull request.
    pub async fn ensure_model(&self) -> Result<()> {
        info!(model = %self.model, endpoint = %self.endpoint, "Pulling Ollama model");

        let mut response = self
            .client
            .post(format!("{}/api/pull", self.endpoint))
            .json(&serde_json::json!({ "name": self.model }))
            .send()
            .await?
            .error_for_status()?;

        // /api/pull streams one JSON status object per line until the
        // model is available locally.
        while let Some(chunk) = response.chunk().await? {
            for line in String::from_utf8_lossy(&chunk).lines() {
                let line = line.trim();
                if !line.is_empty() {
                    debug!(status = line, "Ollama pull");
                }
            }
        }

        info!(model = %self.model, "Ollama model ready");
        Ok(())
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.endpoint)
    }
}

#[async_trait]
impl ReviewEngine for OllamaEngine {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn review(
        &self,
        path: &str,
        window: &str,
        hunk: &Hunk,
    ) -> EngineResult<Vec<ReviewComment>> {
        let prompt = review_prompt(path, window, hunk);
        debug!(path, start = hunk.start, end = hunk.end, "Invoking review model");

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            stream: false,
            format: "json",
            options: ChatOptions {
                temperature: JSON_TEMPERATURE,
            },
        };

        let response = self
            .client
            .post(self.chat_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| EngineError::Backend(e.to_string()))?
            .error_for_status()
            .map_err(|e| EngineError::Backend(e.to_string()))?;

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| EngineError::Backend(format!("invalid chat response: {e}")))?;

        parse_comments(&chat.message.content)
    }
}

/// Validate the model's JSON output against the comment schema
///
/// Anything that does not deserialize is a schema failure, which the
/// pipeline downgrades to "no comments for this hunk". Comments with empty
/// text are dropped individually.
fn parse_comments(content: &str) -> EngineResult<Vec<ReviewComment>> {
    let payload: ReviewPayload =
        serde_json::from_str(content).map_err(|e| EngineError::Schema(e.to_string()))?;

    Ok(payload
        .comments
        .into_iter()
        .filter_map(|raw| {
            if raw.content.trim().is_empty() {
                warn!(line = raw.line, "Dropping review comment with empty text");
                return None;
            }
            Some(ReviewComment {
                text: raw.content,
                line: raw.line,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_payload() {
        let comments =
            parse_comments(r#"{"comments": [{"content": "looks fine", "line": 11}]}"#).unwrap();

        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "looks fine");
        assert_eq!(comments[0].line, 11);
    }

    #[test]
    fn test_parse_empty_comment_list() {
        let comments = parse_comments(r#"{"comments": []}"#).unwrap();
        assert!(comments.is_empty());
    }

    #[test]
    fn test_non_json_output_is_schema_error() {
        let err = parse_comments("I think this code is great!").unwrap_err();
        assert!(matches!(err, EngineError::Schema(_)));
    }

    #[test]
    fn test_wrong_shape_is_schema_error() {
        let err = parse_comments(r#"{"remarks": ["nope"]}"#).unwrap_err();
        assert!(matches!(err, EngineError::Schema(_)));
    }

    #[test]
    fn test_empty_text_comments_dropped() {
        let comments = parse_comments(
            r#"{"comments": [{"content": "  ", "line": 10}, {"content": "real", "line": 11}]}"#,
        )
        .unwrap();

        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "real");
    }

    #[test]
    fn test_engine_construction_normalizes_endpoint() {
        let config = EngineConfig {
            endpoint: "http://localhost:11434/".to_string(),
            ..EngineConfig::default()
        };
        let engine = OllamaEngine::new(&config).unwrap();

        assert_eq!(engine.chat_url(), "http://localhost:11434/api/chat");
    }
}
