//! Anthropic Messages API client.
//!
//! A failed call is reported to the caller after a single attempt. Retrying
//! 429 and 5xx responses with exponential backoff is opt-in through
//! `llm.max_retries`; other non-success statuses always fail immediately.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::{LlmError, TextGenerator};
use crate::domain::LlmConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 2048;

const SYSTEM_PROMPT: &str = "You write concise, factual resume content for software engineers. \
    Only use facts present in the provided project context. \
    When asked for JSON, respond with JSON only.";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl MessagesResponse {
    /// Concatenated text of all text blocks.
    fn text(&self) -> String {
        self.content
            .iter()
            .filter(|b| b.block_type == "text")
            .filter_map(|b| b.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    max_retries: u32,
    backoff_base: Duration,
}

impl AnthropicClient {
    pub fn new(api_key: String, config: &LlmConfig) -> Result<Self, LlmError> {
        let client =
            Client::builder().timeout(Duration::from_secs(config.timeout_secs.max(1))).build()?;
        let base = config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/');
        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            endpoint: format!("{base}/v1/messages"),
            max_retries: config.max_retries,
            backoff_base: Duration::from_millis(1000),
        })
    }

    /// Override the first retry delay (doubles on each further attempt).
    pub fn with_backoff(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn call(&self, prompt: &str) -> Result<MessagesResponse, LlmError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system: SYSTEM_PROMPT,
            messages: vec![Message { role: "user", content: prompt }],
        };

        let attempts = self.max_retries.saturating_add(1);
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = self.backoff_base * (1u32 << (attempt - 1).min(16));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                let text = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, text);
                last_error = Some(if status.as_u16() == 429 {
                    LlmError::RateLimited { attempts: attempt + 1 }
                } else {
                    LlmError::Api { status: status.as_u16(), message: text }
                });
                continue;
            }

            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorEnvelope>(&text)
                    .map(|e| e.error.message)
                    .unwrap_or(text);
                return Err(LlmError::Api { status: status.as_u16(), message });
            }

            let parsed: MessagesResponse = response.json().await?;
            if let Some(usage) = &parsed.usage {
                debug!(
                    "LLM call succeeded: input_tokens={}, output_tokens={}",
                    usage.input_tokens, usage.output_tokens
                );
            }
            return Ok(parsed);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited { attempts }))
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let text = self.call(prompt).await?.text();
        if text.trim().is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::test_server::{CannedResponse, TestServer};

    fn client_for(server: &TestServer, retries: u32) -> AnthropicClient {
        let config = LlmConfig {
            base_url: Some(server.base_url()),
            max_retries: retries,
            timeout_secs: 5,
            ..Default::default()
        };
        AnthropicClient::new("sk-test".to_string(), &config)
            .expect("client")
            .with_backoff(Duration::from_millis(1))
    }

    const OK_BODY: &str = r#"{"content":[{"type":"text","text":"Hello "},{"type":"text","text":"there"}],"usage":{"input_tokens":3,"output_tokens":2}}"#;

    #[tokio::test]
    async fn concatenates_text_blocks() {
        let server = TestServer::start(vec![CannedResponse::json(200, OK_BODY)]);
        let text = client_for(&server, 0).generate("hi").await.expect("generate");
        assert_eq!(text, "Hello there");

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].path.ends_with("/v1/messages"));
        assert!(requests[0].body.contains("\"model\":\"claude-sonnet-4-5\""));
        assert_eq!(requests[0].header("x-api-key"), Some("sk-test"));
    }

    #[tokio::test]
    async fn default_config_makes_a_single_attempt() {
        let server = TestServer::start(vec![
            CannedResponse::json(503, "overloaded"),
            CannedResponse::json(200, OK_BODY),
        ]);
        let client = AnthropicClient::new(
            "sk-test".to_string(),
            &LlmConfig { base_url: Some(server.base_url()), timeout_secs: 5, ..Default::default() },
        )
        .expect("client");
        let err = client.generate("hi").await.expect_err("should fail");
        assert!(matches!(err, LlmError::Api { status: 503, .. }));
        assert_eq!(server.requests().len(), 1);
    }

    #[tokio::test]
    async fn opt_in_retries_server_errors_then_succeeds() {
        let server = TestServer::start(vec![
            CannedResponse::json(503, "overloaded"),
            CannedResponse::json(429, "slow down"),
            CannedResponse::json(200, OK_BODY),
        ]);
        let text = client_for(&server, 3).generate("hi").await.expect("generate");
        assert_eq!(text, "Hello there");
        assert_eq!(server.requests().len(), 3);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let server = TestServer::start(vec![CannedResponse::json(
            401,
            r#"{"error":{"type":"authentication_error","message":"invalid x-api-key"}}"#,
        )]);
        let err = client_for(&server, 2).generate("hi").await.expect_err("should fail");
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid x-api-key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(server.requests().len(), 1);
    }

    #[tokio::test]
    async fn exhausting_retries_reports_last_error() {
        let server = TestServer::start(vec![
            CannedResponse::json(429, "slow down"),
            CannedResponse::json(429, "slow down"),
        ]);
        let err = client_for(&server, 1).generate("hi").await.expect_err("should fail");
        assert!(matches!(err, LlmError::RateLimited { attempts: 2 }));
        assert_eq!(server.requests().len(), 2);
    }

    #[tokio::test]
    async fn empty_text_is_an_error() {
        let server = TestServer::start(vec![CannedResponse::json(200, r#"{"content":[]}"#)]);
        let err = client_for(&server, 0).generate("hi").await.expect_err("should fail");
        assert!(matches!(err, LlmError::EmptyContent));
    }
}
