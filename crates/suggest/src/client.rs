//! HTTP client for OpenAI-compatible chat completion endpoints.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::SuggestionConfig;
use crate::error::{Result, SuggestError};
use crate::prompt::{ChatMessage, Prompt};
use crate::strategy::CONTEXTUAL_MODEL;

/// Client for requesting topic suggestions.
#[derive(Debug, Clone)]
pub struct SuggestionClient {
    /// Configuration for the client.
    config: Arc<SuggestionConfig>,
    /// Parsed completion endpoint.
    endpoint: Url,
    http_client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatReply>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl SuggestionClient {
    /// Create a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_config(SuggestionConfig::default())
    }

    /// Create a client with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid endpoint URL or if the HTTP client
    /// cannot be built.
    pub fn with_config(config: SuggestionConfig) -> Result<Self> {
        let endpoint = config.endpoint()?;
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SuggestError::config_error(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config: Arc::new(config),
            endpoint,
            http_client,
        })
    }

    pub fn config(&self) -> &SuggestionConfig {
        &self.config
    }

    /// The configured model, or `default` when none is set.
    pub fn model_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.config.model.as_deref().unwrap_or(default)
    }

    /// Suggest a subtopic for a rendered context blob.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestError::InvalidInput`] for a blank context, otherwise
    /// any error from [`SuggestionClient::complete`].
    pub async fn suggest(&self, context: &str) -> Result<String> {
        if context.trim().is_empty() {
            return Err(SuggestError::invalid_input("context is empty"));
        }
        self.complete(self.model_or(CONTEXTUAL_MODEL), &Prompt::contextual(context))
            .await
    }

    /// Send one chat completion request and return the trimmed reply.
    ///
    /// # Errors
    ///
    /// - [`SuggestError::RequestFailed`] on transport failure or a non-2xx status
    /// - [`SuggestError::MalformedResponse`] when no reply content is present
    /// - [`SuggestError::EmptySuggestion`] when the reply is blank
    pub async fn complete(&self, model: &str, prompt: &Prompt) -> Result<String> {
        info!(model, prompt_len = prompt.user.len(), "Requesting suggestion");
        let start = Instant::now();

        let body = ChatRequest {
            model,
            messages: prompt.messages(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let mut request = self.http_client.post(self.endpoint.clone()).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Suggestion request rejected");
            return Err(SuggestError::status(
                status.as_u16(),
                format!("API returned {status}: {}", detail.trim()),
            ));
        }

        let text = response.text().await?;
        debug!(duration_ms = start.elapsed().as_millis(), "Suggestion response received");
        parse_completion(&text)
    }
}

/// Extract `choices[0].message.content` from a completion body.
fn parse_completion(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| SuggestError::malformed_response(format!("invalid JSON: {e}")))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| SuggestError::malformed_response("missing choices[0].message.content"))?;

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(SuggestError::EmptySuggestion);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> Result<SuggestionClient> {
        SuggestionClient::with_config(
            SuggestionConfig::with_url(format!("{}/v1/chat/completions", server.uri()))
                .api_key("test-key"),
        )
    }

    fn reply(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        })
    }

    #[test]
    fn test_parse_completion_trims() {
        let body = reply("  Packing list \n").to_string();
        assert_eq!(parse_completion(&body).ok(), Some("Packing list".to_string()));
    }

    #[test]
    fn test_parse_completion_missing_choices() {
        let result = parse_completion(r#"{"choices": []}"#);
        assert!(matches!(result, Err(SuggestError::MalformedResponse { .. })));

        let result = parse_completion(r#"{"choices": [{"message": {}}]}"#);
        assert!(matches!(result, Err(SuggestError::MalformedResponse { .. })));
    }

    #[test]
    fn test_parse_completion_not_json() {
        let result = parse_completion("<html>bad gateway</html>");
        assert!(matches!(result, Err(SuggestError::MalformedResponse { .. })));
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let result = SuggestionClient::with_config(SuggestionConfig::with_url("not a url"));
        assert!(matches!(result, Err(SuggestError::ConfigError { .. })));
    }

    #[tokio::test]
    async fn test_suggest_success() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": CONTEXTUAL_MODEL,
                "max_tokens": 50,
                "messages": [
                    { "role": "system" },
                    { "role": "user", "content": "Based on this mind map context, suggest a relevant subtopic:\n\nCurrent topic: \"Travel\"" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply(" Packing ")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server)?;
        let suggestion = client.suggest("Current topic: \"Travel\"").await?;

        assert_eq!(suggestion, "Packing");
        Ok(())
    }

    #[tokio::test]
    async fn test_suggest_server_error() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server)?;
        let result = client.suggest("Current topic: \"Travel\"").await;

        match result {
            Err(SuggestError::RequestFailed { status, detail }) => {
                assert_eq!(status, Some(500));
                assert!(detail.contains("upstream down"));
            }
            other => return Err(format!("expected RequestFailed, got {other:?}").into()),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_suggest_blank_reply() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("   ")))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server)?;
        let result = client.suggest("Current topic: \"Travel\"").await;

        assert!(matches!(result, Err(SuggestError::EmptySuggestion)));
        Ok(())
    }

    #[tokio::test]
    async fn test_suggest_blank_context_sends_nothing()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("x")))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server)?;
        let result = client.suggest("  ").await;

        assert!(matches!(result, Err(SuggestError::InvalidInput { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_suggest_timeout() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(reply("late"))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let client = SuggestionClient::with_config(
            SuggestionConfig::with_url(mock_server.uri()).timeout(Duration::from_millis(200)),
        )?;
        let result = client.suggest("Current topic: \"Travel\"").await;

        assert!(matches!(
            result,
            Err(SuggestError::RequestFailed { status: None, .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_model_override() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({ "model": "custom-model" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("ok")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SuggestionClient::with_config(
            SuggestionConfig::with_url(mock_server.uri()).model("custom-model"),
        )?;

        assert_eq!(client.suggest("Current topic: \"A\"").await?, "ok");
        Ok(())
    }
}
