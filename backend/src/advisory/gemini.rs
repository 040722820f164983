//! Gemini `generateContent` client
//!
//! Talks to the Generative Language REST API:
//! `POST {base_url}/models/{model}:generateContent`, key in the
//! `x-goog-api-key` header. Only the text parts of the first candidate are
//! read back.

use crate::advisory::config::AdvisoryConfig;
use crate::advisory::gateway::{AdvisoryError, AdvisoryGateway, GenerateRequest};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Longest error body echoed back in an `Unavailable` error
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Response envelope (simplified, only what we need)
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// HTTP gateway to the Gemini API
pub struct GeminiGateway {
    client: reqwest::Client,
    config: Arc<AdvisoryConfig>,
}

impl GeminiGateway {
    /// Build a client for `config`
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey`/`InvalidConfig` for unusable settings and
    /// `Http` if the HTTP client cannot be constructed.
    pub fn new(config: Arc<AdvisoryConfig>) -> Result<Self, AdvisoryError> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AdvisoryError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl AdvisoryGateway for GeminiGateway {
    async fn generate(&self, request: GenerateRequest) -> Result<String, AdvisoryError> {
        let body = build_request_body(&request);

        tracing::debug!(model = %self.config.model, turns = request.contents.len(), "advisory request");

        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AdvisoryError::Timeout(self.config.timeout())
                } else {
                    AdvisoryError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AdvisoryError::Http(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let snippet: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(AdvisoryError::Unavailable(format!("HTTP {}: {}", status, snippet)));
        }

        parse_response_text(&text)
    }
}

/// Build the JSON body for a `generateContent` call
pub fn build_request_body(request: &GenerateRequest) -> Value {
    let contents: Vec<Value> = request
        .contents
        .iter()
        .map(|m| json!({ "role": m.role.as_str(), "parts": [{ "text": m.text }] }))
        .collect();

    let mut body = json!({ "contents": contents });

    if let Some(instruction) = &request.system_instruction {
        body["systemInstruction"] = json!({ "parts": [{ "text": instruction }] });
    }

    let mut generation = serde_json::Map::new();
    if let Some(temperature) = request.temperature {
        generation.insert("temperature".to_string(), json!(temperature));
    }
    if let Some(top_k) = request.top_k {
        generation.insert("topK".to_string(), json!(top_k));
    }
    if !generation.is_empty() {
        body["generationConfig"] = Value::Object(generation);
    }

    body
}

/// Concatenate the text parts of the first candidate
///
/// A response with no candidates or no text yields an empty string, not
/// an error; only unparseable JSON is `MalformedResponse`.
pub fn parse_response_text(json: &str) -> Result<String, AdvisoryError> {
    let response: GenerateContentResponse = serde_json::from_str(json)
        .map_err(|e| AdvisoryError::MalformedResponse(e.to_string()))?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::gateway::ChatMessage;

    #[test]
    fn test_body_for_one_shot_prompt() {
        let request = GenerateRequest::prompt("hello").with_sampling(0.7, 40);
        let body = build_request_body(&request);

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["topK"], 40);
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_body_for_chat_turn() {
        let request = GenerateRequest {
            contents: vec![
                ChatMessage::user("hi"),
                ChatMessage::model("hello"),
                ChatMessage::user("budget?"),
            ],
            ..GenerateRequest::default()
        }
        .with_system_instruction("be brief");
        let body = build_request_body(&request);

        assert_eq!(body["contents"].as_array().unwrap().len(), 3);
        assert_eq!(body["contents"][1]["role"], "model");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be brief");
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_parse_joins_parts() {
        let json = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Keep "},{"text":"reserves."}]}}]}"#;
        assert_eq!(parse_response_text(json).unwrap(), "Keep reserves.");
    }

    #[test]
    fn test_parse_without_candidates_is_empty() {
        assert_eq!(parse_response_text(r#"{"promptFeedback":{}}"#).unwrap(), "");
    }

    #[test]
    fn test_parse_garbage_is_malformed() {
        assert!(matches!(
            parse_response_text("<html>"),
            Err(AdvisoryError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_new_requires_key() {
        let result = GeminiGateway::new(Arc::new(AdvisoryConfig::default()));
        assert!(matches!(result, Err(AdvisoryError::MissingApiKey)));
    }
}
