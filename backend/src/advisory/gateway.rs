//! Advisory gateway boundary
//!
//! The advisory service is a third-party text generator. The rest of the
//! crate only sees this trait: plain text in, plain text out. Tests plug in
//! a scripted implementation; production uses [`super::GeminiGateway`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by an advisory call
///
/// None of these reach the user: callers swap in fixed fallback text.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AdvisoryError {
    #[error("Advisory API key is not configured")]
    MissingApiKey,

    #[error("Invalid advisory config: {0}")]
    InvalidConfig(String),

    #[error("Advisory service unavailable: {0}")]
    Unavailable(String),

    #[error("Advisory call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Advisory transport error: {0}")]
    Http(String),

    #[error("Malformed advisory response: {0}")]
    MalformedResponse(String),
}

/// Who said a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

/// One message of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// One generation request
///
/// A one-shot prompt is a single user message; a chat turn carries the
/// prior exchange plus the new user message.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerateRequest {
    pub system_instruction: Option<String>,
    pub contents: Vec<ChatMessage>,
    pub temperature: Option<f32>,
    pub top_k: Option<u32>,
}

impl GenerateRequest {
    /// Single-prompt request
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            contents: vec![ChatMessage::user(text)],
            ..Self::default()
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_sampling(mut self, temperature: f32, top_k: u32) -> Self {
        self.temperature = Some(temperature);
        self.top_k = Some(top_k);
        self
    }
}

/// External text-generation service
///
/// Implementations may return an empty string; callers treat that as "no
/// useful answer" and fall back to fixed text.
#[async_trait]
pub trait AdvisoryGateway: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<String, AdvisoryError>;
}

/// Await an advisory future with an upper bound on how long it may take
pub async fn with_timeout<F>(timeout: Duration, call: F) -> Result<String, AdvisoryError>
where
    F: Future<Output = Result<String, AdvisoryError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(AdvisoryError::Timeout(timeout)),
    }
}
