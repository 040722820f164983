//! Advisor - fallback-wrapped access to the advisory service
//!
//! Each capability returns plain text and never an error: a failed or empty
//! answer is replaced by fixed fallback text and logged. Nothing here reads
//! or writes treasury state.

use crate::advisory::chat::ChatSession;
use crate::advisory::config::AdvisoryConfig;
use crate::advisory::gateway::{with_timeout, AdvisoryError, AdvisoryGateway, GenerateRequest};
use crate::advisory::gemini::GeminiGateway;
use crate::advisory::prompts::{
    chat_context, guidance_prompt, project_summary, terms_prompt, GUIDANCE_EMPTY_FALLBACK,
    GUIDANCE_FAILURE_FALLBACK, TERMS_FALLBACK,
};
use crate::models::project::Project;
use std::sync::Arc;

/// Entry point for guidance notes, terms summaries and chat sessions
#[derive(Clone)]
pub struct Advisor {
    gateway: Arc<dyn AdvisoryGateway>,
    config: Arc<AdvisoryConfig>,
}

impl Advisor {
    /// Use an existing gateway
    pub fn new(gateway: Arc<dyn AdvisoryGateway>, config: Arc<AdvisoryConfig>) -> Self {
        Self { gateway, config }
    }

    /// Build the HTTP gateway from `config`
    pub fn from_config(config: Arc<AdvisoryConfig>) -> Result<Self, AdvisoryError> {
        let gateway = GeminiGateway::new(Arc::clone(&config))?;
        Ok(Self::new(Arc::new(gateway), config))
    }

    pub fn config(&self) -> &AdvisoryConfig {
        &self.config
    }

    /// Three-sentence treasury guidance for a project description
    pub async fn guidance_note(&self, project_summary: &str) -> String {
        let request = GenerateRequest::prompt(guidance_prompt(project_summary))
            .with_sampling(self.config.temperature, self.config.top_k);

        match self.call(request).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => GUIDANCE_EMPTY_FALLBACK.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "guidance note unavailable, using fallback");
                GUIDANCE_FAILURE_FALLBACK.to_string()
            }
        }
    }

    /// Guidance note for a project, using its compact summary
    pub async fn guidance_for(&self, project: &Project) -> String {
        self.guidance_note(&project_summary(project)).await
    }

    /// Short summary of the platform terms
    pub async fn terms_summary(&self) -> String {
        match self.call(GenerateRequest::prompt(terms_prompt())).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => TERMS_FALLBACK.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "terms summary unavailable, using fallback");
                TERMS_FALLBACK.to_string()
            }
        }
    }

    /// Open a chat session scoped to `project_context`
    pub fn chat_session(&self, project_context: &str) -> ChatSession {
        ChatSession::new(
            Arc::clone(&self.gateway),
            project_context,
            self.config.timeout(),
        )
    }

    /// Open a chat session scoped to a project
    pub fn chat_for(&self, project: &Project) -> ChatSession {
        self.chat_session(&chat_context(project))
    }

    async fn call(&self, request: GenerateRequest) -> Result<String, AdvisoryError> {
        with_timeout(self.config.timeout(), self.gateway.generate(request)).await
    }
}
