//! Chat session
//!
//! A conversation scoped to one project. The session is a plain value owned
//! by the caller: it holds the visible transcript and a handle to the
//! gateway. The gateway never sees or edits the transcript itself.
//!
//! Two lists are kept:
//! - `transcript`: everything shown to the user, fallbacks and booking
//!   notices included (append-only)
//! - `history`: only turns actually exchanged with the service, sent as
//!   context with each new message

use crate::advisory::gateway::{with_timeout, AdvisoryGateway, ChatMessage, GenerateRequest};
use crate::advisory::prompts::{
    chat_system_instruction, CHAT_EMPTY_FALLBACK, CHAT_FAILURE_FALLBACK, PROGRESS_CALL_BOOKED,
};
use std::sync::Arc;
use std::time::Duration;

/// Stateful conversation with the advisory service
pub struct ChatSession {
    gateway: Arc<dyn AdvisoryGateway>,
    system_instruction: String,
    timeout: Duration,
    transcript: Vec<ChatMessage>,
    history: Vec<ChatMessage>,
    progress_call_booked: bool,
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("transcript", &self.transcript.len())
            .field("history", &self.history.len())
            .field("progress_call_booked", &self.progress_call_booked)
            .finish()
    }
}

impl ChatSession {
    /// Open a session scoped to `project_context`
    pub fn new(gateway: Arc<dyn AdvisoryGateway>, project_context: &str, timeout: Duration) -> Self {
        Self {
            gateway,
            system_instruction: chat_system_instruction(project_context),
            timeout,
            transcript: Vec::new(),
            history: Vec::new(),
            progress_call_booked: false,
        }
    }

    /// Messages shown to the user, oldest first
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn is_progress_call_booked(&self) -> bool {
        self.progress_call_booked
    }

    /// Send a message and append the reply
    ///
    /// Blank messages are ignored and return `None`. Otherwise the trimmed
    /// message and a reply are appended to the transcript and the reply is
    /// returned. A failed call appends fixed fallback text instead of
    /// erroring; the session stays usable and earlier messages are kept.
    pub async fn send(&mut self, message: &str) -> Option<String> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        let user = ChatMessage::user(message);
        self.transcript.push(user.clone());

        let mut contents = self.history.clone();
        contents.push(user.clone());
        let request = GenerateRequest {
            system_instruction: Some(self.system_instruction.clone()),
            contents,
            ..GenerateRequest::default()
        };

        let reply = match with_timeout(self.timeout, self.gateway.generate(request)).await {
            Ok(text) if !text.trim().is_empty() => {
                self.history.push(user);
                self.history.push(ChatMessage::model(text.clone()));
                text
            }
            Ok(_) => {
                tracing::warn!("advisory chat returned an empty reply");
                CHAT_EMPTY_FALLBACK.to_string()
            }
            Err(e) => {
                tracing::warn!(error = %e, "advisory chat call failed, using fallback reply");
                CHAT_FAILURE_FALLBACK.to_string()
            }
        };

        self.transcript.push(ChatMessage::model(reply.clone()));
        Some(reply)
    }

    /// Book the progress verification call
    ///
    /// The first call appends a confirmation to the transcript and returns
    /// `true`; later calls change nothing and return `false`.
    pub fn book_progress_call(&mut self) -> bool {
        if self.progress_call_booked {
            return false;
        }
        self.progress_call_booked = true;
        self.transcript.push(ChatMessage::model(PROGRESS_CALL_BOOKED));
        true
    }
}

