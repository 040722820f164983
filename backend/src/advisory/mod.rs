//! Advisory Module
//!
//! Boundary to the external generative-text service used for guidance
//! notes, the terms summary and project chat.
//!
//! - `config`: explicit settings (key, model, timeout), no global client
//! - `gateway`: the `AdvisoryGateway` trait and wire-neutral message types
//! - `gemini`: HTTP implementation of the gateway
//! - `advisor`: fallback-wrapped one-shot calls
//! - `chat`: caller-owned chat sessions
//!
//! # Critical Invariants
//!
//! 1. **Never Fatal**: every failure becomes fixed fallback text
//! 2. **Disjoint State**: advisory calls never touch milestones or the ledger
//! 3. **Bounded**: every call is capped by the configured timeout

pub mod advisor;
pub mod chat;
pub mod config;
pub mod gateway;
pub mod gemini;
pub mod prompts;

pub use advisor::Advisor;
pub use chat::ChatSession;
pub use config::AdvisoryConfig;
pub use gateway::{AdvisoryError, AdvisoryGateway, ChatMessage, ChatRole, GenerateRequest};
pub use gemini::GeminiGateway;
