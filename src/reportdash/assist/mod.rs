//! # Assist Pipeline
//!
//! AI-assisted drafting: generate a draft report from a prompt, or condense an
//! existing report into key findings, assessment and plan.
//!
//! The pipeline talks to an injected [`TextGenerator`] and tracks each
//! operation in its own [`slot`] (draft and summary are independent). It
//! never touches the record store: finished text is returned to the caller,
//! or handed to an explicitly passed sink, and the caller decides whether it
//! becomes a new record, replaces an edit buffer, or is dropped.
//!
//! ## Supersession
//!
//! Calls to the same slot may overlap. Each call takes a ticket when it
//! starts and only the newest ticket may commit, so a slow first response can
//! never overwrite a faster second one. The losing call reports
//! [`AssistOutcome::Superseded`]. The underlying request is not aborted.
//!
//! ## Failures
//!
//! Every generator failure (transport error, timeout, empty or malformed
//! payload) becomes the slot's `Error` state with a generic, retryable
//! message. The cause is logged, never shown to the user.

use async_trait::async_trait;

pub mod framing;
pub mod openai;
mod pipeline;
pub mod slot;

pub use pipeline::{AssistOutcome, AssistPipeline};
pub use slot::{AssistRequest, AssistStatus};

/// Which operation a generation call serves. Backends may tune sampling
/// per kind; summaries are shorter and less varied than drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    Draft,
    Summary,
}

/// The external text-generation capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        kind: GenerationKind,
        system_framing: &str,
        user_input: &str,
    ) -> Result<String, GenerationError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty response from generator")]
    EmptyResponse,

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),
}
