use super::framing;
use super::slot::{AssistRequest, Slot};
use super::{GenerationError, GenerationKind, TextGenerator};
use crate::model::Category;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const DRAFT_FAILED: &str = "Failed to generate draft. Please try again.";
const SUMMARY_FAILED: &str = "Failed to summarize draft. Please try again.";

/// What a single assist call ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistOutcome {
    /// Blank input; nothing was started.
    Skipped,
    /// Generated text, also committed to the slot.
    Completed(String),
    /// User-facing failure message, also committed to the slot.
    Failed(String),
    /// A newer call on the same slot started first; the result was dropped.
    Superseded,
}

impl AssistOutcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            AssistOutcome::Completed(text) => Some(text),
            _ => None,
        }
    }

    /// Whether this call's outcome was written to its slot.
    pub fn is_committed(&self) -> bool {
        matches!(self, AssistOutcome::Completed(_) | AssistOutcome::Failed(_))
    }
}

/// Runs draft and summary requests against a [`TextGenerator`].
///
/// All methods take `&self`, so a draft and a summary (or two drafts) can be
/// awaited concurrently on the same pipeline.
pub struct AssistPipeline<G: TextGenerator> {
    generator: Arc<G>,
    draft: Slot,
    summary: Slot,
    timeout: Option<Duration>,
}

impl<G: TextGenerator> AssistPipeline<G> {
    pub fn new(generator: Arc<G>) -> Self {
        Self {
            generator,
            draft: Slot::new("draft"),
            summary: Slot::new("summary"),
            timeout: None,
        }
    }

    /// Fails any generator call that takes longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn draft_state(&self) -> AssistRequest {
        self.draft.snapshot()
    }

    pub fn summary_state(&self) -> AssistRequest {
        self.summary.snapshot()
    }

    pub fn reset_draft(&self) {
        self.draft.reset();
    }

    pub fn reset_summary(&self) {
        self.summary.reset();
    }

    pub async fn request_draft(&self, prompt: &str) -> AssistOutcome {
        self.run(
            &self.draft,
            GenerationKind::Draft,
            framing::DRAFT,
            prompt,
            prompt.to_string(),
            DRAFT_FAILED,
        )
        .await
    }

    /// Draft with the framing of a medical specialty. Shares the draft slot.
    pub async fn request_specialized_draft(&self, prompt: &str, category: Category) -> AssistOutcome {
        self.run(
            &self.draft,
            GenerationKind::Draft,
            framing::for_category(category),
            prompt,
            prompt.to_string(),
            DRAFT_FAILED,
        )
        .await
    }

    pub async fn request_summary(&self, content: &str) -> AssistOutcome {
        self.run(
            &self.summary,
            GenerationKind::Summary,
            framing::SUMMARY,
            content,
            framing::summary_input(content),
            SUMMARY_FAILED,
        )
        .await
    }

    /// [`Self::request_draft`], handing committed text to `sink`.
    pub async fn request_draft_with<F>(&self, prompt: &str, sink: F) -> AssistOutcome
    where
        F: FnOnce(String),
    {
        deliver(self.request_draft(prompt).await, sink)
    }

    /// [`Self::request_summary`], handing committed text to `sink`.
    pub async fn request_summary_with<F>(&self, content: &str, sink: F) -> AssistOutcome
    where
        F: FnOnce(String),
    {
        deliver(self.request_summary(content).await, sink)
    }

    async fn run(
        &self,
        slot: &Slot,
        kind: GenerationKind,
        system_framing: &str,
        input: &str,
        user_input: String,
        failure_message: &str,
    ) -> AssistOutcome {
        if input.trim().is_empty() {
            return AssistOutcome::Skipped;
        }

        let ticket = slot.begin(input);
        debug!(slot = slot.name(), "assist request pending");

        match self.call(kind, system_framing, &user_input).await {
            Ok(text) => {
                if slot.commit(ticket, Ok(text.clone())) {
                    debug!(slot = slot.name(), len = text.len(), "assist request succeeded");
                    AssistOutcome::Completed(text)
                } else {
                    debug!(slot = slot.name(), "discarding superseded assist result");
                    AssistOutcome::Superseded
                }
            }
            Err(cause) => {
                if slot.commit(ticket, Err(failure_message.to_string())) {
                    warn!(slot = slot.name(), error = %cause, "assist request failed");
                    AssistOutcome::Failed(failure_message.to_string())
                } else {
                    debug!(slot = slot.name(), error = %cause, "discarding superseded assist failure");
                    AssistOutcome::Superseded
                }
            }
        }
    }

    async fn call(
        &self,
        kind: GenerationKind,
        system_framing: &str,
        user_input: &str,
    ) -> Result<String, GenerationError> {
        let request = self.generator.generate(kind, system_framing, user_input);
        let text = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| GenerationError::Timeout(limit.as_secs()))??,
            None => request.await?,
        };

        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }
}

fn deliver<F: FnOnce(String)>(outcome: AssistOutcome, sink: F) -> AssistOutcome {
    if let AssistOutcome::Completed(text) = &outcome {
        sink(text.clone());
    }
    outcome
}
