//! # API Facade
//!
//! [`DashboardApi`] is the single entry point a dashboard client talks to. It
//! owns the [`RecordStore`] and the [`AssistPipeline`] and dispatches to the
//! command layer.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** record operations to `commands/*.rs`
//! - **Normalizes inputs** (string ids become [`RecordId`]s, view positions
//!   are resolved before reordering)
//! - **Connects the assistant to the edit buffer**: generated text only reaches
//!   a [`RecordForm`] through [`DashboardApi::start_from_draft`] or
//!   [`RecordForm::set_content`], and only reaches the store through
//!   [`DashboardApi::save`]
//!
//! No stdout, no exit codes, no terminal assumptions; those live in `cli/`.
//!
//! ## Generic Over TextGenerator
//!
//! `DashboardApi<G: TextGenerator>` is generic over the text backend:
//! - Production: `DashboardApi<OpenAiGenerator>`
//! - Testing: any scripted generator
//!
//! Tests here check dispatch and wiring. Command logic is tested in the
//! command modules.

use crate::assist::{AssistOutcome, AssistPipeline, AssistRequest, TextGenerator};
use crate::commands;
use crate::error::{ReportError, Result};
use crate::filter::{CategoryFilter, StatusFilter};
use crate::form::RecordForm;
use crate::model::{Category, RecordId};
use crate::store::seed::SeedSource;
use crate::store::RecordStore;
use tracing::info;

pub struct DashboardApi<G: TextGenerator> {
    store: RecordStore,
    pipeline: AssistPipeline<G>,
}

impl<G: TextGenerator> DashboardApi<G> {
    pub fn new(store: RecordStore, pipeline: AssistPipeline<G>) -> Self {
        Self { store, pipeline }
    }

    /// Replaces the collection with whatever `source` provides.
    pub fn seed(&mut self, source: &dyn SeedSource) -> Result<commands::CmdResult> {
        let records = source.load()?;
        let count = records.len();
        self.store.initialize(records)?;
        info!(count, "store seeded");
        Ok(commands::CmdResult::default())
    }

    // --- Edit buffer ---

    /// Clears the selection and hands back an empty form.
    pub fn new_report(&mut self) -> RecordForm {
        self.store.select(None);
        RecordForm::blank()
    }

    /// Selects the record and hands back a form prefilled from it.
    pub fn edit_report(&mut self, id: &str) -> Result<RecordForm> {
        let id = RecordId::from(id);
        let record = self
            .store
            .get(&id)
            .cloned()
            .ok_or(ReportError::NotFound(id))?;
        let form = RecordForm::from_record(&record);
        self.store.select(Some(record));
        Ok(form)
    }

    /// Clears the selection and hands back a form holding `content`, so a
    /// save creates a new record from it.
    pub fn start_from_draft(&mut self, content: &str) -> RecordForm {
        self.store.select(None);
        RecordForm::with_draft(content)
    }

    /// Starts a new report from the last committed draft, if there is one.
    pub fn use_current_draft(&mut self) -> Option<RecordForm> {
        let text = self.pipeline.draft_state().result_text?;
        Some(self.start_from_draft(&text))
    }

    pub fn save(&mut self, form: &RecordForm) -> Result<commands::CmdResult> {
        commands::save::run(&mut self.store, form)
    }

    // --- Records ---

    pub fn set_search_term(&mut self, term: &str) {
        self.store.set_search_term(term);
    }

    pub fn set_category_filter(&mut self, category: CategoryFilter) {
        self.store.set_category_filter(category);
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.store.set_status_filter(status);
    }

    pub fn list(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn view_report(&self, id: &str) -> Result<commands::CmdResult> {
        commands::view::run(&self.store, &RecordId::from(id))
    }

    pub fn remove_report(&mut self, id: &str) -> Result<commands::CmdResult> {
        commands::remove::run(&mut self.store, &RecordId::from(id))
    }

    /// Moves between two 0-based positions of the filtered view.
    pub fn move_in_view(&mut self, from: usize, to: usize) -> Result<commands::CmdResult> {
        commands::reorder::run(&mut self.store, from, to)
    }

    pub fn move_by_id(&mut self, active: &str, over: &str) -> Result<commands::CmdResult> {
        commands::reorder::run_by_id(
            &mut self.store,
            &RecordId::from(active),
            &RecordId::from(over),
        )
    }

    // --- Assistant ---

    pub async fn draft(&self, prompt: &str) -> AssistOutcome {
        self.pipeline.request_draft(prompt).await
    }

    pub async fn specialized_draft(&self, prompt: &str, specialty: Category) -> AssistOutcome {
        self.pipeline.request_specialized_draft(prompt, specialty).await
    }

    /// Summarizes a stored report. The report itself is left untouched.
    pub async fn summarize(&self, id: &str) -> Result<AssistOutcome> {
        let id = RecordId::from(id);
        let content = self
            .store
            .get(&id)
            .map(|r| r.content.clone())
            .ok_or(ReportError::NotFound(id))?;
        Ok(self.pipeline.request_summary(&content).await)
    }

    /// Summarizes whatever is currently in the edit buffer.
    pub async fn summarize_form(&self, form: &RecordForm) -> AssistOutcome {
        self.pipeline.request_summary(&form.content).await
    }

    /// Summarizes the last committed draft. Skipped when there is none.
    pub async fn summarize_current_draft(&self) -> AssistOutcome {
        match self.pipeline.draft_state().result_text {
            Some(text) => self.pipeline.request_summary(&text).await,
            None => AssistOutcome::Skipped,
        }
    }

    pub fn draft_state(&self) -> AssistRequest {
        self.pipeline.draft_state()
    }

    pub fn summary_state(&self) -> AssistRequest {
        self.pipeline.summary_state()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn pipeline(&self) -> &AssistPipeline<G> {
        &self.pipeline
    }
}
