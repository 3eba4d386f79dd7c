use async_trait::async_trait;
use reportdash::api::DashboardApi;
use reportdash::assist::{
    AssistOutcome, AssistPipeline, AssistStatus, GenerationError, GenerationKind, TextGenerator,
};
use reportdash::filter::{CategoryFilter, StatusFilter};
use reportdash::model::{Category, Record, Status};
use reportdash::store::seed::FixtureSeed;
use reportdash::store::RecordStore;
use std::sync::Arc;
use std::time::Duration;

/// Echoes the input back as a paragraph, or fails when the input says so.
struct StubGenerator;

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(
        &self,
        _kind: GenerationKind,
        _framing: &str,
        user_input: &str,
    ) -> Result<String, GenerationError> {
        if user_input.contains("fail") {
            return Err(GenerationError::RequestFailed("503".into()));
        }
        if user_input.contains("slow") {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        Ok(format!("<p>{}</p>", user_input))
    }
}

fn seeded_api() -> DashboardApi<StubGenerator> {
    let mut api = DashboardApi::new(RecordStore::new(), AssistPipeline::new(Arc::new(StubGenerator)));
    api.seed(&FixtureSeed).unwrap();
    api
}

fn view_ids(api: &DashboardApi<StubGenerator>) -> Vec<String> {
    api.list()
        .unwrap()
        .listed_records
        .iter()
        .map(|e| e.record.id.as_str().to_string())
        .collect()
}

#[test]
fn reviewed_filter_yields_exactly_the_reviewed_sample() {
    let mut api = seeded_api();
    api.set_status_filter(StatusFilter::Only(Status::Reviewed));
    assert_eq!(view_ids(&api), vec!["2"]);
}

#[test]
fn new_record_appears_first_in_a_matching_filtered_view() {
    let mut store = RecordStore::with_records(reportdash::store::seed::sample_records()).unwrap();
    store
        .add(
            Record::new("Echo review", "Ana Lima", "P010", "<p>Normal EF.</p>")
                .with_id("new1")
                .with_category(Category::Cardiology),
        )
        .unwrap();
    store.set_category_filter(Category::Cardiology);

    let ids: Vec<_> = store.filtered().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["new1", "2"]);
}

#[test]
fn filters_compose_and_reset() {
    let mut api = seeded_api();
    api.set_search_term("martinez");
    api.set_status_filter(StatusFilter::Only(Status::Draft));
    assert_eq!(view_ids(&api), vec!["5"]);

    api.set_category_filter(CategoryFilter::Only(Category::General));
    assert!(view_ids(&api).is_empty());

    api.set_search_term("");
    api.set_category_filter(CategoryFilter::All);
    api.set_status_filter(StatusFilter::All);
    assert_eq!(view_ids(&api), vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn drag_in_filtered_view_moves_the_dragged_record() {
    let mut api = seeded_api();
    api.set_status_filter(StatusFilter::Only(Status::Draft));
    api.move_in_view(1, 0).unwrap();

    assert_eq!(view_ids(&api), vec!["5", "3"]);
    let canonical: Vec<_> = api.store().records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(canonical, vec!["1", "2", "5", "3", "4"]);
}

#[tokio::test]
async fn draft_failure_leaves_store_untouched_and_is_retryable() {
    let api = seeded_api();
    let before = api.store().records().to_vec();

    let outcome = api.draft("please fail").await;
    assert_eq!(
        outcome,
        AssistOutcome::Failed("Failed to generate draft. Please try again.".into())
    );
    assert_eq!(api.draft_state().status, AssistStatus::Error);
    assert_eq!(api.store().records(), before.as_slice());

    let retry = api.draft("retry works").await;
    assert_eq!(retry.text(), Some("<p>retry works</p>"));
    assert_eq!(api.draft_state().error_message, None);
}

#[tokio::test]
async fn overlapping_drafts_keep_the_latest() {
    let api = seeded_api();
    let (slow, fast) = tokio::join!(api.draft("slow first"), async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        api.draft("fast second").await
    });

    assert_eq!(slow, AssistOutcome::Superseded);
    assert_eq!(fast.text(), Some("<p>fast second</p>"));
    assert_eq!(
        api.draft_state().result_text.as_deref(),
        Some("<p>fast second</p>")
    );
}

#[tokio::test]
async fn draft_and_summary_are_independent() {
    let api = seeded_api();
    let (draft, summary) = tokio::join!(api.draft("slow draft"), api.summarize("3"));

    assert!(draft.is_committed());
    assert!(summary.unwrap().is_committed());
    assert_eq!(api.draft_state().status, AssistStatus::Success);
    assert_eq!(api.summary_state().status, AssistStatus::Success);
    assert!(api
        .summary_state()
        .result_text
        .unwrap()
        .starts_with("<p>Please summarize this medical report: "));
}

#[tokio::test]
async fn edit_flow_with_assistant_content() {
    let mut api = seeded_api();
    let mut form = api.edit_report("3").unwrap();

    let outcome = api.specialized_draft("headache follow-up", Category::Neurology).await;
    form.set_content(outcome.text().unwrap());
    form.status = Status::Completed;
    api.save(&form).unwrap();

    let saved = api.store().get(&"3".into()).unwrap();
    assert_eq!(saved.content, "<p>headache follow-up</p>");
    assert_eq!(saved.status, Status::Completed);
    assert_eq!(api.store().position(&"3".into()), Some(2));
}
