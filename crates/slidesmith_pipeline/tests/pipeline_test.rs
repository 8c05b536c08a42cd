//! Integration tests for the pipeline executor.
//!
//! These tests drive the full ANALYZE → COMPOSE → GENERATE → ASSEMBLE chain
//! with a scripted mock client returning canned responses per call.

use serde_json::json;
use slidesmith_core::{GenerationOptions, ProgressEvent, Stage};
use slidesmith_error::{
    ClientError, ClientErrorKind, SlidesmithErrorKind, SlidesmithResult,
};
use slidesmith_interface::{ProgressSink, SlideClient, TemplateSource};
use slidesmith_pipeline::{PipelineExecutor, PromptBuilder};
use slidesmith_template::UnitRegistry;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Mock client that returns canned responses in order.
struct ScriptedClient {
    responses: Mutex<VecDeque<String>>,
}

impl ScriptedClient {
    fn new(responses: &[&str]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
        }
    }
}

#[async_trait::async_trait]
impl SlideClient for ScriptedClient {
    async fn generate_batch(&self, _prompt: &str, _model: &str) -> SlidesmithResult<String> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| {
                ClientError::new(ClientErrorKind::Api("no more scripted responses".to_string()))
                    .into()
            })
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

/// Mock client that never responds, for deadline tests.
struct HangingClient;

#[async_trait::async_trait]
impl SlideClient for HangingClient {
    async fn generate_batch(&self, _prompt: &str, _model: &str) -> SlidesmithResult<String> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(String::new())
    }

    fn provider_name(&self) -> &'static str {
        "hanging"
    }
}

/// Template source for unit-based tests; no backing document needed.
struct UnitTemplate;

impl TemplateSource for UnitTemplate {
    fn template_id(&self) -> &str {
        "basic_deck"
    }

    fn read_document_text(&self) -> SlidesmithResult<String> {
        unreachable!("unit-based pipeline must not read a document")
    }

    fn read_stylesheet_text(&self) -> Option<String> {
        None
    }
}

/// Template source for whole-document tests.
struct DocTemplate {
    text: String,
}

impl TemplateSource for DocTemplate {
    fn template_id(&self) -> &str {
        "simple_doc"
    }

    fn read_document_text(&self) -> SlidesmithResult<String> {
        Ok(self.text.clone())
    }

    fn read_stylesheet_text(&self) -> Option<String> {
        None
    }
}

/// Progress sink that records every event.
#[derive(Default)]
struct CollectingSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl ProgressSink for CollectingSink {
    fn report(&self, event: &ProgressEvent) {
        self.events.lock().unwrap().push(*event);
    }
}

fn write_prompt_skeletons(dir: &std::path::Path) {
    std::fs::write(
        dir.join(PromptBuilder::ANALYZE_FILE),
        "Analyze (${duration_minutes}min, flow ${argument_flow_limit}):\n${script_content}",
    )
    .unwrap();
    std::fs::write(
        dir.join(PromptBuilder::COMPOSE_FILE),
        "Compose from ${analysis_result} with units:\n${unit_catalog}\nScript: ${script_content}",
    )
    .unwrap();
    std::fs::write(
        dir.join(PromptBuilder::PARAMETER_FILE),
        "Fill ${unit_name} ${unit_signature} (${unit_purpose}) using ${analysis_result}\n${arguments_list}\nScript: ${script_content}",
    )
    .unwrap();
    std::fs::write(
        dir.join(PromptBuilder::FILL_FILE),
        "Fill placeholders ${placeholders_list} as {${json_example}} from ${analysis_result}\nScript: ${script_content}",
    )
    .unwrap();
}

fn executor_with(
    responses: &[&str],
    prompt_dir: &std::path::Path,
) -> PipelineExecutor<ScriptedClient> {
    PipelineExecutor::new(
        ScriptedClient::new(responses),
        PromptBuilder::new(prompt_dir, 10_000),
        UnitRegistry::with_builtins(),
    )
}

const SCRIPT: &str = "Intro to X. Point A. Point B. Conclusion.";

#[tokio::test]
async fn end_to_end_unit_based_run() {
    let dir = tempfile::tempdir().unwrap();
    write_prompt_skeletons(dir.path());

    let executor = executor_with(
        &[
            r#"{"theme": "X"}"#,
            r#"{"slides": [{"unit_name": "title_slide"}, {"unit_name": "content_slide"}]}"#,
            r#"{"unit_name": "title_slide", "parameters": {"title": "Intro to X", "author": "Alice", "date": "2026-08-07"}}"#,
            r#"{"parameters": {"topic": "Point A", "body": "Details about point A."}}"#,
        ],
        dir.path(),
    );

    let run = executor.execute(SCRIPT, &UnitTemplate).await.unwrap();

    // Both units rendered, in plan order, joined by a blank line.
    let title_pos = run.document.find("# Intro to X").expect("title missing");
    let content_pos = run.document.find("## Point A").expect("content missing");
    assert!(title_pos < content_pos);
    assert!(run.document.contains("\n\n"));
    assert!(run.skipped_units.is_empty());

    // One call per stage: analyze, compose, two generates.
    assert_eq!(run.stage_executions.len(), 4);
    assert_eq!(run.stage_executions[0].stage, Stage::Analyze);
    assert_eq!(run.stage_executions[1].stage, Stage::Compose);
    assert_eq!(
        run.stage_executions[2].unit_name.as_deref(),
        Some("title_slide")
    );
    assert_eq!(
        run.stage_executions[3].unit_name.as_deref(),
        Some("content_slide")
    );
}

#[tokio::test]
async fn unit_missing_required_parameter_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_prompt_skeletons(dir.path());

    // Unit 2 (content_slide) is missing its required "body" parameter.
    let executor = executor_with(
        &[
            r#"{"theme": "X"}"#,
            r#"{"slides": [
                {"unit_name": "lead_slide"},
                {"unit_name": "content_slide"},
                {"unit_name": "conclusion_slide"}
            ]}"#,
            r#"{"parameters": {"main_topic": "The Big Idea"}}"#,
            r#"{"parameters": {"topic": "Orphaned"}}"#,
            r#"{"parameters": {"body": "Wrapping up."}}"#,
        ],
        dir.path(),
    );

    let run = executor.execute(SCRIPT, &UnitTemplate).await.unwrap();

    assert!(run.document.contains("The Big Idea"));
    assert!(run.document.contains("Wrapping up."));
    assert!(!run.document.contains("Orphaned"));
    assert_eq!(run.skipped_units, vec!["content_slide"]);
}

#[tokio::test]
async fn extra_parameters_are_dropped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_prompt_skeletons(dir.path());

    let executor = executor_with(
        &[
            r#"{"theme": "X"}"#,
            r#"{"slides": [{"unit_name": "lead_slide"}]}"#,
            r#"{"parameters": {"main_topic": "Focus", "hallucinated": "ignore me"}}"#,
        ],
        dir.path(),
    );

    let run = executor.execute(SCRIPT, &UnitTemplate).await.unwrap();
    assert!(run.document.contains("Focus"));
    assert!(!run.document.contains("ignore me"));
    assert!(run.skipped_units.is_empty());
}

#[tokio::test]
async fn unknown_planned_unit_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_prompt_skeletons(dir.path());

    let executor = executor_with(
        &[
            r#"{"theme": "X"}"#,
            r#"{"slides": [{"unit_name": "hologram_slide"}, {"unit_name": "lead_slide"}]}"#,
            r#"{"parameters": {"main_topic": "Still here"}}"#,
        ],
        dir.path(),
    );

    let run = executor.execute(SCRIPT, &UnitTemplate).await.unwrap();
    assert!(run.document.contains("Still here"));
    assert_eq!(run.skipped_units, vec!["hologram_slide"]);
}

#[tokio::test]
async fn analyze_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_prompt_skeletons(dir.path());

    let executor = executor_with(&["no structure in this response at all"], dir.path());
    let err = executor.execute(SCRIPT, &UnitTemplate).await.unwrap_err();

    match err.kind() {
        SlidesmithErrorKind::Pipeline(e) => {
            assert!(format!("{}", e).contains("analyze"));
        }
        other => panic!("expected pipeline error, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_composition_plan_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_prompt_skeletons(dir.path());

    let executor = executor_with(
        &[r#"{"theme": "X"}"#, r#"{"slides": []}"#],
        dir.path(),
    );

    assert!(executor.execute(SCRIPT, &UnitTemplate).await.is_err());
}

#[tokio::test]
async fn progress_is_monotone_and_ends_complete() {
    let dir = tempfile::tempdir().unwrap();
    write_prompt_skeletons(dir.path());

    let sink = std::sync::Arc::new(CollectingSink::default());
    let recorder = sink.clone();
    let executor = executor_with(
        &[
            r#"{"theme": "X"}"#,
            r#"{"slides": [{"unit_name": "lead_slide"}, {"unit_name": "conclusion_slide"}]}"#,
            r#"{"parameters": {"main_topic": "One"}}"#,
            r#"{"parameters": {"body": "Two"}}"#,
        ],
        dir.path(),
    )
    .with_progress_sink(Box::new(move |event: &ProgressEvent| recorder.report(event)));

    executor.execute(SCRIPT, &UnitTemplate).await.unwrap();

    let events = sink.events.lock().unwrap();
    assert!(!events.is_empty());

    let mut last_current = 0;
    for event in events.iter() {
        assert!(
            *event.current() >= last_current,
            "progress went backwards: {:?}",
            *event
        );
        assert!(event.current() <= event.total());
        last_current = *event.current();
    }

    let final_event = events.last().unwrap();
    assert_eq!(final_event.current(), final_event.total());
    assert_eq!(*final_event.stage(), Stage::Assemble);

    // The pre-composition estimate is superseded by the true unit count.
    let totals: Vec<usize> = events.iter().map(|e| *e.total()).collect();
    assert!(totals.windows(2).any(|w| w[0] != w[1]));
}

#[tokio::test]
async fn panicking_progress_sink_does_not_abort_run() {
    let dir = tempfile::tempdir().unwrap();
    write_prompt_skeletons(dir.path());

    let executor = executor_with(
        &[
            r#"{"theme": "X"}"#,
            r#"{"slides": [{"unit_name": "lead_slide"}]}"#,
            r#"{"parameters": {"main_topic": "Calm"}}"#,
        ],
        dir.path(),
    )
    .with_progress_sink(Box::new(|_: &ProgressEvent| panic!("UI glitch")));

    let run = executor.execute(SCRIPT, &UnitTemplate).await.unwrap();
    assert!(run.document.contains("Calm"));
}

#[tokio::test]
async fn whole_document_template_uses_safe_substitution() {
    let dir = tempfile::tempdir().unwrap();
    write_prompt_skeletons(dir.path());

    let template = DocTemplate {
        text: "Hello ${name}! Missing: ${unfilled}".to_string(),
    };
    let executor = executor_with(
        &[r#"{"theme": "greeting"}"#, r#"{"name": "World"}"#],
        dir.path(),
    );

    let run = executor.execute(SCRIPT, &template).await.unwrap();
    assert_eq!(run.document, "Hello World! Missing: ${unfilled}");
    // analyze + compose only; no per-unit calls for whole-document templates.
    assert_eq!(run.stage_executions.len(), 2);
}

#[tokio::test]
async fn whole_document_falls_back_to_keyed_sections() {
    let dir = tempfile::tempdir().unwrap();
    write_prompt_skeletons(dir.path());

    let template = DocTemplate {
        text: "# ${title}\n\n${conclusion}".to_string(),
    };
    let executor = executor_with(
        &[
            r#"{"theme": "plain"}"#,
            "TITLE: Keyed Response\nCONCLUSION: Still parsed\n",
        ],
        dir.path(),
    );

    let run = executor.execute(SCRIPT, &template).await.unwrap();
    assert!(run.document.contains("# Keyed Response"));
    assert!(run.document.contains("Still parsed"));
}

#[tokio::test]
async fn deadline_expiry_is_a_timeout_error() {
    let dir = tempfile::tempdir().unwrap();
    write_prompt_skeletons(dir.path());

    let executor = PipelineExecutor::new(
        HangingClient,
        PromptBuilder::new(dir.path(), 10_000),
        UnitRegistry::with_builtins(),
    );

    let err = executor
        .execute_with_deadline(SCRIPT, &UnitTemplate, Duration::from_millis(50))
        .await
        .unwrap_err();

    match err.kind() {
        SlidesmithErrorKind::Pipeline(e) => {
            assert!(format!("{}", e).contains("deadline"));
        }
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn context_carries_analysis_into_later_prompts() {
    let dir = tempfile::tempdir().unwrap();
    write_prompt_skeletons(dir.path());

    let executor = executor_with(
        &[
            r#"{"theme": "distinctive-theme-token"}"#,
            r#"{"slides": [{"unit_name": "lead_slide"}]}"#,
            r#"{"parameters": {"main_topic": "T"}}"#,
        ],
        dir.path(),
    );

    let run = executor.execute(SCRIPT, &UnitTemplate).await.unwrap();

    // The compose and generate prompts both embed the analysis result.
    assert!(run.stage_executions[1].prompt.contains("distinctive-theme-token"));
    assert!(run.stage_executions[2].prompt.contains("distinctive-theme-token"));
}

#[tokio::test]
async fn options_override_model_and_estimates() {
    let dir = tempfile::tempdir().unwrap();
    write_prompt_skeletons(dir.path());

    let options = GenerationOptions::builder()
        .model("llama3:8b".to_string())
        .estimated_units(9usize)
        .build()
        .unwrap();

    let executor = executor_with(
        &[
            r#"{"theme": "X"}"#,
            r#"{"slides": [{"unit_name": "lead_slide"}]}"#,
            r#"{"parameters": {"main_topic": "T"}}"#,
        ],
        dir.path(),
    )
    .with_options(options);

    let run = executor.execute(SCRIPT, &UnitTemplate).await.unwrap();
    assert_eq!(run.template_id, "basic_deck");
    assert_eq!(json!(run.skipped_units), json!([]));
}
