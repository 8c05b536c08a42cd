//! End-to-end generation against the shipped prompts and templates.

use slidesmith::{
    ClientError, ClientErrorKind, PipelineExecutor, PromptBuilder, SlideClient, SlideTemplate,
    SlidesmithResult, UnitRegistry,
};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

fn workspace_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join(relative)
}

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
        self.responses.lock().unwrap().pop_front().ok_or_else(|| {
            ClientError::new(ClientErrorKind::Api("exhausted".to_string())).into()
        })
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

#[tokio::test]
async fn shipped_basic_deck_generates_a_presentation() {
    let template = SlideTemplate::from_dir(workspace_path("templates/basic_deck")).unwrap();

    let client = ScriptedClient::new(&[
        r#"{"theme": "Rust ownership", "audience": "developers", "argument_flow": "intro, rules, examples", "key_points": ["moves", "borrows"]}"#,
        r#"{"slides": [
            {"unit_name": "title_slide", "order": 1},
            {"unit_name": "table_of_contents_slide", "order": 2},
            {"unit_name": "content_slide", "order": 3},
            {"unit_name": "conclusion_slide", "order": 4}
        ]}"#,
        r#"{"unit_name": "title_slide", "parameters": {"title": "Ownership in Rust", "author": "Erin", "date": "2026-08-07"}}"#,
        r#"{"unit_name": "table_of_contents_slide", "parameters": {"topics": ["Move semantics", "Borrowing"]}}"#,
        r#"{"unit_name": "content_slide", "parameters": {"topic": "Move semantics", "body": "Assignment transfers ownership."}}"#,
        r#"{"unit_name": "conclusion_slide", "parameters": {"body": "The borrow checker is your friend."}}"#,
    ]);

    let executor = PipelineExecutor::new(
        client,
        PromptBuilder::new(workspace_path("prompts"), 16_000),
        UnitRegistry::with_builtins(),
    );

    let script = "Today we cover ownership in Rust: move semantics, borrowing, and why the borrow checker helps.";
    let run = executor.execute(script, &template).await.unwrap();

    assert!(run.document.contains("# Ownership in Rust"));
    assert!(run.document.contains("1. Move semantics"));
    assert!(run.document.contains("## Move semantics"));
    assert!(run.document.contains("## Conclusion"));
    assert!(run.skipped_units.is_empty());
    assert_eq!(run.stage_executions.len(), 6);

    // The shipped skeletons embed the unit catalog into the compose prompt.
    assert!(run.stage_executions[1].prompt.contains("Unit: title_slide"));
}

#[tokio::test]
async fn shipped_simple_doc_fills_placeholders() {
    let template = SlideTemplate::from_dir(workspace_path("templates/simple_doc")).unwrap();

    let client = ScriptedClient::new(&[
        r#"{"theme": "status update", "audience": "team", "argument_flow": "plan, progress, next", "key_points": ["done", "next"]}"#,
        r#"{
            "header_title": "Weekly Update",
            "presentation_title": "Sprint 12 Review",
            "author_name": "Erin",
            "presentation_date": "2026-08-07",
            "main_topic": "What shipped",
            "topic_1": "Done",
            "topic_1_content": "- pipeline landed",
            "topic_2": "In flight",
            "topic_2_content": "- renderer polish",
            "topic_3": "Next",
            "topic_3_content": "- template gallery",
            "conclusion_content": "- on track"
        }"#,
    ]);

    let executor = PipelineExecutor::new(
        client,
        PromptBuilder::new(workspace_path("prompts"), 16_000),
        UnitRegistry::with_builtins(),
    );

    let run = executor
        .execute("Sprint recap: pipeline landed, renderer polish in flight.", &template)
        .await
        .unwrap();

    assert!(run.document.contains("# Sprint 12 Review"));
    assert!(run.document.contains("## Done"));
    assert!(run.document.contains("- on track"));
    // Every placeholder in the shipped template is resolved.
    assert!(!run.document.contains("${"));
}
