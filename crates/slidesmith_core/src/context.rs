//! The mutable accumulator passed from stage to stage.

use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Accumulated state for one pipeline run.
///
/// The script content and template identifier are immutable inputs; stage
/// results grow monotonically as the run proceeds. A later stage may read any
/// earlier stage's result by name but must not mutate it in place — only the
/// orchestrator appends new results. Each run owns its own context, so two
/// concurrent runs share no mutable state.
///
/// # Examples
///
/// ```
/// use slidesmith_core::PipelineContext;
///
/// let mut ctx = PipelineContext::new("Intro to X.", "basic_deck");
/// ctx.insert_stage("analysis", serde_json::json!({"theme": "X"}));
/// assert!(ctx.stage_result("analysis").is_some());
/// assert!(ctx.stage_result("composition").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct PipelineContext {
    /// The caller-supplied script text (immutable input)
    script_content: String,
    /// Identifier of the selected template (immutable input)
    template_id: String,
    /// Parsed stage outputs keyed by stage name; grows monotonically
    stage_results: BTreeMap<String, JsonValue>,
}

impl PipelineContext {
    /// Create a fresh context for a new run.
    pub fn new(script_content: impl Into<String>, template_id: impl Into<String>) -> Self {
        Self {
            script_content: script_content.into(),
            template_id: template_id.into(),
            stage_results: BTreeMap::new(),
        }
    }

    /// Record a stage's parsed result.
    ///
    /// Inserting under an existing name replaces nothing: stage results never
    /// remove keys, and the orchestrator only writes each name once per run.
    pub fn insert_stage(&mut self, name: impl Into<String>, value: JsonValue) {
        let name = name.into();
        tracing::debug!(stage = %name, "Recording stage result");
        self.stage_results.entry(name).or_insert(value);
    }

    /// Read an earlier stage's result by name.
    pub fn stage_result(&self, name: &str) -> Option<&JsonValue> {
        self.stage_results.get(name)
    }

    /// Whether the named stage has produced a result.
    pub fn has_stage(&self, name: &str) -> bool {
        self.stage_results.contains_key(name)
    }
}
