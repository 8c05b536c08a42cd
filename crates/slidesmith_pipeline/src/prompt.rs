//! Prompt construction from stage-specific skeleton files.
//!
//! Each pipeline stage has a prompt skeleton on disk with `${name}`
//! placeholders. The builder substitutes script content, prior-stage results,
//! and template metadata into the skeleton, then applies a length cap so the
//! rendered prompt never exceeds the model's context budget. Truncation is
//! from the end: the beginning of a prompt carries the instructions and
//! schema, and losing the tail is recoverable where losing the head is not.

use crate::substitute::substitute;
use serde_json::Value as JsonValue;
use slidesmith_core::{PipelineContext, UnitSpec};
use slidesmith_error::{PromptError, PromptErrorKind, SlidesmithResult};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Builds prompts for each pipeline stage.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct PromptBuilder {
    /// Directory holding the stage prompt skeletons
    prompt_dir: PathBuf,
    /// Maximum rendered prompt length in characters
    max_chars: usize,
}

impl PromptBuilder {
    /// Skeleton file for the ANALYZE stage.
    pub const ANALYZE_FILE: &'static str = "analyze_script.md";
    /// Skeleton file for the COMPOSE stage of unit-based templates.
    pub const COMPOSE_FILE: &'static str = "compose_slides.md";
    /// Skeleton file for per-unit parameter generation.
    pub const PARAMETER_FILE: &'static str = "generate_parameters.md";
    /// Skeleton file for the COMPOSE stage of whole-document templates.
    pub const FILL_FILE: &'static str = "fill_placeholders.md";

    /// Create a builder reading skeletons from `prompt_dir` and capping
    /// rendered prompts at `max_chars` characters.
    pub fn new(prompt_dir: impl Into<PathBuf>, max_chars: usize) -> Self {
        Self {
            prompt_dir: prompt_dir.into(),
            max_chars,
        }
    }

    /// Render the named skeleton with the given substitutions.
    ///
    /// # Errors
    ///
    /// Returns an error if the skeleton file is absent or references a key
    /// missing from `substitutions`.
    #[tracing::instrument(skip(self, substitutions), fields(file = file_name))]
    pub fn build(
        &self,
        file_name: &str,
        substitutions: &BTreeMap<String, String>,
    ) -> SlidesmithResult<String> {
        let path = self.prompt_dir.join(file_name);
        if !path.exists() {
            return Err(PromptError::new(PromptErrorKind::TemplateMissing(
                path.display().to_string(),
            )))?;
        }

        let skeleton = std::fs::read_to_string(&path).map_err(|e| {
            PromptError::new(PromptErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        let rendered = substitute(&skeleton, substitutions)?;
        Ok(self.truncate(rendered))
    }

    /// Build the script-analysis prompt.
    pub fn build_analysis_prompt(
        &self,
        context: &PipelineContext,
        duration_minutes: u32,
        argument_flow_limit: usize,
    ) -> SlidesmithResult<String> {
        let mut substitutions = BTreeMap::new();
        substitutions.insert(
            "script_content".to_string(),
            context.script_content().clone(),
        );
        substitutions.insert(
            "duration_minutes".to_string(),
            duration_minutes.to_string(),
        );
        substitutions.insert(
            "argument_flow_limit".to_string(),
            argument_flow_limit.to_string(),
        );
        self.build(Self::ANALYZE_FILE, &substitutions)
    }

    /// Build the composition-planning prompt for a unit-based template.
    pub fn build_composition_prompt(
        &self,
        context: &PipelineContext,
        unit_catalog: &str,
    ) -> SlidesmithResult<String> {
        let mut substitutions = BTreeMap::new();
        substitutions.insert(
            "script_content".to_string(),
            context.script_content().clone(),
        );
        substitutions.insert(
            "analysis_result".to_string(),
            self.stage_json(context, "analysis")?,
        );
        substitutions.insert("unit_catalog".to_string(), unit_catalog.to_string());
        self.build(Self::COMPOSE_FILE, &substitutions)
    }

    /// Build the parameter-generation prompt for one planned unit.
    pub fn build_parameter_prompt(
        &self,
        context: &PipelineContext,
        spec: &UnitSpec,
    ) -> SlidesmithResult<String> {
        let arguments_list: Vec<String> = spec
            .arg_docs()
            .iter()
            .map(|(name, desc)| format!("  - {}: {}", name, desc))
            .collect();

        let mut substitutions = BTreeMap::new();
        substitutions.insert(
            "script_content".to_string(),
            context.script_content().clone(),
        );
        substitutions.insert(
            "analysis_result".to_string(),
            self.stage_json(context, "analysis")?,
        );
        substitutions.insert("unit_name".to_string(), spec.name().clone());
        substitutions.insert("unit_purpose".to_string(), spec.purpose().clone());
        substitutions.insert("unit_signature".to_string(), spec.signature());
        substitutions.insert("arguments_list".to_string(), arguments_list.join("\n"));
        self.build(Self::PARAMETER_FILE, &substitutions)
    }

    /// Build the placeholder-filling prompt for a whole-document template.
    pub fn build_fill_prompt(
        &self,
        context: &PipelineContext,
        placeholders: &BTreeSet<String>,
    ) -> SlidesmithResult<String> {
        let placeholders_list: Vec<String> =
            placeholders.iter().map(|p| format!("- {}", p)).collect();
        let json_example: Vec<String> = placeholders
            .iter()
            .map(|p| format!("  \"{}\": \"...\"", p))
            .collect();

        let mut substitutions = BTreeMap::new();
        substitutions.insert(
            "script_content".to_string(),
            context.script_content().clone(),
        );
        substitutions.insert(
            "analysis_result".to_string(),
            self.stage_json(context, "analysis")?,
        );
        substitutions.insert(
            "placeholders_list".to_string(),
            placeholders_list.join("\n"),
        );
        substitutions.insert("json_example".to_string(), json_example.join(",\n"));
        self.build(Self::FILL_FILE, &substitutions)
    }

    /// Pretty-printed JSON of an earlier stage result for prompt inclusion.
    fn stage_json(&self, context: &PipelineContext, stage: &str) -> SlidesmithResult<String> {
        let value = context.stage_result(stage).ok_or_else(|| {
            PromptError::new(PromptErrorKind::MissingSubstitution(format!(
                "{}_result",
                stage
            )))
        })?;
        Ok(serde_json::to_string_pretty(value).unwrap_or_else(|_| JsonValue::Null.to_string()))
    }

    /// Apply the length cap, truncating from the end.
    ///
    /// The returned prompt is at most `max_chars` characters; everything
    /// before the marker is byte-identical to the original prompt's prefix.
    fn truncate(&self, prompt: String) -> String {
        let total_chars = prompt.chars().count();
        if total_chars <= self.max_chars {
            return prompt;
        }

        // The marker names the removed count, whose digit count affects how
        // much must be removed; iterate until the figure stabilizes.
        let mut removed = total_chars - self.max_chars;
        loop {
            let marker = truncation_marker(removed);
            let keep = self.max_chars.saturating_sub(marker.chars().count());
            let actual_removed = total_chars - keep;
            if actual_removed == removed {
                let prefix: String = prompt.chars().take(keep).collect();
                tracing::warn!(
                    total_chars,
                    kept = keep,
                    removed,
                    "Prompt exceeded length cap; truncated from the end"
                );
                return prefix + &marker;
            }
            removed = actual_removed;
        }
    }
}

fn truncation_marker(removed: usize) -> String {
    format!("\n\n[... {} characters truncated ...]", removed)
}
