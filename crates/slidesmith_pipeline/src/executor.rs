//! Pipeline execution logic.
//!
//! This module provides the executor that runs the staged generation
//! pipeline, calling the LLM client in sequence and passing accumulated
//! context between stages:
//!
//! `START → ANALYZE → COMPOSE → (per-unit GENERATE)* → ASSEMBLE → DONE`
//!
//! GENERATE issues one LLM call per planned unit rather than a single
//! fill-everything call: more round-trips, but one unit's bad parameters
//! never block the others, and progress can be reported per unit.

use crate::{assembler, extraction, prompt::PromptBuilder};
use serde_json::{Map, Value as JsonValue};
use slidesmith_core::{
    GenerationOptions, PipelineContext, ProgressEvent, Stage, TemplateRequirements,
};
use slidesmith_error::{PipelineError, PipelineErrorKind, SlidesmithResult};
use slidesmith_interface::{
    PipelineRun, ProgressSink, SlideClient, StageExecution, TemplateSource,
};
use slidesmith_template::{UnitRegistry, inspect};
use std::panic::AssertUnwindSafe;
use std::time::Duration;

/// Stages that run exactly once regardless of the composition plan:
/// analyze, compose, assemble.
const FIXED_STAGES: usize = 3;

/// Context key the ANALYZE stage writes.
const ANALYSIS_KEY: &str = "analysis";

/// Context key the COMPOSE stage writes.
const COMPOSITION_KEY: &str = "composition";

/// Executes the generation pipeline against a template.
///
/// The executor is a pure function of `(script_content, template)` given its
/// collaborators — no ambient global state — so two concurrent runs are fully
/// independent: each owns its own [`PipelineContext`].
pub struct PipelineExecutor<C: SlideClient> {
    client: C,
    prompts: PromptBuilder,
    registry: UnitRegistry,
    options: GenerationOptions,
    progress_sink: Option<Box<dyn ProgressSink>>,
}

impl<C: SlideClient> PipelineExecutor<C> {
    /// Create a new executor with the given client, prompt builder, and unit
    /// registry.
    pub fn new(client: C, prompts: PromptBuilder, registry: UnitRegistry) -> Self {
        Self {
            client,
            prompts,
            registry,
            options: GenerationOptions::default(),
            progress_sink: None,
        }
    }

    /// Override the generation options.
    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Attach a progress sink.
    ///
    /// The sink is invoked at every state transition. A sink that panics is
    /// caught and logged; a UI glitch must not abort generation.
    pub fn with_progress_sink(mut self, sink: Box<dyn ProgressSink>) -> Self {
        self.progress_sink = Some(sink);
        self
    }

    /// Get a reference to the underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run the full pipeline and return the assembled document with its run
    /// record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The template's backing source cannot be located
    /// - The ANALYZE or COMPOSE stage fails (client error or no parseable
    ///   payload) — these are fatal to the run
    /// - A client error occurs during unit generation
    ///
    /// Per-unit parse failures, missing required parameters, and unit
    /// invocation errors are not fatal: the offending unit is skipped and the
    /// run completes with the remaining units.
    #[tracing::instrument(
        skip(self, script_content, template),
        fields(template_id = template.template_id(), script_chars = script_content.len())
    )]
    pub async fn execute<T: TemplateSource>(
        &self,
        script_content: &str,
        template: &T,
    ) -> SlidesmithResult<PipelineRun> {
        let requirements = inspect(template, &self.registry)?;
        let mut context = PipelineContext::new(script_content, template.template_id());
        let mut executions = Vec::new();
        let mut skipped_units = Vec::new();

        let unit_based = requirements.is_unit_based();
        let initial_total = if unit_based {
            FIXED_STAGES + self.options.estimated_units()
        } else {
            FIXED_STAGES
        };
        let mut progress = ProgressTracker::new(self.progress_sink.as_deref(), initial_total);
        progress.emit(Stage::Analyze);

        self.run_analysis(&mut context, template, &mut executions)
            .await?;
        progress.advance(Stage::Analyze);

        let document = if unit_based {
            let plan = self
                .run_composition(&mut context, &requirements, &mut executions)
                .await?;
            // The plan reveals the true unit count; supersede the estimate.
            progress.set_total(FIXED_STAGES + plan.len());
            progress.advance(Stage::Compose);

            let mut slides = Vec::new();
            for unit_name in &plan {
                match self
                    .generate_unit(&context, &requirements, unit_name, &mut executions)
                    .await?
                {
                    Some(text) => slides.push(text),
                    None => skipped_units.push(unit_name.clone()),
                }
                progress.advance(Stage::Generate);
            }

            if slides.is_empty() {
                tracing::warn!("All planned units were skipped; assembled document is empty");
            }
            assembler::combine_units(&slides)
        } else {
            let content = self
                .run_fill(&mut context, &requirements, &mut executions)
                .await?;
            progress.advance(Stage::Compose);

            let document_text = template.read_document_text()?;
            assembler::fill_document(&document_text, &content, &Map::new())
        };

        progress.advance(Stage::Assemble);

        tracing::info!(
            calls = executions.len(),
            skipped = skipped_units.len(),
            document_chars = document.len(),
            "Pipeline run completed"
        );

        Ok(PipelineRun {
            template_id: template.template_id().to_string(),
            document,
            stage_executions: executions,
            skipped_units,
        })
    }

    /// Run the full pipeline under a wall-clock budget.
    ///
    /// There is no cancellation token threaded through stages; expiry races
    /// the whole run and discards partial stage results, which are not
    /// reusable on retry since the context is never persisted.
    pub async fn execute_with_deadline<T: TemplateSource>(
        &self,
        script_content: &str,
        template: &T,
        budget: Duration,
    ) -> SlidesmithResult<PipelineRun> {
        match tokio::time::timeout(budget, self.execute(script_content, template)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(budget_ms = budget.as_millis() as u64, "Pipeline run timed out");
                Err(PipelineError::new(PipelineErrorKind::Timeout(
                    budget.as_millis() as u64,
                )))?
            }
        }
    }

    /// ANALYZE: extract theme and argument flow from the script. Fatal on
    /// failure — without analysis there is no viable composition.
    async fn run_analysis<T: TemplateSource>(
        &self,
        context: &mut PipelineContext,
        template: &T,
        executions: &mut Vec<StageExecution>,
    ) -> SlidesmithResult<()> {
        let flow_limit = self.options.argument_flow_limit(context.script_content());
        let prompt =
            self.prompts
                .build_analysis_prompt(context, template.duration_minutes(), flow_limit)?;

        let response = self.call_client(Stage::Analyze, &prompt).await?;
        executions.push(StageExecution {
            stage: Stage::Analyze,
            unit_name: None,
            prompt,
            response: response.clone(),
            sequence_number: executions.len(),
        });

        let payload = extraction::extract_json(&response)
            .map_err(|e| PipelineError::stage(Stage::Analyze.to_string(), e.to_string()))?;
        context.insert_stage(ANALYSIS_KEY, JsonValue::Object(payload));
        Ok(())
    }

    /// COMPOSE (unit-based): ask for an ordered unit selection. Fatal on
    /// failure or an empty plan.
    async fn run_composition(
        &self,
        context: &mut PipelineContext,
        requirements: &TemplateRequirements,
        executions: &mut Vec<StageExecution>,
    ) -> SlidesmithResult<Vec<String>> {
        let prompt = self
            .prompts
            .build_composition_prompt(context, &requirements.unit_catalog())?;

        let response = self.call_client(Stage::Compose, &prompt).await?;
        executions.push(StageExecution {
            stage: Stage::Compose,
            unit_name: None,
            prompt,
            response: response.clone(),
            sequence_number: executions.len(),
        });

        let payload = extraction::extract_json(&response)
            .map_err(|e| PipelineError::stage(Stage::Compose.to_string(), e.to_string()))?;
        let plan = parse_plan(&payload);
        if plan.is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::EmptyPlan))?;
        }

        tracing::debug!(units = plan.len(), "Parsed composition plan");
        context.insert_stage(COMPOSITION_KEY, JsonValue::Object(payload));
        Ok(plan)
    }

    /// COMPOSE (whole-document): ask for the complete placeholder→value
    /// mapping, falling back to keyed-section parsing when the response is
    /// not JSON.
    async fn run_fill(
        &self,
        context: &mut PipelineContext,
        requirements: &TemplateRequirements,
        executions: &mut Vec<StageExecution>,
    ) -> SlidesmithResult<Map<String, JsonValue>> {
        let prompt = self
            .prompts
            .build_fill_prompt(context, requirements.placeholders())?;

        let response = self.call_client(Stage::Compose, &prompt).await?;
        executions.push(StageExecution {
            stage: Stage::Compose,
            unit_name: None,
            prompt,
            response: response.clone(),
            sequence_number: executions.len(),
        });

        let payload = match extraction::extract_json(&response) {
            Ok(map) => map,
            Err(e) => {
                tracing::debug!(error = %e, "Falling back to keyed-section parse");
                let sections = extraction::parse_keyed_sections(&response, &[]);
                if sections.is_empty() {
                    return Err(PipelineError::stage(
                        Stage::Compose.to_string(),
                        "response contained neither JSON nor keyed sections",
                    ))?;
                }
                sections
            }
        };

        context.insert_stage(COMPOSITION_KEY, JsonValue::Object(payload.clone()));
        Ok(payload)
    }

    /// GENERATE_i: produce parameters for one planned unit and invoke it.
    ///
    /// Returns `Ok(None)` when the unit is skipped (unknown name, parse
    /// failure, missing required parameter, or invocation error) — non-fatal
    /// by design: a partially populated presentation beats none. Client
    /// errors still propagate as fatal.
    async fn generate_unit(
        &self,
        context: &PipelineContext,
        requirements: &TemplateRequirements,
        unit_name: &str,
        executions: &mut Vec<StageExecution>,
    ) -> SlidesmithResult<Option<String>> {
        let Some(spec) = requirements.units().get(unit_name) else {
            tracing::warn!(unit = %unit_name, "Planned unit is not registered; skipping");
            return Ok(None);
        };

        let prompt = self.prompts.build_parameter_prompt(context, spec)?;
        let response = self.call_client(Stage::Generate, &prompt).await?;
        executions.push(StageExecution {
            stage: Stage::Generate,
            unit_name: Some(unit_name.to_string()),
            prompt,
            response: response.clone(),
            sequence_number: executions.len(),
        });

        let result = extraction::extract(&response);
        let Some(payload) = result.as_structured() else {
            tracing::warn!(unit = %unit_name, "Parameter response was not parseable; skipping unit");
            return Ok(None);
        };

        // Some models wrap their mapping in a {"parameters": {...}} envelope.
        let params = payload
            .get("parameters")
            .and_then(JsonValue::as_object)
            .unwrap_or(payload);

        let mut filtered = Map::new();
        for (key, value) in params {
            if spec.declares(key) {
                filtered.insert(key.clone(), value.clone());
            } else {
                tracing::debug!(unit = %unit_name, parameter = %key, "Dropping undeclared parameter");
            }
        }

        if let Some(missing) = spec
            .required_parameters()
            .find(|name| !filtered.contains_key(*name))
        {
            tracing::warn!(
                unit = %unit_name,
                parameter = %missing,
                "Missing required parameter; skipping unit"
            );
            return Ok(None);
        }

        let Some(unit) = self.registry.get(context.template_id(), unit_name) else {
            tracing::warn!(unit = %unit_name, "Unit vanished from registry; skipping");
            return Ok(None);
        };

        match unit.render(&filtered) {
            Ok(text) => Ok(Some(text)),
            Err(e) => {
                tracing::warn!(unit = %unit_name, error = %e, "Unit invocation failed; skipping");
                Ok(None)
            }
        }
    }

    /// Invoke the client, mapping failures to a fatal stage error.
    async fn call_client(&self, stage: Stage, prompt: &str) -> SlidesmithResult<String> {
        self.client
            .generate_batch(prompt, self.options.model())
            .await
            .map_err(|e| PipelineError::stage(stage.to_string(), e.to_string()).into())
    }
}

/// Extract the ordered unit names from a composition payload.
///
/// Expects `{"slides": [{"unit_name": "..."}, ...]}`; entries without a
/// `unit_name` are skipped with a warning.
fn parse_plan(payload: &Map<String, JsonValue>) -> Vec<String> {
    let Some(slides) = payload.get("slides").and_then(JsonValue::as_array) else {
        return Vec::new();
    };

    slides
        .iter()
        .filter_map(|entry| {
            let name = entry.get("unit_name").and_then(JsonValue::as_str);
            if name.is_none() {
                tracing::warn!("Composition plan entry without unit_name; skipping");
            }
            name.map(str::to_string)
        })
        .collect()
}

/// Serializes progress updates and guards the sink.
struct ProgressTracker<'a> {
    sink: Option<&'a dyn ProgressSink>,
    current: usize,
    total: usize,
}

impl<'a> ProgressTracker<'a> {
    fn new(sink: Option<&'a dyn ProgressSink>, total: usize) -> Self {
        Self {
            sink,
            current: 0,
            total: total.max(1),
        }
    }

    /// Supersede the estimated total once the true step count is known.
    fn set_total(&mut self, total: usize) {
        self.total = total.max(self.current).max(1);
    }

    /// Record a completed step and emit an event for it.
    fn advance(&mut self, stage: Stage) {
        self.current += 1;
        self.emit(stage);
    }

    /// Emit the current state without advancing.
    fn emit(&self, stage: Stage) {
        let Some(sink) = self.sink else { return };
        let event = ProgressEvent::new(stage, self.current, self.total);
        if std::panic::catch_unwind(AssertUnwindSafe(|| sink.report(&event))).is_err() {
            tracing::warn!(stage = %stage, "Progress sink panicked; continuing pipeline");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_preserves_order_and_skips_nameless_entries() {
        let payload = serde_json::json!({
            "slides": [
                {"unit_name": "title_slide"},
                {"order": 2},
                {"unit_name": "content_slide"}
            ]
        });
        let plan = parse_plan(payload.as_object().unwrap());
        assert_eq!(plan, vec!["title_slide", "content_slide"]);
    }

    #[test]
    fn plan_without_slides_is_empty() {
        let payload = serde_json::json!({"something_else": true});
        assert!(parse_plan(payload.as_object().unwrap()).is_empty());
    }

    #[test]
    fn tracker_clamps_total_to_progress_already_made() {
        let mut tracker = ProgressTracker::new(None, 10);
        tracker.advance(Stage::Analyze);
        tracker.advance(Stage::Compose);
        tracker.set_total(1);
        assert_eq!(tracker.total, 2);
    }
}
