//! Pipeline run records.
//!
//! These types capture what happened during one pipeline run: the prompt and
//! response of every LLM call plus the assembled document. They are shared
//! between the executor and any caller that wants to display or log a run.

use serde::{Deserialize, Serialize};
use slidesmith_core::Stage;

/// Record of a single LLM call within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageExecution {
    /// The pipeline stage this call belonged to.
    pub stage: Stage,

    /// Unit being generated, for `Stage::Generate` calls.
    pub unit_name: Option<String>,

    /// The rendered prompt that was sent.
    pub prompt: String,

    /// The raw text response from the client.
    pub response: String,

    /// Position in the call sequence (0-indexed).
    pub sequence_number: usize,
}

/// Complete record of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRun {
    /// Identifier of the template the run targeted.
    pub template_id: String,

    /// The assembled output document.
    pub document: String,

    /// Ordered records of every LLM call made.
    pub stage_executions: Vec<StageExecution>,

    /// Units named in the composition plan that were skipped (unknown name,
    /// unparseable parameters, missing required parameters, or invocation
    /// failure).
    pub skipped_units: Vec<String>,
}
