//! Pipeline stage identifiers and per-stage results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// The stages of a pipeline run, in execution order.
///
/// `Generate` repeats once per planned unit for unit-based templates and is
/// skipped entirely for whole-document templates.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    /// Script analysis (theme, argument flow, audience)
    Analyze,
    /// Composition planning (unit selection or placeholder filling)
    Compose,
    /// Per-unit parameter generation and invocation
    Generate,
    /// Final document assembly
    Assemble,
}

/// The parsed output of one LLM call.
///
/// Created immediately after an LLM response returns; consumed by the next
/// stage's prompt construction and by the document assembler. Never persisted
/// beyond one pipeline run.
///
/// # Examples
///
/// ```
/// use slidesmith_core::StageResult;
/// use serde_json::Map;
///
/// let mut payload = Map::new();
/// payload.insert("theme".to_string(), serde_json::json!("rust"));
/// let result = StageResult::Structured(payload);
/// assert!(result.as_structured().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum StageResult {
    /// Successfully parsed JSON or keyed-section payload
    Structured(Map<String, JsonValue>),
    /// Parsing failed; verbatim response text retained for diagnostics
    Raw(String),
    /// The stage itself failed with the given reason
    Error(String),
}

impl StageResult {
    /// Get the structured payload, if any.
    pub fn as_structured(&self) -> Option<&Map<String, JsonValue>> {
        match self {
            StageResult::Structured(map) => Some(map),
            _ => None,
        }
    }

    /// Get the raw response text, if parsing failed.
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            StageResult::Raw(text) => Some(text),
            _ => None,
        }
    }

    /// Whether this result carries a structured payload.
    pub fn is_structured(&self) -> bool {
        matches!(self, StageResult::Structured(_))
    }

    /// Convert into a JSON value for storage in the pipeline context.
    ///
    /// Structured payloads become objects; raw text becomes a string so later
    /// stages can still reference it verbatim.
    pub fn into_value(self) -> JsonValue {
        match self {
            StageResult::Structured(map) => JsonValue::Object(map),
            StageResult::Raw(text) => JsonValue::String(text),
            StageResult::Error(reason) => JsonValue::String(reason),
        }
    }
}
