//! Tunable options for a pipeline run.

use serde::{Deserialize, Serialize};

/// Default model requested from the generation backend.
const DEFAULT_MODEL: &str = "qwen3:0.6b";

/// Default rendered-prompt cap in characters.
const DEFAULT_MAX_PROMPT_CHARS: usize = 8_000;

/// Default unit-count estimate used for progress totals before the
/// composition plan is known.
const DEFAULT_ESTIMATED_UNITS: usize = 4;

/// Default divisor applied to script length to derive the argument-flow
/// budget passed to the analysis prompt.
const DEFAULT_FLOW_DIVISOR: usize = 4;

/// Options governing prompt sizing, model selection, and progress estimates.
///
/// # Examples
///
/// ```
/// use slidesmith_core::GenerationOptions;
///
/// let options = GenerationOptions::builder()
///     .model("llama3:8b".to_string())
///     .max_prompt_chars(4_000usize)
///     .build()
///     .unwrap();
/// assert_eq!(options.model(), "llama3:8b");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters, derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct GenerationOptions {
    /// Model name passed to the generation client on every call
    model: String,
    /// Maximum rendered prompt length in characters; longer prompts are
    /// truncated from the end
    max_prompt_chars: usize,
    /// Unit-count estimate for progress totals before composition completes
    estimated_units: usize,
    /// Script length divided by this yields the argument-flow budget for the
    /// analysis prompt
    flow_divisor: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
            estimated_units: DEFAULT_ESTIMATED_UNITS,
            flow_divisor: DEFAULT_FLOW_DIVISOR,
        }
    }
}

impl GenerationOptions {
    /// Start building options from the defaults.
    pub fn builder() -> GenerationOptionsBuilder {
        GenerationOptionsBuilder::default()
    }

    /// Argument-flow character budget for the given script.
    pub fn argument_flow_limit(&self, script_content: &str) -> usize {
        script_content.chars().count() / self.flow_divisor.max(1)
    }
}
