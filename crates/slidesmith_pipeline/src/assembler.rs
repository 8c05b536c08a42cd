//! Final document assembly.
//!
//! Pure functions of already-resolved content — no I/O — so assembly is
//! independently testable. Unit-based templates concatenate rendered units;
//! whole-document templates get one safe substitution pass.

use crate::substitute::safe_substitute;
use serde_json::{Map, Value as JsonValue};

/// Concatenate rendered unit outputs in plan order.
///
/// Each unit is right-trimmed of trailing newline and separator characters,
/// then joined with a blank line so slide separators are never doubled.
///
/// # Examples
///
/// ```
/// use slidesmith_pipeline::combine_units;
///
/// let slides = vec![
///     "# One\n\n---".to_string(),
///     "# Two\n\n---\n".to_string(),
/// ];
/// assert_eq!(combine_units(&slides), "# One\n\n# Two");
/// ```
pub fn combine_units(units: &[String]) -> String {
    let trimmed: Vec<&str> = units
        .iter()
        .map(|unit| unit.trim_end_matches(['\n', '-']))
        .collect();
    trimmed.join("\n\n")
}

/// Fill a whole-document template with resolved content.
///
/// Substitution is safe: placeholders with no matching key remain literally
/// in the output. Callers needing strictness must post-validate for leftover
/// `${...}` syntax. A `generated_content` envelope (some models wrap their
/// mapping) is unwrapped first, and `defaults` backfill keys the generated
/// content omitted.
pub fn fill_document(
    document: &str,
    content: &Map<String, JsonValue>,
    defaults: &Map<String, JsonValue>,
) -> String {
    let content = match content.get("generated_content") {
        Some(JsonValue::Object(inner)) => inner,
        _ => content,
    };

    let mut merged = defaults.clone();
    for (key, value) in content {
        merged.insert(key.clone(), value.clone());
    }

    safe_substitute(document, &merged)
}
