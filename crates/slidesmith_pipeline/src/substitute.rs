//! `${name}` placeholder substitution.
//!
//! Two modes, matching the two places substitution happens in the pipeline:
//! strict substitution for prompt skeletons (a dangling reference is a bug in
//! the skeleton, not the content) and safe substitution for final documents
//! (an unresolved placeholder is degraded output, not an error).

use regex::{Captures, Regex};
use serde_json::{Map, Value as JsonValue};
use slidesmith_error::{PromptError, PromptErrorKind, SlidesmithResult};
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid placeholder regex"))
}

/// Substitute every `${name}` in `template` from `values`, strictly.
///
/// Extra keys in `values` are ignored; a placeholder with no matching key is
/// an error — no silent blanks in prompts.
///
/// # Examples
///
/// ```
/// use slidesmith_pipeline::substitute;
/// use std::collections::BTreeMap;
///
/// let mut values = BTreeMap::new();
/// values.insert("name".to_string(), "World".to_string());
/// assert_eq!(substitute("Hello ${name}!", &values).unwrap(), "Hello World!");
/// assert!(substitute("Hello ${missing}!", &values).is_err());
/// ```
pub fn substitute(template: &str, values: &BTreeMap<String, String>) -> SlidesmithResult<String> {
    let mut missing: Option<String> = None;

    let rendered = placeholder_pattern().replace_all(template, |cap: &Captures| {
        let key = cap[1].trim();
        match values.get(key) {
            Some(value) => value.clone(),
            None => {
                missing.get_or_insert_with(|| key.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(key) => Err(PromptError::new(PromptErrorKind::MissingSubstitution(key)))?,
        None => Ok(rendered.into_owned()),
    }
}

/// Substitute every `${name}` in `template` from `values`, leaving
/// placeholders with no matching key literally in place.
///
/// # Examples
///
/// ```
/// use slidesmith_pipeline::safe_substitute;
/// use serde_json::Map;
///
/// let mut values = Map::new();
/// values.insert("name".to_string(), serde_json::json!("World"));
/// assert_eq!(safe_substitute("Hello ${name}!", &values), "Hello World!");
/// assert_eq!(safe_substitute("Hello ${other}!", &Map::new()), "Hello ${other}!");
/// ```
pub fn safe_substitute(template: &str, values: &Map<String, JsonValue>) -> String {
    placeholder_pattern()
        .replace_all(template, |cap: &Captures| {
            let key = cap[1].trim();
            match values.get(key) {
                Some(value) => value_to_text(value),
                None => cap[0].to_string(),
            }
        })
        .into_owned()
}

/// Render a JSON value as substitution text.
///
/// Strings substitute verbatim (no surrounding quotes); everything else uses
/// its compact JSON rendering.
pub(crate) fn value_to_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_ignores_extra_keys() {
        let mut values = BTreeMap::new();
        values.insert("a".to_string(), "1".to_string());
        values.insert("unused".to_string(), "x".to_string());
        assert_eq!(substitute("${a}", &values).unwrap(), "1");
    }

    #[test]
    fn strict_reports_the_missing_key() {
        let err = substitute("${present} ${absent}", &BTreeMap::new()).unwrap_err();
        assert!(format!("{}", err).contains("present"));
    }

    #[test]
    fn safe_substitutes_known_and_preserves_unknown() {
        let mut values = Map::new();
        values.insert("name".to_string(), serde_json::json!("World"));
        let result = safe_substitute("Hello ${name}, meet ${stranger}!", &values);
        assert_eq!(result, "Hello World, meet ${stranger}!");
    }

    #[test]
    fn safe_renders_non_string_values_as_json() {
        let mut values = Map::new();
        values.insert("count".to_string(), serde_json::json!(3));
        values.insert("items".to_string(), serde_json::json!(["a", "b"]));
        let result = safe_substitute("${count} of ${items}", &values);
        assert_eq!(result, "3 of [\"a\",\"b\"]");
    }
}
