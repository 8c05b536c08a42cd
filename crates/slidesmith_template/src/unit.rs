//! Statically registered slide-construction units.

use crate::introspect::parse_unit_doc;
use serde_json::{Map, Value as JsonValue};
use slidesmith_core::{ParamSpec, UnitSpec};
use slidesmith_error::{SlidesmithResult, TemplateError, TemplateErrorKind};
use slidesmith_interface::SlideUnit;

/// Render function signature for a static unit.
type RenderFn = fn(&Map<String, JsonValue>) -> SlidesmithResult<String>;

/// A slide unit backed by a plain function and a documentation block.
///
/// The documentation text is parsed the same way the introspector parses any
/// unit doc: first line becomes the purpose, and lines under an `Args:`
/// header become the parameter-description mapping.
pub struct StaticUnit {
    spec: UnitSpec,
    render_fn: RenderFn,
}

impl StaticUnit {
    /// Create a unit from its name, doc text, parameter list, and renderer.
    pub fn new(name: &str, doc: &str, parameters: Vec<ParamSpec>, render_fn: RenderFn) -> Self {
        let (purpose, arg_docs) = parse_unit_doc(doc);
        let spec = UnitSpec::new(
            name,
            purpose,
            parameters,
            arg_docs.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        );
        Self { spec, render_fn }
    }
}

impl SlideUnit for StaticUnit {
    fn spec(&self) -> &UnitSpec {
        &self.spec
    }

    fn render(&self, params: &Map<String, JsonValue>) -> SlidesmithResult<String> {
        (self.render_fn)(params)
    }
}

/// Read a required string parameter.
pub(crate) fn require_str<'a>(
    params: &'a Map<String, JsonValue>,
    unit: &str,
    name: &str,
) -> SlidesmithResult<&'a str> {
    match params.get(name) {
        Some(JsonValue::String(s)) => Ok(s.as_str()),
        Some(_) => Err(TemplateError::new(TemplateErrorKind::InvalidParameter {
            unit: unit.to_string(),
            parameter: name.to_string(),
        }))?,
        None => Err(TemplateError::new(TemplateErrorKind::MissingParameter {
            unit: unit.to_string(),
            parameter: name.to_string(),
        }))?,
    }
}

/// Read an optional string parameter, falling back to a default.
pub(crate) fn optional_str<'a>(
    params: &'a Map<String, JsonValue>,
    name: &str,
    default: &'a str,
) -> &'a str {
    match params.get(name) {
        Some(JsonValue::String(s)) => s.as_str(),
        _ => default,
    }
}

/// Read a required list-of-strings parameter.
pub(crate) fn require_str_list(
    params: &Map<String, JsonValue>,
    unit: &str,
    name: &str,
) -> SlidesmithResult<Vec<String>> {
    match params.get(name) {
        Some(JsonValue::Array(items)) => items
            .iter()
            .map(|item| match item {
                JsonValue::String(s) => Ok(s.clone()),
                other => Ok(other.to_string()),
            })
            .collect(),
        Some(_) => Err(TemplateError::new(TemplateErrorKind::InvalidParameter {
            unit: unit.to_string(),
            parameter: name.to_string(),
        }))?,
        None => Err(TemplateError::new(TemplateErrorKind::MissingParameter {
            unit: unit.to_string(),
            parameter: name.to_string(),
        }))?,
    }
}
