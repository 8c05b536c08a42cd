//! Template introspection results.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One declared parameter of a slide-construction unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ParamSpec {
    /// Parameter name as the unit declares it
    name: String,
    /// Whether the unit supplies a default when the parameter is absent
    has_default: bool,
}

impl ParamSpec {
    /// A parameter the unit cannot render without.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_default: false,
        }
    }

    /// A parameter with a unit-supplied default.
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_default: true,
        }
    }
}

/// Introspected description of one slide-construction unit.
///
/// # Examples
///
/// ```
/// use slidesmith_core::{ParamSpec, UnitSpec};
///
/// let spec = UnitSpec::new(
///     "content_slide",
///     "Generate a standard content slide.",
///     vec![ParamSpec::required("topic"), ParamSpec::required("body")],
///     [("topic", "Section title"), ("body", "Main content text")],
/// );
/// assert_eq!(spec.signature(), "content_slide(topic, body)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct UnitSpec {
    /// Unit name
    name: String,
    /// One-line purpose taken from the first documentation line
    purpose: String,
    /// Ordered parameter list
    parameters: Vec<ParamSpec>,
    /// Parameter-name to description mapping parsed from the documentation
    arg_docs: BTreeMap<String, String>,
}

impl UnitSpec {
    /// Create a unit spec from its parts.
    pub fn new<'a>(
        name: impl Into<String>,
        purpose: impl Into<String>,
        parameters: Vec<ParamSpec>,
        arg_docs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self {
            name: name.into(),
            purpose: purpose.into(),
            parameters,
            arg_docs: arg_docs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Render a call-style signature for prompt catalogs.
    pub fn signature(&self) -> String {
        let params: Vec<&str> = self.parameters.iter().map(|p| p.name().as_str()).collect();
        format!("{}({})", self.name, params.join(", "))
    }

    /// Names of parameters the unit cannot render without.
    pub fn required_parameters(&self) -> impl Iterator<Item = &str> {
        self.parameters
            .iter()
            .filter(|p| !p.has_default())
            .map(|p| p.name().as_str())
    }

    /// Whether the unit declares the named parameter.
    pub fn declares(&self, name: &str) -> bool {
        self.parameters.iter().any(|p| p.name() == name)
    }

    /// Render a catalog entry for LLM consumption.
    pub fn catalog_entry(&self) -> String {
        let mut entry = format!(
            "Unit: {}\nPurpose: {}\nSignature: {}\n\nArguments:",
            self.name,
            self.purpose,
            self.signature()
        );
        for (arg, desc) in &self.arg_docs {
            entry.push_str(&format!("\n  - {}: {}", arg, desc));
        }
        entry
    }
}

/// Result of template introspection.
///
/// The two templating strategies are mutually exclusive per template:
/// `units` is empty for whole-document templates and `placeholders` is empty
/// for unit-based templates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_getters::Getters)]
pub struct TemplateRequirements {
    /// Named slots expected by a whole-document substitution template
    placeholders: BTreeSet<String>,
    /// Named slide-construction units exposed by a unit-based template
    units: BTreeMap<String, UnitSpec>,
}

impl TemplateRequirements {
    /// Requirements for a whole-document template.
    pub fn whole_document(placeholders: BTreeSet<String>) -> Self {
        Self {
            placeholders,
            units: BTreeMap::new(),
        }
    }

    /// Requirements for a unit-based template.
    pub fn unit_based(units: BTreeMap<String, UnitSpec>) -> Self {
        Self {
            placeholders: BTreeSet::new(),
            units,
        }
    }

    /// Whether this template is realized by invoking named units.
    pub fn is_unit_based(&self) -> bool {
        !self.units.is_empty()
    }

    /// Render the full unit catalog for the composition prompt.
    pub fn unit_catalog(&self) -> String {
        let entries: Vec<String> = self.units.values().map(UnitSpec::catalog_entry).collect();
        entries.join("\n\n==================================================\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_lists_parameters_in_order() {
        let spec = UnitSpec::new(
            "title_slide",
            "Generate the opening title slide.",
            vec![
                ParamSpec::required("title"),
                ParamSpec::required("author"),
                ParamSpec::optional("company"),
            ],
            [],
        );
        assert_eq!(spec.signature(), "title_slide(title, author, company)");
        let required: Vec<&str> = spec.required_parameters().collect();
        assert_eq!(required, vec!["title", "author"]);
    }

    #[test]
    fn strategies_are_mutually_exclusive() {
        let whole = TemplateRequirements::whole_document(
            ["name".to_string()].into_iter().collect(),
        );
        assert!(!whole.is_unit_based());
        assert!(whole.units().is_empty());

        let mut units = BTreeMap::new();
        units.insert(
            "lead_slide".to_string(),
            UnitSpec::new("lead_slide", "Emphasis slide.", vec![ParamSpec::required("main_topic")], []),
        );
        let unit_based = TemplateRequirements::unit_based(units);
        assert!(unit_based.is_unit_based());
        assert!(unit_based.placeholders().is_empty());
    }

    #[test]
    fn catalog_includes_argument_docs() {
        let spec = UnitSpec::new(
            "content_slide",
            "Generate standard content slide.",
            vec![ParamSpec::required("topic"), ParamSpec::required("body")],
            [("topic", "Section title"), ("body", "Main content text")],
        );
        let entry = spec.catalog_entry();
        assert!(entry.contains("Purpose: Generate standard content slide."));
        assert!(entry.contains("- topic: Section title"));
    }
}
