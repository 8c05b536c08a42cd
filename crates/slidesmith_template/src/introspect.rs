//! Template introspection.
//!
//! Discovers what a template requires: the named `${placeholder}` slots of a
//! whole-document template, or the unit catalog of a unit-based template.
//! Results are not cached — each pipeline run re-inspects, so template edits
//! between runs are picked up.

use crate::UnitRegistry;
use regex::Regex;
use slidesmith_core::TemplateRequirements;
use slidesmith_error::SlidesmithResult;
use slidesmith_interface::TemplateSource;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid placeholder regex"))
}

/// Collect the distinct `${name}` placeholders in a document.
///
/// # Examples
///
/// ```
/// use slidesmith_template::extract_placeholders;
///
/// let names = extract_placeholders("# ${title}\n\nBy ${author} on ${date}. See ${title}.");
/// assert_eq!(names.len(), 3);
/// assert!(names.contains("title"));
/// ```
pub fn extract_placeholders(document: &str) -> BTreeSet<String> {
    placeholder_pattern()
        .captures_iter(document)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// Parse a unit documentation block.
///
/// The first line becomes the one-line purpose. Lines following an `Args:`
/// header of the form `name: description` populate the argument mapping,
/// terminated by a `Returns:`/`Raises:` header or end of text.
pub fn parse_unit_doc(doc: &str) -> (String, BTreeMap<String, String>) {
    let mut lines = doc.lines().map(str::trim).skip_while(|l| l.is_empty());
    let purpose = lines.next().unwrap_or_default().to_string();

    let mut args = BTreeMap::new();
    let mut in_args_section = false;

    for line in lines {
        if line == "Args:" {
            in_args_section = true;
            continue;
        }
        if line.starts_with("Returns:") || line.starts_with("Raises:") {
            in_args_section = false;
            continue;
        }
        if in_args_section
            && let Some((name, desc)) = line.split_once(':')
        {
            args.insert(name.trim().to_string(), desc.trim().to_string());
        }
    }

    (purpose, args)
}

/// Discover what the given template requires.
///
/// Unit-based templates are recognized by having units registered under their
/// identifier; everything else is treated as a whole-document template and
/// its document text is scanned for placeholders.
///
/// # Errors
///
/// Returns an error if a whole-document template's backing source cannot be
/// located.
#[tracing::instrument(skip_all, fields(template = template.template_id()))]
pub fn inspect(
    template: &dyn TemplateSource,
    registry: &UnitRegistry,
) -> SlidesmithResult<TemplateRequirements> {
    if let Some(units) = registry.units_for(template.template_id()) {
        let specs = units
            .iter()
            .map(|(name, unit)| (name.clone(), unit.spec().clone()))
            .collect();
        let requirements = TemplateRequirements::unit_based(specs);
        tracing::debug!(
            units = requirements.units().len(),
            "Inspected unit-based template"
        );
        return Ok(requirements);
    }

    let document = template.read_document_text()?;
    let requirements = TemplateRequirements::whole_document(extract_placeholders(&document));
    tracing::debug!(
        placeholders = requirements.placeholders().len(),
        "Inspected whole-document template"
    );
    Ok(requirements)
}
